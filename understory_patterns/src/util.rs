// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;

use understory_behavior::Item;

/// The item whose id matches an event target.
pub(crate) fn item_by_id<T: Item>(items: &[Rc<T>], target: Option<&str>) -> Option<Rc<T>> {
    let target = target?;
    items.iter().find(|item| item.id() == target).cloned()
}
