// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item contracts.
//!
//! Items are owned by the host and handed to behaviors as `Rc<T>` inside an
//! ordered `Signal<Vec<Rc<T>>>`. Behaviors compare items by identity (the
//! allocation), never by value, and never create, drop, or reorder them.
//!
//! Each behavior extends the base [`Item`] contract with the capability it
//! needs; a tree item implements all of them.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::ptr;

use crate::element::ElementRef;
use crate::signal::WritableSignal;

/// Base item contract shared by every behavior.
pub trait Item {
    /// Identifier, stable for the item's lifetime.
    fn id(&self) -> &str;

    /// Whether the host disabled this item.
    ///
    /// Disabling is distinct from removing the item from the collection.
    fn disabled(&self) -> bool;

    /// Host element this item controls, if it has its own focus target.
    fn element(&self) -> Option<ElementRef> {
        None
    }
}

/// An item that can be selected and carries a comparable value.
pub trait ListSelectionItem<V>: Item {
    /// Payload recorded in the selection's `values` when this item is selected.
    fn value(&self) -> V;

    /// Whether this item participates in selection at all.
    fn selectable(&self) -> bool {
        true
    }
}

/// An item that typeahead can match.
pub trait ListTypeaheadItem: Item {
    /// Text matched case-insensitively against the typed prefix.
    fn search_term(&self) -> &str;
}

/// An item with binary expanded/collapsed state.
pub trait ExpansionItem: Item {
    /// Expanded state; the behavior writes it, the host renders it.
    fn expanded(&self) -> &WritableSignal<bool>;

    /// Whether this item can expand at all (for example a leaf tree item cannot).
    fn expandable(&self) -> bool {
        true
    }
}

/// Position of `item` in `items` by identity.
pub fn position_of<T>(items: &[Rc<T>], item: &T) -> Option<usize> {
    items.iter().position(|i| ptr::eq(Rc::as_ptr(i), item))
}

/// Whether `a` and `b` are the same item.
pub fn same_item<T>(a: &T, b: &T) -> bool {
    ptr::eq(a, b)
}

/// Whether `item` is present in `items` by identity.
pub fn contains_item<T>(items: &[Rc<T>], item: &T) -> bool {
    position_of(items, item).is_some()
}

/// Keep only the items for which `keep` holds, preserving order.
pub(crate) fn filter_items<T>(items: Vec<Rc<T>>, keep: impl Fn(&T) -> bool) -> Vec<Rc<T>> {
    items.into_iter().filter(|i| keep(&**i)).collect()
}
