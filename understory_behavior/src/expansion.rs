// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expansion: binary expanded/collapsed state for a group of items.
//!
//! In single mode (`multi_expandable == false`) opening an item first closes
//! every other item of its group, so at most one item is expanded at a time.
//! The state itself lives on the items ([`ExpansionItem::expanded`]); this
//! behavior only decides when it may change.

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::item::{ExpansionItem, same_item};
use crate::signal::Signal;

/// Inputs for [`Expansion`].
#[derive(Debug)]
pub struct ExpansionInputs<T> {
    /// Allow more than one expanded item.
    pub multi_expandable: Signal<bool>,
    /// Disable expansion changes for the whole group.
    pub disabled: Signal<bool>,
    /// The items of the group.
    pub items: Signal<Vec<Rc<T>>>,
}

impl<T> Default for ExpansionInputs<T> {
    fn default() -> Self {
        Self {
            multi_expandable: Signal::new(false),
            disabled: Signal::new(false),
            items: Signal::new(Vec::new()),
        }
    }
}

/// Expand/collapse control for a group of items.
#[derive(Debug)]
pub struct Expansion<T> {
    /// Configuration.
    pub inputs: ExpansionInputs<T>,
}

impl<T: ExpansionItem> Expansion<T> {
    /// Create an expansion behavior.
    pub fn new(inputs: ExpansionInputs<T>) -> Self {
        Self { inputs }
    }

    /// Whether `item` may change expansion state.
    pub fn is_expandable(&self, item: &T) -> bool {
        !self.inputs.disabled.get() && !item.disabled() && item.expandable()
    }

    /// Items that are currently expanded.
    pub fn expanded_items(&self) -> Vec<Rc<T>> {
        self.inputs
            .items
            .get()
            .into_iter()
            .filter(|i| i.expanded().get())
            .collect()
    }

    /// Expand `item`, closing the rest of the group in single mode.
    ///
    /// Returns `false` if the item cannot expand or already is expanded.
    pub fn open(&self, item: &T) -> bool {
        self.open_within(item, &self.inputs.items.get())
    }

    /// Expand `item`, treating `group` as its expansion group.
    ///
    /// In single mode only the members of `group` are closed first. Trees use
    /// this to scope single expansion to a sibling set.
    pub fn open_within(&self, item: &T, group: &[Rc<T>]) -> bool {
        if !self.is_expandable(item) || item.expanded().get() {
            return false;
        }
        if !self.inputs.multi_expandable.get() {
            for other in group.iter().filter(|o| !same_item(&***o, item)) {
                self.close(other);
            }
        }
        tracing::trace!(id = item.id(), "expanded");
        item.expanded().set(true);
        true
    }

    /// Collapse `item`.
    ///
    /// Returns `false` if the item cannot change or already is collapsed.
    pub fn close(&self, item: &T) -> bool {
        if !self.is_expandable(item) || !item.expanded().get() {
            return false;
        }
        tracing::trace!(id = item.id(), "collapsed");
        item.expanded().set(false);
        true
    }

    /// Flip `item` between expanded and collapsed.
    pub fn toggle(&self, item: &T) -> bool {
        if item.expanded().get() {
            self.close(item)
        } else {
            self.open(item)
        }
    }

    /// Expand every item. Does nothing in single mode.
    pub fn open_all(&self) {
        if !self.inputs.multi_expandable.get() {
            return;
        }
        for item in self.inputs.items.get() {
            self.open(&item);
        }
    }

    /// Collapse every item that can change.
    pub fn close_all(&self) {
        for item in self.inputs.items.get() {
            self.close(&item);
        }
    }
}
