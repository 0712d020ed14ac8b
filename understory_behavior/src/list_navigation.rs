// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! List navigation: move the active item forward or backward through an
//! ordered collection, skipping items that are not focusable.
//!
//! Every movement has a `peek_*` counterpart that computes the target without
//! changing state, and a `*_in` counterpart that walks an explicit subset of
//! items (a tree node's children, say) instead of the whole list.
//!
//! ## Walk
//!
//! A walk starts at the active item's position in the walked items. When the
//! active item is not part of a subset, the walk starts from its position in
//! the full list instead, so callers can jump into a subset from outside it.
//! With no active item, forward walks begin before the first item and backward
//! walks after the last.
//!
//! From there the walk steps by one, wrapping around iff wrap is enabled, and
//! stops at the first focusable item. It gives up after returning to where it
//! started or stepping out of bounds, so it visits each item at most once.
//!
//! ```rust
//! use std::rc::Rc;
//! use understory_behavior::{
//!     Item, ListFocus, ListFocusInputs, ListNavigation, ListNavigationInputs, Signal,
//!     WritableSignal,
//! };
//!
//! struct Row { id: String, disabled: bool }
//! impl Item for Row {
//!     fn id(&self) -> &str { &self.id }
//!     fn disabled(&self) -> bool { self.disabled }
//! }
//!
//! let rows: Vec<Rc<Row>> = ["a", "b", "c"]
//!     .into_iter()
//!     .map(|id| Rc::new(Row { id: id.into(), disabled: id == "b" }))
//!     .collect();
//! let active = WritableSignal::new(None);
//! let focus = Rc::new(ListFocus::new(ListFocusInputs {
//!     items: Signal::new(rows.clone()),
//!     active_item: active.clone(),
//!     ..Default::default()
//! }));
//! let nav = ListNavigation::new(ListNavigationInputs::default(), focus);
//!
//! assert!(nav.first());
//! assert!(nav.next());
//! // "b" is disabled and skipped.
//! assert_eq!(active.get().map(|r| r.id.clone()).as_deref(), Some("c"));
//! ```

use alloc::rc::Rc;
use core::cell::Cell;

use crate::item::{Item, position_of};
use crate::list_focus::{FocusOptions, ListFocus};
use crate::signal::Signal;

/// Inputs for [`ListNavigation`].
#[derive(Clone, Debug)]
pub struct ListNavigationInputs {
    /// Wrap from the last item to the first and back.
    pub wrap: Signal<bool>,
}

impl Default for ListNavigationInputs {
    fn default() -> Self {
        Self {
            wrap: Signal::new(true),
        }
    }
}

/// Directional movement over a list, composed over a shared [`ListFocus`].
#[derive(Debug)]
pub struct ListNavigation<T> {
    /// Configuration.
    pub inputs: ListNavigationInputs,
    focus: Rc<ListFocus<T>>,
    wrap_suspended: Cell<bool>,
}

impl<T: Item> ListNavigation<T> {
    /// Create a navigation behavior that moves `focus`.
    pub fn new(inputs: ListNavigationInputs, focus: Rc<ListFocus<T>>) -> Self {
        Self {
            inputs,
            focus,
            wrap_suspended: Cell::new(false),
        }
    }

    /// The focus behavior this navigation moves.
    pub fn focus(&self) -> &Rc<ListFocus<T>> {
        &self.focus
    }

    /// Whether walks currently wrap.
    pub fn wraps(&self) -> bool {
        self.inputs.wrap.get() && !self.wrap_suspended.get()
    }

    /// Suspend or restore wrapping regardless of the `wrap` input.
    ///
    /// Range selection suspends wrap while it moves so a range never wraps
    /// past its anchor.
    pub fn suspend_wrap(&self, suspended: bool) {
        self.wrap_suspended.set(suspended);
    }

    /// Make `item` the active item.
    pub fn goto(&self, item: &Rc<T>) -> bool {
        self.goto_with(item, FocusOptions::default())
    }

    /// Make `item` the active item, with explicit focus options.
    pub fn goto_with(&self, item: &Rc<T>, opts: FocusOptions) -> bool {
        self.focus.focus(item, opts)
    }

    /// Move to the next focusable item.
    pub fn next(&self) -> bool {
        self.next_in(&self.focus.items(), FocusOptions::default())
    }

    /// Move to the previous focusable item.
    pub fn prev(&self) -> bool {
        self.prev_in(&self.focus.items(), FocusOptions::default())
    }

    /// Move to the first focusable item.
    pub fn first(&self) -> bool {
        self.first_in(&self.focus.items(), FocusOptions::default())
    }

    /// Move to the last focusable item.
    pub fn last(&self) -> bool {
        self.last_in(&self.focus.items(), FocusOptions::default())
    }

    /// Move to the next focusable item of `items`.
    pub fn next_in(&self, items: &[Rc<T>], opts: FocusOptions) -> bool {
        self.move_to(self.peek_next_in(items), opts)
    }

    /// Move to the previous focusable item of `items`.
    pub fn prev_in(&self, items: &[Rc<T>], opts: FocusOptions) -> bool {
        self.move_to(self.peek_prev_in(items), opts)
    }

    /// Move to the first focusable item of `items`.
    pub fn first_in(&self, items: &[Rc<T>], opts: FocusOptions) -> bool {
        self.move_to(self.peek_first_in(items), opts)
    }

    /// Move to the last focusable item of `items`.
    pub fn last_in(&self, items: &[Rc<T>], opts: FocusOptions) -> bool {
        self.move_to(self.peek_last_in(items), opts)
    }

    /// The item [`Self::next`] would move to.
    pub fn peek_next(&self) -> Option<Rc<T>> {
        self.peek_next_in(&self.focus.items())
    }

    /// The item [`Self::prev`] would move to.
    pub fn peek_prev(&self) -> Option<Rc<T>> {
        self.peek_prev_in(&self.focus.items())
    }

    /// The item [`Self::first`] would move to.
    pub fn peek_first(&self) -> Option<Rc<T>> {
        self.peek_first_in(&self.focus.items())
    }

    /// The item [`Self::last`] would move to.
    pub fn peek_last(&self) -> Option<Rc<T>> {
        self.peek_last_in(&self.focus.items())
    }

    /// The next focusable item of `items`.
    pub fn peek_next_in(&self, items: &[Rc<T>]) -> Option<Rc<T>> {
        self.walk(items, 1)
    }

    /// The previous focusable item of `items`.
    pub fn peek_prev_in(&self, items: &[Rc<T>]) -> Option<Rc<T>> {
        self.walk(items, -1)
    }

    /// The first focusable item of `items`.
    pub fn peek_first_in(&self, items: &[Rc<T>]) -> Option<Rc<T>> {
        let focusable = self.focus.focusable_filter();
        items.iter().find(|i| focusable(i)).cloned()
    }

    /// The last focusable item of `items`.
    pub fn peek_last_in(&self, items: &[Rc<T>]) -> Option<Rc<T>> {
        let focusable = self.focus.focusable_filter();
        items.iter().rev().find(|i| focusable(i)).cloned()
    }

    fn move_to(&self, target: Option<Rc<T>>, opts: FocusOptions) -> bool {
        target.is_some_and(|item| self.focus.focus(&item, opts))
    }

    /// Position the walk starts from, or `None` with no active item.
    fn start_index(&self, items: &[Rc<T>]) -> Option<usize> {
        let active = self.focus.active_item()?;
        position_of(items, &active).or_else(|| self.focus.active_index())
    }

    fn walk(&self, items: &[Rc<T>], delta: isize) -> Option<Rc<T>> {
        let len = isize::try_from(items.len()).ok()?;
        if len == 0 {
            return None;
        }
        let start = match self.start_index(items) {
            Some(index) => isize::try_from(index).ok()?,
            None if delta < 0 => len,
            None => -1,
        };
        let wrap = self.wraps();
        let focusable = self.focus.focusable_filter();
        let step = |i: isize| {
            if wrap {
                (i + delta).rem_euclid(len)
            } else {
                i + delta
            }
        };

        let mut index = step(start);
        for _ in 0..len {
            if index == start || index < 0 || index >= len {
                break;
            }
            let item = &items[index.unsigned_abs()];
            if focusable(item) {
                return Some(Rc::clone(item));
            }
            index = step(index);
        }
        None
    }
}
