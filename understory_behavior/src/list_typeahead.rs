// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! List typeahead: jump to the item whose search term starts with what the
//! user has been typing.
//!
//! Keystrokes accumulate into a lowercase query. The query is dropped once
//! `typeahead_delay` milliseconds pass without input. Time is supplied by the
//! caller as a millisecond timestamp, so a stale query is detected on the next
//! keystroke (or [`ListTypeahead::is_typing`] call) rather than by a timer.
//!
//! Each search starts from the item that was active when the query began and
//! looks at the items after it, then the items before it, then that item
//! itself. Typing the same letter twice therefore does not cycle; it narrows.

use alloc::rc::Rc;
use alloc::string::String;
use core::cell::{Cell, RefCell};

use crate::item::ListTypeaheadItem;
use crate::list_focus::{FocusOptions, ListFocus};
use crate::signal::Signal;

/// Default idle delay after which the query resets, in milliseconds.
pub const DEFAULT_TYPEAHEAD_DELAY: u64 = 500;

/// Inputs for [`ListTypeahead`].
#[derive(Clone, Debug)]
pub struct ListTypeaheadInputs {
    /// Idle time in milliseconds after which the query resets.
    pub typeahead_delay: Signal<u64>,
}

impl Default for ListTypeaheadInputs {
    fn default() -> Self {
        Self {
            typeahead_delay: Signal::new(DEFAULT_TYPEAHEAD_DELAY),
        }
    }
}

/// Search-as-you-type over the items of a shared [`ListFocus`].
#[derive(Debug)]
pub struct ListTypeahead<T> {
    /// Configuration.
    pub inputs: ListTypeaheadInputs,
    focus: Rc<ListFocus<T>>,
    query: RefCell<String>,
    /// Active position when the current query began; outer `None` means no query.
    start_index: Cell<Option<Option<usize>>>,
    last_input: Cell<u64>,
}

impl<T: ListTypeaheadItem> ListTypeahead<T> {
    /// Create a typeahead behavior that moves `focus`.
    pub fn new(inputs: ListTypeaheadInputs, focus: Rc<ListFocus<T>>) -> Self {
        Self {
            inputs,
            focus,
            query: RefCell::new(String::new()),
            start_index: Cell::new(None),
            last_input: Cell::new(0),
        }
    }

    /// Whether a query is in progress at time `now`.
    pub fn is_typing(&self, now: u64) -> bool {
        !self.query.borrow().is_empty()
            && now.saturating_sub(self.last_input.get()) < self.inputs.typeahead_delay.get()
    }

    /// The current query at time `now`, empty once it has expired.
    pub fn query(&self, now: u64) -> String {
        if self.is_typing(now) {
            self.query.borrow().clone()
        } else {
            String::new()
        }
    }

    /// Drop the current query.
    pub fn reset(&self) {
        if !self.query.borrow().is_empty() {
            tracing::trace!("typeahead query reset");
        }
        self.query.borrow_mut().clear();
        self.start_index.set(None);
    }

    /// Feed one key at time `now`.
    ///
    /// Returns `true` if the key was consumed as part of a query, whether or
    /// not an item matched. Keys that are not a single character (such as
    /// `"Shift"`) and a space that would start a new query are ignored.
    pub fn search(&self, key: &str, now: u64) -> bool {
        let mut chars = key.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return false;
        };
        if !self.is_typing(now) {
            self.reset();
            if ch == ' ' {
                return false;
            }
        }

        if self.start_index.get().is_none() {
            self.start_index.set(Some(self.focus.active_index()));
        }
        self.last_input.set(now);
        self.query.borrow_mut().extend(ch.to_lowercase());
        tracing::trace!(query = %self.query.borrow(), "typeahead query");

        if let Some(item) = self.find_match() {
            self.focus.focus(&item, FocusOptions::default());
        }
        true
    }

    fn find_match(&self) -> Option<Rc<T>> {
        let items = self.focus.items();
        let count = items.len();
        let query = self.query.borrow();
        let start = self.start_index.get().flatten();
        let focusable = self.focus.focusable_filter();
        // With no start item the walk begins at index 0.
        let first = start.map_or(0, |s| s + 1);
        (0..count)
            .map(|offset| &items[(first + offset) % count])
            .find(|item| {
                focusable(item) && item.search_term().to_lowercase().starts_with(&*query)
            })
            .cloned()
    }
}
