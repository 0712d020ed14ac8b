// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Opaque handles to host UI elements.
//!
//! Behaviors never inspect elements. The only thing they do with one is ask
//! the host to move real input focus to it (and, for the combobox input, to
//! show and select text).

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

/// An element the host can move input focus to.
pub trait HostElement {
    /// Move input focus to this element without scrolling it into view.
    fn focus(&self);
}

/// Shared handle to a [`HostElement`].
#[derive(Clone)]
pub struct ElementRef(Rc<dyn HostElement>);

impl ElementRef {
    /// Wrap a host element.
    pub fn new(element: impl HostElement + 'static) -> Self {
        Self(Rc::new(element))
    }

    /// Wrap an already shared host element.
    ///
    /// The host keeps its own handle, and every `ElementRef` built from the
    /// same `Rc` compares equal.
    ///
    /// ```
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    /// use understory_behavior::{ElementRef, HostElement};
    ///
    /// struct Button {
    ///     focused: Cell<u32>,
    /// }
    ///
    /// impl HostElement for Button {
    ///     fn focus(&self) {
    ///         self.focused.set(self.focused.get() + 1);
    ///     }
    /// }
    ///
    /// let button = Rc::new(Button { focused: Cell::new(0) });
    /// let shared: Rc<dyn HostElement> = button.clone();
    /// let a = ElementRef::from_rc(shared.clone());
    /// let b = ElementRef::from_rc(shared);
    /// assert!(a.ptr_eq(&b));
    /// assert!(!a.ptr_eq(&ElementRef::new(Button { focused: Cell::new(0) })));
    ///
    /// b.focus();
    /// assert_eq!(button.focused.get(), 1);
    /// ```
    pub fn from_rc(element: Rc<dyn HostElement>) -> Self {
        Self(element)
    }

    /// Ask the host to focus the element.
    pub fn focus(&self) {
        self.0.focus();
    }

    /// Whether both handles refer to the same element.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ElementRef(..)")
    }
}

/// A text input whose displayed value and selection the behavior may drive.
///
/// Offsets are in characters of the displayed value.
pub trait TextInputElement {
    /// The value currently displayed.
    fn value(&self) -> String;
    /// Replace the displayed value.
    fn set_value(&self, value: &str);
    /// Select the characters in `start..end`.
    fn set_selection_range(&self, start: usize, end: usize);
}
