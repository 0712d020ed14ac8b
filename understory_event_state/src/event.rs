// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-supplied input events.
//!
//! These are deliberately small, owned snapshots of the platform events a host
//! receives. The behavior layer only inspects key names, modifier state, the
//! pointer button, and target identity; it never looks at geometry.
//!
//! Targets are identified by the `id` of the item the host resolved the event
//! to (for example by walking up from the DOM node to the nearest widget item).

use alloc::string::String;

bitflags::bitflags! {
    /// Modifier keys held while an event was produced.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Control key.
        const CTRL  = 0b0000_0001;
        /// Shift key.
        const SHIFT = 0b0000_0010;
        /// Alt / Option key.
        const ALT   = 0b0000_0100;
        /// Meta / Command / Windows key.
        const META  = 0b0000_1000;
    }
}

/// A keyboard event as seen by the behavior layer.
///
/// `key` follows the platform key-name contract: named keys such as
/// `"ArrowUp"`, `"Home"`, `"Enter"`, `"Escape"`, and single characters for
/// printable input (including `" "` for the space bar).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// Key name.
    pub key: String,
    /// Modifiers held during the key press.
    pub modifiers: Modifiers,
    /// Whether this event is an auto-repeat of a held key.
    pub repeat: bool,
    /// Identifier of the item the event targets, if the host resolved one.
    pub target: Option<String>,
    /// Event timestamp in milliseconds.
    pub timestamp: u64,
    /// Set by handlers that consumed the platform default action.
    pub default_prevented: bool,
    /// Set by handlers that stopped propagation to ancestors.
    pub propagation_stopped: bool,
}

impl KeyboardEvent {
    /// Create an unmodified, non-repeating key press with timestamp zero.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::empty(),
            repeat: false,
            target: None,
            timestamp: 0,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Set the held modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the target item id.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set the event timestamp in milliseconds.
    #[must_use]
    pub fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Mark the event as an auto-repeat.
    #[must_use]
    pub fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// Record that the platform default action should not run.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Record that the event should not propagate further.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Pointer button that produced a pointer event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Main button, usually the left mouse button or a touch contact.
    #[default]
    Primary,
    /// Auxiliary button, usually the wheel button.
    Auxiliary,
    /// Secondary button, usually the right mouse button.
    Secondary,
    /// Any other button, by platform index.
    Other(u8),
}

/// A pointer-down style event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointerEvent {
    /// Button that was pressed.
    pub button: PointerButton,
    /// Modifiers held during the press.
    pub modifiers: Modifiers,
    /// Identifier of the item under the pointer, if any.
    pub target: Option<String>,
    /// Event timestamp in milliseconds.
    pub timestamp: u64,
    /// Set by handlers that consumed the platform default action.
    pub default_prevented: bool,
    /// Set by handlers that stopped propagation to ancestors.
    pub propagation_stopped: bool,
}

impl PointerEvent {
    /// Primary-button press on `target`.
    pub fn on(target: impl Into<String>) -> Self {
        Self {
            button: PointerButton::Primary,
            modifiers: Modifiers::empty(),
            target: Some(target.into()),
            timestamp: 0,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Set the pressed button.
    #[must_use]
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Set the held modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Record that the platform default action should not run.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Record that the event should not propagate further.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Focus moving onto or away from an element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusEvent {
    /// Identifier of the element gaining (focus-in) or losing (focus-out) focus.
    pub target: Option<String>,
    /// Identifier of the element on the other side of the transfer, if known.
    pub related_target: Option<String>,
}

impl FocusEvent {
    /// Focus event for `target` with no related target.
    pub fn on(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            related_target: None,
        }
    }
}

/// Text edit applied to an editable element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputEvent {
    /// Full element value after the edit.
    pub value: String,
    /// Platform input type, for example `"insertText"` or `"deleteContentBackward"`.
    pub input_type: String,
}

impl InputEvent {
    /// An insertion that leaves the element holding `value`.
    pub fn insert(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            input_type: String::from("insertText"),
        }
    }

    /// A backward deletion that leaves the element holding `value`.
    pub fn delete(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            input_type: String::from("deleteContentBackward"),
        }
    }

    /// Whether this edit removed content.
    pub fn is_deletion(&self) -> bool {
        self.input_type.starts_with("delete")
    }
}
