// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simple combobox: an editable or button-like trigger paired with a popup
//! and/or an inline completion.
//!
//! The combobox handles its own expansion and forwards navigation keys to the
//! popup instead of interpreting them: while expanded, those key presses are
//! written to `keyboard_event_relay`, a signal the popup widget (a listbox, a
//! tree, a grid) reads and handles with its own bindings.
//!
//! ## Effects
//!
//! Two reconciliations depend on several pieces of state at once. They are
//! plain methods the host re-runs after any state change (after each event it
//! forwards, say):
//!
//! - [`SimpleComboboxPattern::highlight_effect`] shows the inline suggestion as
//!   ghost text: the input displays the full suggestion with the untyped
//!   suffix selected.
//! - [`SimpleComboboxPattern::close_popup_on_blur_effect`] collapses once
//!   neither the input nor the popup holds focus. Running it after the whole
//!   focus transfer, rather than on the input's focus-out, keeps the popup
//!   open while focus moves into it.

use alloc::rc::Rc;
use alloc::string::String;
use core::cell::Cell;
use core::fmt;

use understory_behavior::{Signal, TextInputElement, WritableSignal};
use understory_event_state::{
    EventOptions, FocusEvent, InputEvent, KeyMatcher, KeyboardEvent, KeyboardEventManager,
    Modifiers, PointerEvent, PointerEventManager,
};

/// How a combobox completes what the user types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AutocompleteMode {
    /// No completion.
    None,
    /// An inline suggestion only.
    Inline,
    /// A popup of options only.
    List,
    /// A popup plus an inline suggestion.
    Both,
}

/// Kind of widget a combobox pops up.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PopupType {
    /// A listbox of options.
    #[default]
    Listbox,
    /// A tree of options.
    Tree,
    /// A grid of options.
    Grid,
    /// A dialog.
    Dialog,
}

/// Inputs for [`SimpleComboboxPopupPattern`].
#[derive(Debug, Default)]
pub struct SimpleComboboxPopupInputs {
    /// Id of the popup element.
    pub id: String,
    /// Kind of popup widget.
    pub popup_type: Signal<PopupType>,
    /// Key presses forwarded by the combobox; share it with the combobox.
    pub keyboard_event_relay: WritableSignal<Option<KeyboardEvent>>,
}

/// The popup half of a simple combobox.
#[derive(Debug)]
pub struct SimpleComboboxPopupPattern {
    /// Configuration.
    pub inputs: SimpleComboboxPopupInputs,
    focus_within: Cell<bool>,
}

impl SimpleComboboxPopupPattern {
    /// Create a popup controller.
    pub fn new(inputs: SimpleComboboxPopupInputs) -> Self {
        Self {
            inputs,
            focus_within: Cell::new(false),
        }
    }

    /// Kind of popup widget.
    pub fn popup_type(&self) -> PopupType {
        self.inputs.popup_type.get()
    }

    /// Whether focus is inside the popup.
    pub fn has_focus(&self) -> bool {
        self.focus_within.get()
    }

    /// Focus entered the popup.
    pub fn on_focusin(&self, _event: &FocusEvent) {
        self.focus_within.set(true);
    }

    /// Focus left the popup.
    pub fn on_focusout(&self, _event: &FocusEvent) {
        self.focus_within.set(false);
    }

    /// Take the last key press the combobox forwarded, if any.
    pub fn take_relayed_event(&self) -> Option<KeyboardEvent> {
        self.inputs.keyboard_event_relay.replace(None)
    }
}

/// Inputs for [`SimpleComboboxPattern`].
pub struct SimpleComboboxInputs {
    /// Id of the combobox element.
    pub id: String,
    /// The text input, for editable comboboxes.
    pub input: Option<Rc<dyn TextInputElement>>,
    /// Text the user has typed.
    pub value: WritableSignal<String>,
    /// Whether the popup is shown, shared with the host.
    pub expanded: WritableSignal<bool>,
    /// Ignore every interaction.
    pub disabled: Signal<bool>,
    /// Whether the trigger is a text input (as opposed to a button).
    pub editable: Signal<bool>,
    /// The popup, if one is attached.
    pub popup: Signal<Option<Rc<SimpleComboboxPopupPattern>>>,
    /// Current inline completion, if any.
    pub inline_suggestion: Signal<Option<String>>,
    /// Key presses forwarded to the popup; share it with the popup.
    pub keyboard_event_relay: WritableSignal<Option<KeyboardEvent>>,
}

impl fmt::Debug for SimpleComboboxInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleComboboxInputs")
            .field("id", &self.id)
            .field("has_input", &self.input.is_some())
            .field("value", &self.value)
            .field("expanded", &self.expanded)
            .field("editable", &self.editable)
            .finish_non_exhaustive()
    }
}

impl Default for SimpleComboboxInputs {
    fn default() -> Self {
        Self {
            id: String::new(),
            input: None,
            value: WritableSignal::new(String::new()),
            expanded: WritableSignal::new(false),
            disabled: Signal::new(false),
            editable: Signal::new(true),
            popup: Signal::new(None),
            inline_suggestion: Signal::new(None),
            keyboard_event_relay: WritableSignal::new(None),
        }
    }
}

/// Controller for a simple combobox.
#[derive(Debug)]
pub struct SimpleComboboxPattern {
    /// Configuration.
    pub inputs: SimpleComboboxInputs,
    has_focus: Cell<bool>,
    is_deleting: Cell<bool>,
}

impl SimpleComboboxPattern {
    /// Create a combobox controller.
    pub fn new(inputs: SimpleComboboxInputs) -> Self {
        Self {
            inputs,
            has_focus: Cell::new(false),
            is_deleting: Cell::new(false),
        }
    }

    /// Whether the popup is shown.
    pub fn expanded(&self) -> bool {
        self.inputs.expanded.get()
    }

    /// Whether the combobox input holds focus.
    pub fn has_focus(&self) -> bool {
        self.has_focus.get()
    }

    /// Whether the last edit removed text.
    pub fn is_deleting(&self) -> bool {
        self.is_deleting.get()
    }

    /// Completion mode implied by what is attached right now.
    pub fn autocomplete(&self) -> AutocompleteMode {
        let list = self.inputs.popup.get().is_some();
        let inline = self.inputs.inline_suggestion.get().is_some();
        match (list, inline) {
            (false, false) => AutocompleteMode::None,
            (false, true) => AutocompleteMode::Inline,
            (true, false) => AutocompleteMode::List,
            (true, true) => AutocompleteMode::Both,
        }
    }

    /// Show the popup.
    pub fn expand(&self) -> bool {
        if self.inputs.disabled.get() || self.expanded() {
            return false;
        }
        tracing::trace!(id = %self.inputs.id, "combobox expanded");
        self.inputs.expanded.set(true);
        true
    }

    /// Hide the popup.
    pub fn collapse(&self) -> bool {
        if self.inputs.disabled.get() || !self.expanded() {
            return false;
        }
        tracing::trace!(id = %self.inputs.id, "combobox collapsed");
        self.inputs.expanded.set(false);
        true
    }

    /// Handle a key press on the combobox.
    pub fn on_keydown(&self, event: &mut KeyboardEvent) -> bool {
        if self.inputs.disabled.get() {
            return false;
        }
        let editable = self.inputs.editable.get();
        let manager = if self.expanded() {
            KeyboardEventManager::new()
                .on("Escape", |c: &Self, _| {
                    c.collapse();
                })
                .on_with(Modifiers::ALT, "ArrowUp", |c: &Self, _| {
                    c.collapse();
                })
                .on_with_options(
                    [Modifiers::empty(), Modifiers::SHIFT],
                    ["ArrowUp", "ArrowDown"],
                    Self::relay,
                    EventOptions::allow_repeat(),
                )
                .on_with([Modifiers::empty(), Modifiers::SHIFT], "Enter", Self::relay)
                .on_if_with_options(
                    !editable,
                    [Modifiers::empty(), Modifiers::SHIFT],
                    ["Home", "End"],
                    Self::relay,
                    EventOptions::allow_repeat(),
                )
                .on_if(
                    !editable,
                    [Modifiers::empty(), Modifiers::SHIFT],
                    KeyMatcher::Printable,
                    Self::relay,
                )
        } else {
            KeyboardEventManager::new()
                .on_with(
                    [Modifiers::empty(), Modifiers::ALT],
                    "ArrowDown",
                    |c: &Self, _| {
                        c.expand();
                    },
                )
                .on_if(!editable, Modifiers::empty(), [" ", "Enter"], |c: &Self, _| {
                    c.expand();
                })
        };
        manager.handle(self, event)
    }

    /// Handle a pointer press on the combobox.
    pub fn on_pointerdown(&self, event: &mut PointerEvent) -> bool {
        if self.inputs.disabled.get() {
            return false;
        }
        PointerEventManager::new()
            .on(|c: &Self, _| {
                if !c.collapse() {
                    c.expand();
                }
            })
            .handle(self, event)
    }

    /// Record an edit of the input.
    pub fn on_input(&self, event: &InputEvent) {
        if self.inputs.disabled.get() {
            return;
        }
        self.inputs.value.set(event.value.clone());
        self.is_deleting.set(event.is_deletion());
        if self.inputs.editable.get() {
            self.expand();
        }
    }

    /// Focus entered the combobox input.
    pub fn on_focusin(&self, _event: &FocusEvent) {
        self.has_focus.set(true);
    }

    /// Focus left the combobox input.
    pub fn on_focusout(&self, _event: &FocusEvent) {
        self.has_focus.set(false);
    }

    /// Show the inline suggestion as selected ghost text.
    ///
    /// Applies only while the input is focused, the popup is expanded, the
    /// last edit was not a deletion, and the suggestion extends the typed value
    /// (ignoring case). Returns whether the input was updated.
    pub fn highlight_effect(&self) -> bool {
        let Some(input) = &self.inputs.input else {
            return false;
        };
        if !self.has_focus() || !self.expanded() || self.is_deleting() {
            return false;
        }
        let Some(suggestion) = self.inputs.inline_suggestion.get() else {
            return false;
        };
        let value = self.inputs.value.get();
        let typed = value.chars().count();
        let total = suggestion.chars().count();
        let extends = total > typed
            && suggestion
                .chars()
                .zip(value.chars())
                .all(|(s, v)| s.to_lowercase().eq(v.to_lowercase()));
        if !extends {
            return false;
        }
        input.set_value(&suggestion);
        input.set_selection_range(typed, total);
        true
    }

    /// Collapse once neither the input nor the popup holds focus.
    ///
    /// Returns whether the popup was collapsed.
    pub fn close_popup_on_blur_effect(&self) -> bool {
        if !self.expanded() || self.has_focus() {
            return false;
        }
        if self.inputs.popup.get().is_some_and(|popup| popup.has_focus()) {
            return false;
        }
        self.collapse()
    }

    fn relay(&self, event: &KeyboardEvent) {
        tracing::trace!(key = %event.key, "relaying key to combobox popup");
        self.inputs.keyboard_event_relay.set(Some(event.clone()));
    }
}
