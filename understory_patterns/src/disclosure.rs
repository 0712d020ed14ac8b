// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Disclosure: a single trigger that shows and hides one region.
//!
//! An `always_expanded` disclosure can be opened but never collapsed. If the
//! host hands it a collapsed state anyway, [`DisclosurePattern::validate`]
//! reports it and [`DisclosurePattern::set_default_state`] repairs it.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use understory_behavior::{Signal, WritableSignal};
use understory_event_state::{
    KeyboardEvent, KeyboardEventManager, PointerEvent, PointerEventManager,
};

use crate::validation::ValidationError;

/// Inputs for [`DisclosurePattern`].
#[derive(Debug)]
pub struct DisclosureInputs {
    /// Id of the trigger.
    pub id: String,
    /// Id of the controlled region.
    pub controls: Option<String>,
    /// Expanded state, shared with the host.
    pub expanded: WritableSignal<bool>,
    /// Ignore every request to change state.
    pub disabled: Signal<bool>,
    /// Never collapse.
    pub always_expanded: Signal<bool>,
}

impl Default for DisclosureInputs {
    fn default() -> Self {
        Self {
            id: String::new(),
            controls: None,
            expanded: WritableSignal::new(false),
            disabled: Signal::new(false),
            always_expanded: Signal::new(false),
        }
    }
}

/// Controller for a disclosure trigger.
#[derive(Debug)]
pub struct DisclosurePattern {
    /// Configuration.
    pub inputs: DisclosureInputs,
}

impl DisclosurePattern {
    /// Create a disclosure controller.
    pub fn new(inputs: DisclosureInputs) -> Self {
        Self { inputs }
    }

    /// Whether the region is shown.
    pub fn expanded(&self) -> bool {
        self.inputs.expanded.get()
    }

    /// Tab index of the trigger.
    pub fn tab_index(&self) -> i32 {
        if self.inputs.disabled.get() { -1 } else { 0 }
    }

    /// Show the region.
    pub fn open(&self) -> bool {
        if self.inputs.disabled.get() || self.expanded() {
            return false;
        }
        tracing::trace!(id = %self.inputs.id, "disclosure opened");
        self.inputs.expanded.set(true);
        true
    }

    /// Hide the region, unless it is always expanded.
    pub fn close(&self) -> bool {
        if self.inputs.disabled.get() || self.inputs.always_expanded.get() || !self.expanded() {
            return false;
        }
        tracing::trace!(id = %self.inputs.id, "disclosure closed");
        self.inputs.expanded.set(false);
        true
    }

    /// Flip between shown and hidden.
    pub fn toggle(&self) -> bool {
        if self.expanded() {
            self.close()
        } else {
            self.open()
        }
    }

    /// Open an always-expanded disclosure that was handed a collapsed state.
    pub fn set_default_state(&self) {
        if self.inputs.always_expanded.get() && !self.expanded() {
            self.inputs.expanded.set(true);
        }
    }

    /// Handle a key press on the trigger.
    pub fn on_keydown(&self, event: &mut KeyboardEvent) -> bool {
        if self.inputs.disabled.get() {
            return false;
        }
        KeyboardEventManager::new()
            .on([" ", "Enter"], |d: &Self, _| {
                d.toggle();
            })
            .handle(self, event)
    }

    /// Handle a pointer press on the trigger.
    pub fn on_pointerdown(&self, event: &mut PointerEvent) -> bool {
        if self.inputs.disabled.get() {
            return false;
        }
        PointerEventManager::new()
            .on(|d: &Self, _| {
                d.toggle();
            })
            .handle(self, event)
    }

    /// Typed inconsistencies in the current state.
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.inputs.always_expanded.get() && !self.expanded() {
            errors.push(ValidationError::AlwaysExpandedButCollapsed {
                id: self.inputs.id.clone(),
            });
        }
        errors
    }

    /// Human-readable inconsistencies in the current state.
    pub fn validate(&self) -> Vec<String> {
        self.validation_errors()
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}
