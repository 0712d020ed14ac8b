// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accordion: a group of triggers, each showing or hiding one panel.
//!
//! The group owns roving focus over its triggers, arrow-key navigation, and
//! expansion. In single mode opening one trigger collapses the others.
//!
//! ## Keys
//!
//! | Key | Action |
//! |-----|--------|
//! | Up / Down (vertical), Left / Right (horizontal, swapped in RTL) | previous / next trigger |
//! | Home / End | first / last trigger |
//! | Space / Enter | toggle the active trigger |
//!
//! A pointer press on a trigger makes it active and toggles it.
//!
//! Triggers keep a weak reference to their group, so build the group first,
//! then the triggers, then publish the triggers through the group's `items`
//! signal.

use alloc::rc::{Rc, Weak};
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use understory_behavior::{
    ElementRef, Expansion, ExpansionInputs, ExpansionItem, FocusMode, FocusOptions, Item,
    ListFocus, ListFocusInputs, ListNavigation, ListNavigationInputs, Signal, WritableSignal,
};
use understory_event_state::{
    EventOptions, FocusEvent, KeyboardEvent, KeyboardEventManager, Modifiers, PointerEvent,
    PointerEventManager,
};

use crate::orientation::{Orientation, TextDirection, prev_next_keys};
use crate::util::item_by_id;
use crate::validation::{ValidationError, active_item_errors};

/// Inputs for [`AccordionTriggerPattern`].
#[derive(Debug, Default)]
pub struct AccordionTriggerInputs {
    /// Id of the trigger.
    pub id: String,
    /// Id of the panel the trigger controls.
    pub panel_id: String,
    /// Whether the host disabled this trigger.
    pub disabled: Signal<bool>,
    /// Expanded state, shared with the host.
    pub expanded: WritableSignal<bool>,
    /// Trigger element.
    pub element: Option<ElementRef>,
    /// Owning group.
    pub group: Weak<AccordionGroupPattern>,
}

/// One accordion trigger.
#[derive(Debug)]
pub struct AccordionTriggerPattern {
    /// Configuration.
    pub inputs: AccordionTriggerInputs,
}

impl Item for AccordionTriggerPattern {
    fn id(&self) -> &str {
        &self.inputs.id
    }

    fn disabled(&self) -> bool {
        self.inputs.disabled.get()
    }

    fn element(&self) -> Option<ElementRef> {
        self.inputs.element.clone()
    }
}

impl ExpansionItem for AccordionTriggerPattern {
    fn expanded(&self) -> &WritableSignal<bool> {
        &self.inputs.expanded
    }
}

impl AccordionTriggerPattern {
    /// Create a trigger.
    pub fn new(inputs: AccordionTriggerInputs) -> Self {
        Self { inputs }
    }

    /// The owning group, if it is still alive.
    pub fn group(&self) -> Option<Rc<AccordionGroupPattern>> {
        self.inputs.group.upgrade()
    }

    /// Whether the panel is shown.
    pub fn expanded(&self) -> bool {
        self.inputs.expanded.get()
    }

    /// Whether this is the group's active trigger.
    pub fn active(&self) -> bool {
        self.group().is_some_and(|g| g.focus.is_active(self))
    }

    /// Tab index of the trigger.
    pub fn tab_index(&self) -> i32 {
        self.group().map_or(-1, |g| g.focus.item_tab_index(self))
    }

    /// Disabled and not kept reachable by soft-disable.
    pub fn hard_disabled(&self) -> bool {
        self.disabled() && !self.group().is_some_and(|g| g.focus.inputs.soft_disabled.get())
    }

    /// Id of the controlled panel.
    pub fn controls(&self) -> &str {
        &self.inputs.panel_id
    }

    /// Expand this trigger through its group.
    pub fn expand(&self) -> bool {
        self.group().is_some_and(|g| g.expansion.open(self))
    }

    /// Collapse this trigger through its group.
    pub fn collapse(&self) -> bool {
        self.group().is_some_and(|g| g.expansion.close(self))
    }

    /// Toggle this trigger through its group.
    pub fn toggle(&self) -> bool {
        self.group().is_some_and(|g| g.expansion.toggle(self))
    }
}

/// An accordion panel, shown while its trigger is expanded.
#[derive(Debug)]
pub struct AccordionPanelPattern {
    /// Id of the panel.
    pub id: String,
    /// The trigger that controls this panel.
    pub trigger: Option<Rc<AccordionTriggerPattern>>,
}

impl AccordionPanelPattern {
    /// Whether the panel is hidden.
    pub fn hidden(&self) -> bool {
        !self.trigger.as_ref().is_some_and(|t| t.expanded())
    }
}

/// Inputs for [`AccordionGroupPattern`].
#[derive(Debug)]
pub struct AccordionGroupInputs {
    /// The triggers, in order.
    pub items: Signal<Vec<Rc<AccordionTriggerPattern>>>,
    /// The active trigger, shared with the host.
    pub active_item: WritableSignal<Option<Rc<AccordionTriggerPattern>>>,
    /// Disable the whole accordion.
    pub disabled: Signal<bool>,
    /// Keep disabled triggers focusable.
    pub soft_disabled: Signal<bool>,
    /// Allow several open panels.
    pub multi_expandable: Signal<bool>,
    /// Wrap keyboard navigation.
    pub wrap: Signal<bool>,
    /// Layout axis.
    pub orientation: Signal<Orientation>,
    /// Text direction.
    pub text_direction: Signal<TextDirection>,
}

impl Default for AccordionGroupInputs {
    fn default() -> Self {
        Self {
            items: Signal::new(Vec::new()),
            active_item: WritableSignal::new(None),
            disabled: Signal::new(false),
            soft_disabled: Signal::new(false),
            multi_expandable: Signal::new(false),
            wrap: Signal::new(true),
            orientation: Signal::new(Orientation::Vertical),
            text_direction: Signal::new(TextDirection::Ltr),
        }
    }
}

/// Controller for an accordion group.
#[derive(Debug)]
pub struct AccordionGroupPattern {
    /// Roving focus over the triggers.
    pub focus: Rc<ListFocus<AccordionTriggerPattern>>,
    /// Navigation over the triggers.
    pub navigation: ListNavigation<AccordionTriggerPattern>,
    /// Expansion of the triggers.
    pub expansion: Expansion<AccordionTriggerPattern>,
    orientation: Signal<Orientation>,
    text_direction: Signal<TextDirection>,
}

impl AccordionGroupPattern {
    /// Create a group controller.
    pub fn new(inputs: AccordionGroupInputs) -> Self {
        let focus = Rc::new(ListFocus::new(ListFocusInputs {
            focus_mode: Signal::new(FocusMode::Roving),
            disabled: inputs.disabled.clone(),
            items: inputs.items.clone(),
            active_item: inputs.active_item,
            soft_disabled: inputs.soft_disabled,
            element: Signal::new(None),
        }));
        let navigation = ListNavigation::new(
            ListNavigationInputs { wrap: inputs.wrap },
            Rc::clone(&focus),
        );
        let expansion = Expansion::new(ExpansionInputs {
            multi_expandable: inputs.multi_expandable,
            disabled: inputs.disabled,
            items: inputs.items,
        });
        Self {
            focus,
            navigation,
            expansion,
            orientation: inputs.orientation,
            text_direction: inputs.text_direction,
        }
    }

    /// The active trigger.
    pub fn active_item(&self) -> Option<Rc<AccordionTriggerPattern>> {
        self.focus.active_item()
    }

    /// Make the first expanded focusable trigger active, else the first
    /// focusable trigger.
    pub fn set_default_state(&self) {
        let items = self.focus.items();
        let candidate = items
            .iter()
            .find(|t| t.expanded() && self.focus.is_focusable(t))
            .or_else(|| items.iter().find(|t| self.focus.is_focusable(t)));
        if let Some(trigger) = candidate {
            self.focus.focus(trigger, FocusOptions::state_only());
        }
    }

    /// Handle a key press inside the group.
    pub fn on_keydown(&self, event: &mut KeyboardEvent) -> bool {
        if self.focus.is_list_disabled() {
            return false;
        }
        let (prev, next) = prev_next_keys(self.orientation.get(), self.text_direction.get());
        // Held navigation keys keep moving; activation keys fire once.
        let held = EventOptions::allow_repeat();
        KeyboardEventManager::new()
            .on_with_options(
                Modifiers::empty(),
                prev,
                |g: &Self, _| {
                    g.navigation.prev();
                },
                held,
            )
            .on_with_options(
                Modifiers::empty(),
                next,
                |g: &Self, _| {
                    g.navigation.next();
                },
                held,
            )
            .on_with_options(
                Modifiers::empty(),
                ["Home", "End"],
                |g: &Self, ev| {
                    if ev.key == "Home" {
                        g.navigation.first();
                    } else {
                        g.navigation.last();
                    }
                },
                held,
            )
            .on([" ", "Enter"], |g: &Self, _| {
                if let Some(active) = g.active_item() {
                    g.expansion.toggle(&active);
                }
            })
            .handle(self, event)
    }

    /// Handle a pointer press inside the group.
    pub fn on_pointerdown(&self, event: &mut PointerEvent) -> bool {
        if self.focus.is_list_disabled() {
            return false;
        }
        PointerEventManager::new()
            .on(|g: &Self, ev| {
                let Some(trigger) = item_by_id(&g.focus.items(), ev.target.as_deref()) else {
                    return;
                };
                if g.navigation.goto(&trigger) {
                    g.expansion.toggle(&trigger);
                }
            })
            .handle(self, event)
    }

    /// Sync the active trigger when one receives focus from elsewhere.
    pub fn on_focus(&self, event: &FocusEvent) {
        if let Some(trigger) = item_by_id(&self.focus.items(), event.target.as_deref()) {
            self.focus.focus(&trigger, FocusOptions::state_only());
        }
    }

    /// Typed inconsistencies in the current state.
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        active_item_errors(&self.focus)
    }

    /// Human-readable inconsistencies in the current state.
    pub fn validate(&self) -> Vec<String> {
        self.validation_errors()
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}
