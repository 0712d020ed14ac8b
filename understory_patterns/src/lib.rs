// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Patterns: headless widget controllers.
//!
//! Each pattern composes [`understory_behavior`] state machines and maps input
//! events onto them with [`understory_event_state`] binding tables:
//!
//! - [`AccordionGroupPattern`], [`AccordionTriggerPattern`], [`AccordionPanelPattern`]
//! - [`TabListPattern`], [`TabPattern`], [`TabPanelPattern`]
//! - [`DisclosurePattern`]
//! - [`SimpleComboboxPattern`] with [`SimpleComboboxPopupPattern`]
//! - [`TreePattern`]
//!
//! A pattern never renders and never touches the platform. The host forwards
//! events to `on_keydown`, `on_pointerdown`, and friends, reads the resulting
//! state (expanded, selected, active, tab index) back out of signals, and
//! honors the `default_prevented` and `propagation_stopped` flags set on the
//! event.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::rc::Rc;
//! use understory_behavior::WritableSignal;
//! use understory_event_state::KeyboardEvent;
//! use understory_patterns::{
//!     AccordionGroupInputs, AccordionGroupPattern, AccordionTriggerInputs,
//!     AccordionTriggerPattern,
//! };
//!
//! let items = WritableSignal::new(Vec::new());
//! let group = Rc::new(AccordionGroupPattern::new(AccordionGroupInputs {
//!     items: items.read_only(),
//!     ..Default::default()
//! }));
//! let triggers: Vec<_> = ["shipping", "returns"]
//!     .map(|id| {
//!         Rc::new(AccordionTriggerPattern::new(AccordionTriggerInputs {
//!             id: id.into(),
//!             panel_id: format!("{id}-panel"),
//!             group: Rc::downgrade(&group),
//!             ..Default::default()
//!         }))
//!     })
//!     .into();
//! items.set(triggers.clone());
//! group.set_default_state();
//!
//! group.on_keydown(&mut KeyboardEvent::new("ArrowDown"));
//! group.on_keydown(&mut KeyboardEvent::new("Enter"));
//! assert!(triggers[1].expanded());
//! assert!(!triggers[0].expanded());
//! ```
//!
//! ## Diagnostics
//!
//! Patterns do not auto-correct inconsistent host state. `validate` lists what
//! is wrong as [`ValidationError`]s rendered to strings, and
//! `set_default_state` puts a freshly built widget into a sensible initial
//! state.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod accordion;
mod combobox;
mod disclosure;
mod orientation;
mod tabs;
mod tree;
mod util;
mod validation;

pub use accordion::{
    AccordionGroupInputs, AccordionGroupPattern, AccordionPanelPattern, AccordionTriggerInputs,
    AccordionTriggerPattern,
};
pub use combobox::{
    AutocompleteMode, PopupType, SimpleComboboxInputs, SimpleComboboxPattern,
    SimpleComboboxPopupInputs, SimpleComboboxPopupPattern,
};
pub use disclosure::{DisclosureInputs, DisclosurePattern};
pub use orientation::{Orientation, SelectionMode, TextDirection};
pub use tabs::{TabInputs, TabListInputs, TabListPattern, TabPanelPattern, TabPattern};
pub use tree::{TreePattern, TreePatternInputs};
pub use validation::ValidationError;
