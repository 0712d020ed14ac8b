// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Event State: input event tables for headless widget behaviors.
//!
//! This crate provides the small event-handling layer that interaction
//! patterns sit on:
//!
//! - **Events** ([`KeyboardEvent`], [`PointerEvent`], [`FocusEvent`], [`InputEvent`]):
//!   owned snapshots of what the host received, carrying key names, [`Modifiers`],
//!   target identity, timestamps, and default-prevented / propagation-stopped flags.
//! - **Keyboard bindings** ([`KeyboardEventManager`]): an ordered table of
//!   `(modifiers, key, handler, options)` entries. A key matcher is an exact key
//!   name, a set of candidate names (for bidi-aware arrow keys), or any printable
//!   single character (for typeahead).
//! - **Pointer bindings** ([`PointerEventManager`]): the same idea for pointer
//!   presses, keyed by button and modifiers.
//!
//! Handlers receive a context value (usually the pattern that built the table)
//! and the event. After a handler runs, the binding's [`EventOptions`] decide
//! whether the event is marked default-prevented and propagation-stopped, so
//! hosts can forward those decisions to the platform.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::cell::Cell;
//! use understory_event_state::{KeyMatcher, KeyboardEvent, KeyboardEventManager};
//!
//! let manager = KeyboardEventManager::new()
//!     .on("Home", |pos: &Cell<usize>, _| pos.set(0))
//!     .on(KeyMatcher::Printable, |pos: &Cell<usize>, ev| pos.set(ev.key.len()));
//!
//! let position = Cell::new(5);
//! let mut home = KeyboardEvent::new("Home");
//! assert!(manager.handle(&position, &mut home));
//! assert_eq!(position.get(), 0);
//!
//! // Named keys are not printable characters.
//! assert!(!manager.handle(&position, &mut KeyboardEvent::new("Shift")));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod event;
mod keyboard;
mod pointer;

pub use event::{FocusEvent, InputEvent, KeyboardEvent, Modifiers, PointerButton, PointerEvent};
pub use keyboard::{EventOptions, KeyMatcher, KeyboardEventManager, ModifierMatch, is_printable_char};
pub use pointer::PointerEventManager;
