// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Behavior: headless interaction state for composite widgets.
//!
//! This crate holds the state machines behind listboxes, trees, accordions,
//! and tablists, with no rendering and no event plumbing. Each behavior
//! handles one concern over a host-owned, ordered collection of items:
//!
//! - [`ListFocus`]: which item is active, and the resulting tab stops, in
//!   roving or active-descendant [`FocusMode`].
//! - [`ListNavigation`]: next/prev/first/last moves that skip items which
//!   cannot take focus, with optional wrap, over the whole list or a subset.
//! - [`ListSelection`]: single or multi selection of item values, bulk
//!   operations, and anchor-based range selection.
//! - [`ListTypeahead`]: search-as-you-type with an idle reset delay.
//! - [`Expansion`]: expanded/collapsed state with single or multi mode.
//! - [`LabelControl`]: label text vs. labelling references.
//! - [`Tree`]: all of the above over the visible nodes of a hierarchy, plus
//!   parent/child/sibling moves.
//!
//! ## Items and signals
//!
//! The host owns the items and hands them over as `Rc<T>` inside a
//! [`Signal`]. Items implement the capability traits a behavior needs
//! ([`Item`], [`ListSelectionItem`], [`ListTypeaheadItem`], [`ExpansionItem`],
//! [`TreeItem`]) and are compared by identity. Configuration is a plain
//! `*Inputs` struct of signals with sensible `Default`s, so a host can flip a
//! flag between calls without rebuilding anything.
//!
//! Behaviors that work on the same list share one `Rc<ListFocus<T>>`.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::rc::Rc;
//! use understory_behavior::{
//!     Item, ListFocus, ListFocusInputs, ListNavigation, ListNavigationInputs, ListSelection,
//!     ListSelectionInputs, ListSelectionItem, SelectOptions, Signal, WritableSignal,
//! };
//!
//! struct Fruit(&'static str);
//! impl Item for Fruit {
//!     fn id(&self) -> &str { self.0 }
//!     fn disabled(&self) -> bool { false }
//! }
//! impl ListSelectionItem<&'static str> for Fruit {
//!     fn value(&self) -> &'static str { self.0 }
//! }
//!
//! let fruits: Vec<Rc<Fruit>> = ["apple", "banana", "cherry"].map(|f| Rc::new(Fruit(f))).into();
//! let focus = Rc::new(ListFocus::new(ListFocusInputs {
//!     items: Signal::new(fruits),
//!     ..Default::default()
//! }));
//! let nav = ListNavigation::new(ListNavigationInputs::default(), Rc::clone(&focus));
//! let values: WritableSignal<Vec<&str>> = WritableSignal::new(Vec::new());
//! let selection = ListSelection::new(
//!     ListSelectionInputs { values: values.clone(), multi: Signal::new(false) },
//!     focus,
//! );
//!
//! nav.first();
//! nav.next();
//! selection.select(None, SelectOptions::default());
//! assert_eq!(values.get(), ["banana"]);
//!
//! // Wraps around by default.
//! nav.next();
//! nav.next();
//! selection.select_one();
//! assert_eq!(values.get(), ["apple"]);
//! ```
//!
//! ## Logging
//!
//! State transitions are reported through [`tracing`] at `trace` level, and
//! rejected requests a host may want to debug at `debug` level. No subscriber
//! is installed here.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod element;
mod expansion;
mod item;
mod label;
mod list_focus;
mod list_navigation;
mod list_selection;
mod list_typeahead;
mod signal;
mod tree;

pub use element::{ElementRef, HostElement, TextInputElement};
pub use expansion::{Expansion, ExpansionInputs};
pub use item::{
    ExpansionItem, Item, ListSelectionItem, ListTypeaheadItem, contains_item, position_of,
    same_item,
};
pub use label::{LabelControl, LabelControlInputs};
pub use list_focus::{FocusMode, FocusOptions, ListFocus, ListFocusInputs};
pub use list_navigation::{ListNavigation, ListNavigationInputs};
pub use list_selection::{ListSelection, ListSelectionInputs, SelectOptions};
pub use list_typeahead::{DEFAULT_TYPEAHEAD_DELAY, ListTypeahead, ListTypeaheadInputs};
pub use signal::{Signal, WritableSignal};
pub use tree::{NavOptions, Tree, TreeInputs, TreeItem};
