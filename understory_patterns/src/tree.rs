// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree view: the keyboard and pointer contract of a tree widget over the
//! [`Tree`] behavior.
//!
//! In a vertical left-to-right tree, Up and Down move through the visible
//! nodes. Right expands a collapsed node or moves into an expanded one. Left
//! collapses an expanded node or moves to the parent. Home and End jump to the
//! ends, `*` expands the active node and its siblings, and typed characters
//! search by label.
//!
//! Selection depends on [`SelectionMode`] and on whether the tree is multi
//! select:
//!
//! | Input | single | multi |
//! |-------|--------|-------|
//! | arrows (follow) | select the new node | select only the new node |
//! | Ctrl+arrows (follow) | | move without selecting |
//! | Shift+arrows | | extend the range |
//! | Space / Enter | select the active node | toggle the active node |
//! | Shift+Space | | select from the anchor |
//! | Ctrl+A | | select all, or clear |
//! | click | select | toggle (explicit) or select only (follow) |
//! | Shift+click / Ctrl+click | | range / toggle |
//!
//! A click on an expandable node also expands or collapses it.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use understory_behavior::{FocusOptions, NavOptions, Signal, Tree, TreeInputs, TreeItem};
use understory_event_state::{
    EventOptions, FocusEvent, KeyMatcher, KeyboardEvent, KeyboardEventManager, Modifiers, PointerEvent,
    PointerEventManager,
};

use crate::orientation::{
    Orientation, SelectionMode, TextDirection, collapse_expand_keys, prev_next_keys,
};
use crate::util::item_by_id;
use crate::validation::{ValidationError, active_item_errors};

/// Inputs for [`TreePattern`].
#[derive(Debug)]
pub struct TreePatternInputs<T, V> {
    /// Inputs of the underlying tree behavior.
    pub tree: TreeInputs<T, V>,
    /// Layout axis.
    pub orientation: Signal<Orientation>,
    /// Text direction.
    pub text_direction: Signal<TextDirection>,
    /// When navigation selects.
    pub selection_mode: Signal<SelectionMode>,
}

impl<T, V> Default for TreePatternInputs<T, V> {
    fn default() -> Self {
        Self {
            tree: TreeInputs::default(),
            orientation: Signal::new(Orientation::Vertical),
            text_direction: Signal::new(TextDirection::Ltr),
            selection_mode: Signal::new(SelectionMode::Explicit),
        }
    }
}

/// Controller for a tree view.
#[derive(Debug)]
pub struct TreePattern<T, V> {
    /// The tree behavior.
    pub tree: Tree<T, V>,
    orientation: Signal<Orientation>,
    text_direction: Signal<TextDirection>,
    selection_mode: Signal<SelectionMode>,
}

impl<T, V> TreePattern<T, V>
where
    T: TreeItem<V> + 'static,
    V: PartialEq + Clone + 'static,
{
    /// Create a tree controller.
    pub fn new(inputs: TreePatternInputs<T, V>) -> Self {
        Self {
            tree: Tree::new(inputs.tree),
            orientation: inputs.orientation,
            text_direction: inputs.text_direction,
            selection_mode: inputs.selection_mode,
        }
    }

    /// Whether several nodes can be selected.
    pub fn multi(&self) -> bool {
        self.tree.selection.inputs.multi.get()
    }

    /// Whether keyboard navigation also selects.
    pub fn follow_focus(&self) -> bool {
        self.selection_mode.get() == SelectionMode::Follow
    }

    /// Make the first selected visible node active, else the first focusable
    /// visible node.
    pub fn set_default_state(&self) {
        let items = self.tree.visible_items();
        let candidate = items
            .iter()
            .find(|node| self.tree.selection.is_selected(node) && self.tree.is_focusable(node))
            .or_else(|| items.iter().find(|node| self.tree.is_focusable(node)));
        if let Some(node) = candidate {
            self.tree.focus.focus(node, FocusOptions::state_only());
        }
    }

    /// Handle a key press inside the tree.
    pub fn on_keydown(&self, event: &mut KeyboardEvent) -> bool {
        if self.tree.focus.is_list_disabled() {
            return false;
        }
        let multi = self.multi();
        let follow = self.follow_focus();
        let typing = self.tree.is_typing(event.timestamp);
        let moved = self.move_options();
        let range = NavOptions::range();
        let (prev, next) = prev_next_keys(self.orientation.get(), self.text_direction.get());
        let (collapse, expand) =
            collapse_expand_keys(self.orientation.get(), self.text_direction.get());

        // Held arrows, Home, and End keep moving; activation keys fire once.
        let held = EventOptions::allow_repeat();
        let none = Modifiers::empty();
        KeyboardEventManager::new()
            .on_with_options(
                none,
                prev,
                move |t: &Self, _| {
                    t.tree.prev(moved);
                },
                held,
            )
            .on_with_options(
                none,
                next,
                move |t: &Self, _| {
                    t.tree.next(moved);
                },
                held,
            )
            .on_with_options(
                none,
                "Home",
                move |t: &Self, _| {
                    t.tree.first(moved);
                },
                held,
            )
            .on_with_options(
                none,
                "End",
                move |t: &Self, _| {
                    t.tree.last(moved);
                },
                held,
            )
            .on_with_options(
                none,
                expand,
                move |t: &Self, _| {
                    if !t.tree.expand(None) {
                        t.tree.first_child(moved);
                    }
                },
                held,
            )
            .on_with_options(
                none,
                collapse,
                move |t: &Self, _| {
                    if !t.tree.collapse(None) {
                        t.tree.parent(moved);
                    }
                },
                held,
            )
            .on_with([Modifiers::empty(), Modifiers::SHIFT], "*", |t: &Self, _| {
                t.tree.expand_siblings(None);
            })
            .on_if_with_options(
                multi && follow,
                Modifiers::CTRL,
                prev,
                |t: &Self, _| {
                    t.tree.prev(NavOptions::default());
                },
                held,
            )
            .on_if_with_options(
                multi && follow,
                Modifiers::CTRL,
                next,
                |t: &Self, _| {
                    t.tree.next(NavOptions::default());
                },
                held,
            )
            .on_if_with_options(
                multi,
                Modifiers::SHIFT,
                prev,
                move |t: &Self, _| {
                    t.tree.prev(range);
                },
                held,
            )
            .on_if_with_options(
                multi,
                Modifiers::SHIFT,
                next,
                move |t: &Self, _| {
                    t.tree.next(range);
                },
                held,
            )
            .on_if_with_options(
                multi,
                Modifiers::CTRL | Modifiers::SHIFT,
                ["Home", "End"],
                move |t: &Self, ev| {
                    if ev.key == "Home" {
                        t.tree.first(range);
                    } else {
                        t.tree.last(range);
                    }
                },
                held,
            )
            .on_if(
                multi,
                [Modifiers::CTRL, Modifiers::META],
                ["a", "A"],
                |t: &Self, _| t.tree.toggle_all(),
            )
            .on_if(multi, Modifiers::SHIFT, " ", |t: &Self, _| {
                t.tree.select_range();
            })
            .on_with(
                [Modifiers::empty(), Modifiers::SHIFT],
                KeyMatcher::Printable,
                |t: &Self, ev| t.search(&ev.key, ev.timestamp),
            )
            .on_if(!typing, Modifiers::empty(), " ", |t: &Self, _| t.activate())
            .on("Enter", |t: &Self, _| t.activate())
            .handle(self, event)
    }

    /// Handle a pointer press inside the tree.
    pub fn on_pointerdown(&self, event: &mut PointerEvent) -> bool {
        if self.tree.focus.is_list_disabled() {
            return false;
        }
        let multi = self.multi();
        let plain = if multi && !self.follow_focus() {
            NavOptions {
                toggle: true,
                ..NavOptions::default()
            }
        } else {
            NavOptions::select_one()
        };
        PointerEventManager::new()
            .on(move |t: &Self, ev| t.click(ev, plain))
            .on_with(Modifiers::SHIFT, move |t: &Self, ev| {
                let opts = if multi {
                    NavOptions::range()
                } else {
                    NavOptions::select_one()
                };
                t.click(ev, opts);
            })
            .on_with(Modifiers::CTRL, move |t: &Self, ev| {
                let opts = if multi {
                    NavOptions {
                        toggle: true,
                        ..NavOptions::default()
                    }
                } else {
                    NavOptions::select_one()
                };
                t.click(ev, opts);
            })
            .handle(self, event)
    }

    /// Sync the active node when one receives focus from elsewhere.
    pub fn on_focus(&self, event: &FocusEvent) {
        if let Some(node) = item_by_id(&self.tree.visible_items(), event.target.as_deref()) {
            self.tree.focus.focus(&node, FocusOptions::state_only());
        }
    }

    /// Typed inconsistencies in the current state.
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        active_item_errors(&self.tree.focus)
    }

    /// Human-readable inconsistencies in the current state.
    pub fn validate(&self) -> Vec<String> {
        self.validation_errors()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn move_options(&self) -> NavOptions {
        if self.follow_focus() {
            NavOptions::select_one()
        } else {
            NavOptions::default()
        }
    }

    fn activate(&self) {
        if self.multi() {
            self.tree.toggle(None);
        } else {
            self.tree.select_one();
        }
    }

    fn search(&self, key: &str, now: u64) {
        let before = self.tree.active_item();
        if !self.tree.search(key, now) || !self.follow_focus() {
            return;
        }
        let after = self.tree.active_item();
        let changed = match (&before, &after) {
            (Some(b), Some(a)) => !Rc::ptr_eq(b, a),
            (None, None) => false,
            _ => true,
        };
        if changed {
            self.tree.select_one();
        }
    }

    fn click(&self, event: &PointerEvent, opts: NavOptions) {
        let Some(node) = item_by_id(&self.tree.visible_items(), event.target.as_deref()) else {
            return;
        };
        if self.tree.goto(&node, opts) && self.tree.is_expandable(&node) {
            self.tree.toggle_expansion(Some(&node));
        }
    }
}
