// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! List focus: which item owns focus, and what every tab stop should be.
//!
//! ## Modes
//!
//! - [`FocusMode::Roving`]: the container is never a tab stop. The active item
//!   has tab index `0`, every other item `-1`, and real input focus moves from
//!   item to item.
//! - [`FocusMode::ActiveDescendant`]: the container is the single tab stop and
//!   keeps input focus; items always report `-1` and the container publishes
//!   the active item's id via [`ListFocus::active_descendant`].
//!
//! ## Focusability
//!
//! An item is focusable when the list is not disabled and the item is either
//! enabled or the list is *soft-disabled* (disabled items stay reachable but
//! inert). A list whose items are all disabled counts as disabled.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::element::ElementRef;
use crate::item::{Item, position_of, same_item};
use crate::signal::{Signal, WritableSignal};

/// How a composite widget exposes focus.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FocusMode {
    /// Items are tab stops and receive real focus.
    #[default]
    Roving,
    /// The container keeps focus and points at the active item.
    ActiveDescendant,
}

/// Options for a focus change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FocusOptions {
    /// Ask the host to move real input focus as well as updating state.
    pub focus_element: bool,
}

impl Default for FocusOptions {
    fn default() -> Self {
        Self {
            focus_element: true,
        }
    }
}

impl FocusOptions {
    /// Update focus state without moving real input focus.
    pub fn state_only() -> Self {
        Self {
            focus_element: false,
        }
    }
}

/// Inputs for [`ListFocus`].
#[derive(Debug)]
pub struct ListFocusInputs<T> {
    /// Focus mode.
    pub focus_mode: Signal<FocusMode>,
    /// Disables focus for the whole list.
    pub disabled: Signal<bool>,
    /// The live, ordered item collection.
    pub items: Signal<Vec<Rc<T>>>,
    /// The active item, shared with the host.
    pub active_item: WritableSignal<Option<Rc<T>>>,
    /// Keep disabled items focusable (but inert).
    pub soft_disabled: Signal<bool>,
    /// The container element, focused in active-descendant mode.
    pub element: Signal<Option<ElementRef>>,
}

impl<T> Default for ListFocusInputs<T> {
    fn default() -> Self {
        Self {
            focus_mode: Signal::new(FocusMode::Roving),
            disabled: Signal::new(false),
            items: Signal::new(Vec::new()),
            active_item: WritableSignal::new(None),
            soft_disabled: Signal::new(false),
            element: Signal::new(None),
        }
    }
}

/// Tracks the focused item of a list and derives tab stops.
#[derive(Debug)]
pub struct ListFocus<T> {
    /// Configuration.
    pub inputs: ListFocusInputs<T>,
    prev_active_item: WritableSignal<Option<Rc<T>>>,
}

impl<T: Item> ListFocus<T> {
    /// Create a focus manager over `inputs`.
    pub fn new(inputs: ListFocusInputs<T>) -> Self {
        Self {
            inputs,
            prev_active_item: WritableSignal::new(None),
        }
    }

    /// Current items.
    pub fn items(&self) -> Vec<Rc<T>> {
        self.inputs.items.get()
    }

    /// The active item, if any.
    pub fn active_item(&self) -> Option<Rc<T>> {
        self.inputs.active_item.get()
    }

    /// Position of the active item in the current items.
    pub fn active_index(&self) -> Option<usize> {
        let active = self.active_item()?;
        position_of(&self.items(), &active)
    }

    /// The item that was active before the most recent focus change.
    pub fn prev_active_item(&self) -> Option<Rc<T>> {
        self.prev_active_item.get()
    }

    /// Position of [`Self::prev_active_item`] in the current items.
    pub fn prev_active_index(&self) -> Option<usize> {
        let prev = self.prev_active_item()?;
        position_of(&self.items(), &prev)
    }

    /// Whether the item is the active one.
    pub fn is_active(&self, item: &T) -> bool {
        self.inputs
            .active_item
            .with(|active| active.as_deref().is_some_and(|a| same_item(a, item)))
    }

    /// Whether the whole list is disabled, explicitly or because every item is.
    pub fn is_list_disabled(&self) -> bool {
        self.inputs.disabled.get() || self.items().iter().all(|i| i.disabled())
    }

    /// Id published as the container's active descendant.
    ///
    /// Always `None` in roving mode and for a disabled list.
    pub fn active_descendant(&self) -> Option<String> {
        if self.is_list_disabled() || self.inputs.focus_mode.get() == FocusMode::Roving {
            return None;
        }
        self.active_item().map(|item| String::from(item.id()))
    }

    /// Tab index of the list container.
    pub fn list_tab_index(&self) -> i32 {
        if self.is_list_disabled() {
            return 0;
        }
        match self.inputs.focus_mode.get() {
            FocusMode::ActiveDescendant => 0,
            FocusMode::Roving => -1,
        }
    }

    /// Tab index of `item`.
    pub fn item_tab_index(&self, item: &T) -> i32 {
        if self.is_list_disabled() || self.inputs.focus_mode.get() == FocusMode::ActiveDescendant
        {
            return -1;
        }
        if self.is_active(item) { 0 } else { -1 }
    }

    /// Whether `item` can become the active item.
    pub fn is_focusable(&self, item: &T) -> bool {
        self.focusable_filter()(item)
    }

    /// [`Self::is_focusable`] with the list-level state read up front.
    ///
    /// Scans over many items should build one filter and reuse it, since
    /// deciding whether the list is disabled reads every item.
    pub fn focusable_filter(&self) -> impl Fn(&T) -> bool {
        let list_disabled = self.is_list_disabled();
        let soft_disabled = self.inputs.soft_disabled.get();
        move |item: &T| !list_disabled && (!item.disabled() || soft_disabled)
    }

    /// Make `item` the active item.
    ///
    /// Returns `false` without changing anything if the item is not focusable.
    pub fn focus(&self, item: &Rc<T>, opts: FocusOptions) -> bool {
        if !self.is_focusable(item) {
            tracing::debug!(id = item.id(), "focus rejected: item is not focusable");
            return false;
        }

        let previous = self.inputs.active_item.replace(Some(Rc::clone(item)));
        self.prev_active_item.set(previous);
        tracing::trace!(id = item.id(), "active item changed");

        if opts.focus_element {
            match self.inputs.focus_mode.get() {
                FocusMode::Roving => {
                    if let Some(element) = item.element() {
                        element.focus();
                    }
                }
                FocusMode::ActiveDescendant => {
                    if let Some(element) = self.inputs.element.get() {
                        element.focus();
                    }
                }
            }
        }
        true
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::element::HostElement;
    use alloc::format;
    use core::cell::Cell;

    /// Test item used across the behavior tests.
    #[derive(Debug)]
    pub(crate) struct TestItem {
        pub(crate) id: String,
        pub(crate) disabled: WritableSignal<bool>,
        pub(crate) element: Option<ElementRef>,
    }

    impl Item for TestItem {
        fn id(&self) -> &str {
            &self.id
        }
        fn disabled(&self) -> bool {
            self.disabled.get()
        }
        fn element(&self) -> Option<ElementRef> {
            self.element.clone()
        }
    }

    pub(crate) fn items(n: usize) -> Vec<Rc<TestItem>> {
        (0..n)
            .map(|i| {
                Rc::new(TestItem {
                    id: format!("item-{i}"),
                    disabled: WritableSignal::new(false),
                    element: None,
                })
            })
            .collect()
    }

    pub(crate) fn focus_over(items: &[Rc<TestItem>]) -> ListFocus<TestItem> {
        ListFocus::new(ListFocusInputs {
            items: Signal::new(items.to_vec()),
            ..Default::default()
        })
    }

    struct CountingElement(Rc<Cell<u32>>);

    impl HostElement for CountingElement {
        fn focus(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn roving_tab_indices_follow_active_item() {
        let items = items(3);
        let focus = focus_over(&items);
        assert_eq!(focus.list_tab_index(), -1);
        assert!(focus.focus(&items[1], FocusOptions::default()));
        assert_eq!(focus.item_tab_index(&items[0]), -1);
        assert_eq!(focus.item_tab_index(&items[1]), 0);
        assert_eq!(focus.active_descendant(), None);
        assert_eq!(focus.active_index(), Some(1));
    }

    #[test]
    fn active_descendant_mode_publishes_id() {
        let items = items(3);
        let focus = ListFocus::new(ListFocusInputs {
            focus_mode: Signal::new(FocusMode::ActiveDescendant),
            items: Signal::new(items.clone()),
            ..Default::default()
        });
        assert_eq!(focus.active_descendant(), None);
        assert_eq!(focus.list_tab_index(), 0);
        focus.focus(&items[2], FocusOptions::default());
        assert_eq!(focus.active_descendant().as_deref(), Some("item-2"));
        assert_eq!(focus.item_tab_index(&items[2]), -1);
    }

    #[test]
    fn disabled_items_are_not_focusable_unless_soft_disabled() {
        let items = items(2);
        items[1].disabled.set(true);
        let soft = WritableSignal::new(false);
        let focus = ListFocus::new(ListFocusInputs {
            items: Signal::new(items.clone()),
            soft_disabled: soft.read_only(),
            ..Default::default()
        });

        assert!(!focus.focus(&items[1], FocusOptions::default()));
        assert_eq!(focus.active_item().map(|i| i.id.clone()), None);

        soft.set(true);
        assert!(focus.focus(&items[1], FocusOptions::default()));
        assert_eq!(focus.active_index(), Some(1));
    }

    #[test]
    fn list_with_only_disabled_items_is_disabled() {
        let items = items(2);
        for item in &items {
            item.disabled.set(true);
        }
        let focus = focus_over(&items);
        assert!(focus.is_list_disabled());
        assert_eq!(focus.list_tab_index(), 0);
        assert_eq!(focus.item_tab_index(&items[0]), -1);
    }

    #[test]
    fn focus_tracks_previous_item() {
        let items = items(3);
        let focus = focus_over(&items);
        assert_eq!(focus.prev_active_index(), None);
        focus.focus(&items[0], FocusOptions::default());
        focus.focus(&items[2], FocusOptions::default());
        assert_eq!(focus.prev_active_index(), Some(0));
        assert_eq!(focus.active_index(), Some(2));
    }

    #[test]
    fn focus_moves_real_focus_per_mode() {
        let item_hits = Rc::new(Cell::new(0));
        let container_hits = Rc::new(Cell::new(0));
        let item = Rc::new(TestItem {
            id: String::from("only"),
            disabled: WritableSignal::new(false),
            element: Some(ElementRef::new(CountingElement(Rc::clone(&item_hits)))),
        });
        let mode = WritableSignal::new(FocusMode::Roving);
        let focus = ListFocus::new(ListFocusInputs {
            focus_mode: mode.read_only(),
            items: Signal::new(alloc::vec![Rc::clone(&item)]),
            element: Signal::new(Some(ElementRef::new(CountingElement(Rc::clone(
                &container_hits,
            ))))),
            ..Default::default()
        });

        focus.focus(&item, FocusOptions::default());
        assert_eq!((item_hits.get(), container_hits.get()), (1, 0));

        focus.focus(&item, FocusOptions::state_only());
        assert_eq!((item_hits.get(), container_hits.get()), (1, 0));

        mode.set(FocusMode::ActiveDescendant);
        focus.focus(&item, FocusOptions::default());
        assert_eq!((item_hits.get(), container_hits.get()), (1, 1));
    }
}
