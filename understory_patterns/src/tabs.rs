// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tabs: a tablist whose selected tab decides which panel is shown.
//!
//! Selection is single expansion over the tabs: a tab is selected when it is
//! expanded, and opening one closes the rest. With
//! [`SelectionMode::Follow`] moving between tabs with the keyboard also
//! selects them; with [`SelectionMode::Explicit`] only Space, Enter, or a
//! pointer press does.

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

use crate::orientation::{Orientation, SelectionMode, TextDirection, prev_next_keys};
use crate::util::item_by_id;
use crate::validation::{ValidationError, active_item_errors};

/// Inputs for [`TabPattern`].
#[derive(Debug, Default)]
pub struct TabInputs {
    /// Id of the tab.
    pub id: String,
    /// Id of the panel the tab controls.
    pub panel_id: String,
    /// Whether the host disabled this tab.
    pub disabled: Signal<bool>,
    /// Selected state, shared with the host.
    pub expanded: WritableSignal<bool>,
    /// Tab element.
    pub element: Option<ElementRef>,
    /// Owning tablist.
    pub tablist: Weak<TabListPattern>,
}

/// One tab.
#[derive(Debug)]
pub struct TabPattern {
    /// Configuration.
    pub inputs: TabInputs,
}

impl Item for TabPattern {
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

impl ExpansionItem for TabPattern {
    fn expanded(&self) -> &WritableSignal<bool> {
        &self.inputs.expanded
    }
}

impl TabPattern {
    /// Create a tab.
    pub fn new(inputs: TabInputs) -> Self {
        Self { inputs }
    }

    /// The owning tablist, if it is still alive.
    pub fn tablist(&self) -> Option<Rc<TabListPattern>> {
        self.inputs.tablist.upgrade()
    }

    /// Whether the tab's panel is shown.
    pub fn expanded(&self) -> bool {
        self.inputs.expanded.get()
    }

    /// Whether this is the selected tab.
    pub fn selected(&self) -> bool {
        self.expanded()
    }

    /// Whether this is the tablist's active tab.
    pub fn active(&self) -> bool {
        self.tablist().is_some_and(|l| l.focus.is_active(self))
    }

    /// Tab index of the tab.
    pub fn tab_index(&self) -> i32 {
        self.tablist().map_or(-1, |l| l.focus.item_tab_index(self))
    }

    /// Id of the controlled panel.
    pub fn controls(&self) -> &str {
        &self.inputs.panel_id
    }

    /// Select this tab.
    pub fn open(&self) -> bool {
        self.tablist().is_some_and(|l| l.expansion.open(self))
    }
}

/// A tab panel, shown while its tab is selected.
#[derive(Debug)]
pub struct TabPanelPattern {
    /// Id of the panel.
    pub id: String,
    /// The tab that controls this panel.
    pub tab: Option<Rc<TabPattern>>,
}

impl TabPanelPattern {
    /// Whether the panel is hidden.
    ///
    /// A panel without a tab is never hidden by the tablist.
    pub fn hidden(&self) -> bool {
        self.tab.as_ref().is_some_and(|tab| !tab.expanded())
    }

    /// Tab index of the panel.
    pub fn tab_index(&self) -> i32 {
        if self.hidden() { -1 } else { 0 }
    }

    /// Id of the tab labelling this panel.
    pub fn labelled_by(&self) -> Option<&str> {
        self.tab.as_deref().map(|tab| tab.inputs.id.as_str())
    }
}

/// Inputs for [`TabListPattern`].
#[derive(Debug)]
pub struct TabListInputs {
    /// The tabs, in order.
    pub items: Signal<Vec<Rc<TabPattern>>>,
    /// The active tab, shared with the host.
    pub active_item: WritableSignal<Option<Rc<TabPattern>>>,
    /// Focus mode.
    pub focus_mode: Signal<FocusMode>,
    /// Disable the whole tablist.
    pub disabled: Signal<bool>,
    /// Keep disabled tabs focusable.
    pub soft_disabled: Signal<bool>,
    /// Wrap keyboard navigation.
    pub wrap: Signal<bool>,
    /// Layout axis.
    pub orientation: Signal<Orientation>,
    /// Text direction.
    pub text_direction: Signal<TextDirection>,
    /// When navigation selects.
    pub selection_mode: Signal<SelectionMode>,
    /// Tablist element, focused in active-descendant mode.
    pub element: Signal<Option<ElementRef>>,
}

impl Default for TabListInputs {
    fn default() -> Self {
        Self {
            items: Signal::new(Vec::new()),
            active_item: WritableSignal::new(None),
            focus_mode: Signal::new(FocusMode::Roving),
            disabled: Signal::new(false),
            soft_disabled: Signal::new(false),
            wrap: Signal::new(true),
            orientation: Signal::new(Orientation::Horizontal),
            text_direction: Signal::new(TextDirection::Ltr),
            selection_mode: Signal::new(SelectionMode::Follow),
            element: Signal::new(None),
        }
    }
}

/// Controller for a tablist.
#[derive(Debug)]
pub struct TabListPattern {
    /// Focus over the tabs.
    pub focus: Rc<ListFocus<TabPattern>>,
    /// Navigation over the tabs.
    pub navigation: ListNavigation<TabPattern>,
    /// Single expansion: the selected tab.
    pub expansion: Expansion<TabPattern>,
    orientation: Signal<Orientation>,
    text_direction: Signal<TextDirection>,
    selection_mode: Signal<SelectionMode>,
}

impl TabListPattern {
    /// Create a tablist controller.
    pub fn new(inputs: TabListInputs) -> Self {
        let focus = Rc::new(ListFocus::new(ListFocusInputs {
            focus_mode: inputs.focus_mode,
            disabled: inputs.disabled.clone(),
            items: inputs.items.clone(),
            active_item: inputs.active_item,
            soft_disabled: inputs.soft_disabled,
            element: inputs.element,
        }));
        let navigation = ListNavigation::new(
            ListNavigationInputs { wrap: inputs.wrap },
            Rc::clone(&focus),
        );
        let expansion = Expansion::new(ExpansionInputs {
            multi_expandable: Signal::new(false),
            disabled: inputs.disabled,
            items: inputs.items,
        });
        Self {
            focus,
            navigation,
            expansion,
            orientation: inputs.orientation,
            text_direction: inputs.text_direction,
            selection_mode: inputs.selection_mode,
        }
    }

    /// The active tab.
    pub fn active_item(&self) -> Option<Rc<TabPattern>> {
        self.focus.active_item()
    }

    /// The selected tab.
    pub fn selected_tab(&self) -> Option<Rc<TabPattern>> {
        self.focus.items().into_iter().find(|tab| tab.expanded())
    }

    /// Whether keyboard navigation also selects.
    pub fn follow_focus(&self) -> bool {
        self.selection_mode.get() == SelectionMode::Follow
    }

    /// Select `tab`, or the active tab when `None`.
    pub fn open(&self, tab: Option<&Rc<TabPattern>>) -> bool {
        let Some(tab) = tab.cloned().or_else(|| self.active_item()) else {
            return false;
        };
        let opened = self.expansion.open(&tab);
        if opened {
            tracing::trace!(id = tab.id(), "tab selected");
        }
        opened
    }

    /// Make the first focusable selected tab active, else the first focusable
    /// tab, and select it.
    pub fn set_default_state(&self) {
        let items = self.focus.items();
        let candidate = items
            .iter()
            .find(|tab| tab.expanded() && self.focus.is_focusable(tab))
            .or_else(|| items.iter().find(|tab| self.focus.is_focusable(tab)));
        if let Some(tab) = candidate {
            self.focus.focus(tab, FocusOptions::state_only());
            self.expansion.open(tab);
        }
    }

    /// Handle a key press inside the tablist.
    pub fn on_keydown(&self, event: &mut KeyboardEvent) -> bool {
        if self.focus.is_list_disabled() {
            return false;
        }
        let (prev, next) = prev_next_keys(self.orientation.get(), self.text_direction.get());
        let held = EventOptions::allow_repeat();
        KeyboardEventManager::new()
            .on_with_options(
                Modifiers::empty(),
                prev,
                |l: &Self, _| l.after_move(l.navigation.prev()),
                held,
            )
            .on_with_options(
                Modifiers::empty(),
                next,
                |l: &Self, _| l.after_move(l.navigation.next()),
                held,
            )
            .on_with_options(
                Modifiers::empty(),
                "Home",
                |l: &Self, _| l.after_move(l.navigation.first()),
                held,
            )
            .on_with_options(
                Modifiers::empty(),
                "End",
                |l: &Self, _| l.after_move(l.navigation.last()),
                held,
            )
            .on([" ", "Enter"], |l: &Self, _| {
                l.open(None);
            })
            .handle(self, event)
    }

    /// Handle a pointer press inside the tablist.
    pub fn on_pointerdown(&self, event: &mut PointerEvent) -> bool {
        if self.focus.is_list_disabled() {
            return false;
        }
        PointerEventManager::new()
            .on(|l: &Self, ev| {
                if let Some(tab) = item_by_id(&l.focus.items(), ev.target.as_deref())
                    && l.navigation.goto(&tab)
                {
                    l.open(Some(&tab));
                }
            })
            .handle(self, event)
    }

    /// Sync the active tab when one receives focus from elsewhere.
    pub fn on_focus(&self, event: &FocusEvent) {
        if let Some(tab) = item_by_id(&self.focus.items(), event.target.as_deref()) {
            self.focus.focus(&tab, FocusOptions::state_only());
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

    fn after_move(&self, moved: bool) {
        if moved && self.follow_focus() {
            self.open(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    fn tablist(n: usize, inputs: TabListInputs) -> (Rc<TabListPattern>, Vec<Rc<TabPattern>>) {
        let items = WritableSignal::new(Vec::new());
        let list = Rc::new(TabListPattern::new(TabListInputs {
            items: items.read_only(),
            ..inputs
        }));
        let tabs: Vec<_> = (0..n)
            .map(|i| {
                Rc::new(TabPattern::new(TabInputs {
                    id: format!("tab-{i}"),
                    panel_id: format!("panel-{i}"),
                    tablist: Rc::downgrade(&list),
                    ..Default::default()
                }))
            })
            .collect();
        items.set(tabs.clone());
        (list, tabs)
    }

    fn press(list: &TabListPattern, key: &str) -> bool {
        list.on_keydown(&mut KeyboardEvent::new(key))
    }

    fn selected(tabs: &[Rc<TabPattern>]) -> Vec<usize> {
        (0..tabs.len()).filter(|&i| tabs[i].selected()).collect()
    }

    #[test]
    fn follow_mode_selects_on_navigation() {
        let (list, tabs) = tablist(3, TabListInputs::default());
        list.set_default_state();
        assert_eq!(selected(&tabs), [0]);
        assert!(press(&list, "ArrowRight"));
        assert_eq!(selected(&tabs), [1]);
        press(&list, "End");
        assert_eq!(selected(&tabs), [2]);
        press(&list, "ArrowRight");
        assert_eq!(selected(&tabs), [0]);
    }

    #[test]
    fn held_arrow_keeps_selecting() {
        let (list, tabs) = tablist(3, TabListInputs::default());
        list.set_default_state();
        assert!(list.on_keydown(&mut KeyboardEvent::new("ArrowRight").repeating()));
        assert!(tabs[1].active());
        list.on_keydown(&mut KeyboardEvent::new("ArrowRight").repeating());
        assert_eq!(selected(&tabs), [2]);
        assert!(!list.on_keydown(&mut KeyboardEvent::new("Enter").repeating()));
    }

    #[test]
    fn explicit_mode_selects_on_activation() {
        let (list, tabs) = tablist(
            3,
            TabListInputs {
                selection_mode: Signal::new(SelectionMode::Explicit),
                ..Default::default()
            },
        );
        list.set_default_state();
        press(&list, "ArrowRight");
        assert!(tabs[1].active());
        assert_eq!(selected(&tabs), [0]);
        press(&list, "Enter");
        assert_eq!(selected(&tabs), [1]);
        assert!(Rc::ptr_eq(&list.selected_tab().unwrap(), &tabs[1]));
    }

    #[test]
    fn default_state_prefers_selected_focusable_tab() {
        let (list, tabs) = tablist(3, TabListInputs::default());
        tabs[2].inputs.expanded.set(true);
        list.set_default_state();
        assert!(tabs[2].active());
        assert_eq!(tabs[2].tab_index(), 0);
        assert_eq!(tabs[0].tab_index(), -1);
        assert_eq!(selected(&tabs), [2]);
    }

    #[test]
    fn pointer_selects_and_panels_follow() {
        let (list, tabs) = tablist(2, TabListInputs::default());
        let panels: Vec<TabPanelPattern> = tabs
            .iter()
            .map(|tab| TabPanelPattern {
                id: tab.controls().into(),
                tab: Some(Rc::clone(tab)),
            })
            .collect();
        list.set_default_state();
        assert!(list.on_pointerdown(&mut PointerEvent::on("tab-1")));
        assert!(panels[0].hidden());
        assert!(!panels[1].hidden());
        assert_eq!(panels[1].tab_index(), 0);
        assert_eq!(panels[1].labelled_by(), Some("tab-1"));

        let orphan = TabPanelPattern {
            id: "orphan".into(),
            tab: None,
        };
        assert!(!orphan.hidden());
    }

    #[test]
    fn vertical_tabs_use_up_and_down() {
        let (list, tabs) = tablist(
            2,
            TabListInputs {
                orientation: Signal::new(Orientation::Vertical),
                ..Default::default()
            },
        );
        list.set_default_state();
        assert!(!press(&list, "ArrowRight"));
        assert!(press(&list, "ArrowDown"));
        assert!(tabs[1].selected());
    }

    #[test]
    fn tab_open_goes_through_tablist() {
        let (list, tabs) = tablist(2, TabListInputs::default());
        assert!(tabs[1].open());
        assert!(!tabs[1].open());
        assert!(tabs[0].open());
        assert!(!tabs[1].selected());
        assert!(list.validate().is_empty());
    }
}
