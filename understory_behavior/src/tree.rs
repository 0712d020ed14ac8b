// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree: hierarchy-aware navigation over the list behaviors.
//!
//! The host supplies every node of the tree, flattened in display order
//! (pre-order). Only *visible* nodes, those whose ancestors are all expanded,
//! take part in focus, navigation, selection ranges, and typeahead; the tree
//! feeds its list behaviors a computed view of the visible nodes.
//!
//! On top of the flat moves (`first`, `last`, `next`, `prev`, `goto`) a tree
//! can move to the active node's first or last child, its next or previous
//! sibling, or its parent. Every move accepts [`NavOptions`] describing the
//! selection change that follows a successful move.
//!
//! In single-expansion mode, expanding a node collapses its expanded
//! siblings; nodes in other branches are left alone.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::element::ElementRef;
use crate::expansion::{Expansion, ExpansionInputs};
use crate::item::{ExpansionItem, ListSelectionItem, ListTypeaheadItem, filter_items};
use crate::list_focus::{FocusMode, FocusOptions, ListFocus, ListFocusInputs};
use crate::list_navigation::{ListNavigation, ListNavigationInputs};
use crate::list_selection::{ListSelection, ListSelectionInputs, SelectOptions};
use crate::list_typeahead::{DEFAULT_TYPEAHEAD_DELAY, ListTypeahead, ListTypeaheadInputs};
use crate::signal::{Signal, WritableSignal};

/// A node of a tree.
///
/// Nodes usually keep a strong reference to their children and a weak one to
/// their parent, upgrading it in [`TreeItem::parent`].
pub trait TreeItem<V>: ListSelectionItem<V> + ListTypeaheadItem + ExpansionItem + Sized {
    /// Child nodes, in display order.
    fn children(&self) -> Vec<Rc<Self>>;

    /// Parent node, `None` for a root.
    fn parent(&self) -> Option<Rc<Self>>;

    /// Whether the node is shown: every ancestor is expanded.
    fn visible(&self) -> bool {
        self.parent()
            .is_none_or(|parent| parent.expanded().get() && parent.visible())
    }

    /// Depth of the node, `1` for a root.
    fn level(&self) -> usize {
        self.parent().map_or(1, |parent| parent.level() + 1)
    }
}

/// Inputs for [`Tree`].
#[derive(Debug)]
pub struct TreeInputs<T, V> {
    /// Every node, flattened in display order.
    pub items: Signal<Vec<Rc<T>>>,
    /// Focus mode.
    pub focus_mode: Signal<FocusMode>,
    /// Disables the whole tree.
    pub disabled: Signal<bool>,
    /// The active node, shared with the host.
    pub active_item: WritableSignal<Option<Rc<T>>>,
    /// Keep disabled nodes focusable (but inert).
    pub soft_disabled: Signal<bool>,
    /// The tree container element.
    pub element: Signal<Option<ElementRef>>,
    /// Wrap flat navigation around the ends.
    pub wrap: Signal<bool>,
    /// Selected values, shared with the host.
    pub values: WritableSignal<Vec<V>>,
    /// Allow more than one selected node.
    pub multi: Signal<bool>,
    /// Typeahead idle delay in milliseconds.
    pub typeahead_delay: Signal<u64>,
    /// Allow expanded siblings to coexist.
    pub multi_expandable: Signal<bool>,
}

impl<T, V> Default for TreeInputs<T, V> {
    fn default() -> Self {
        Self {
            items: Signal::new(Vec::new()),
            focus_mode: Signal::new(FocusMode::Roving),
            disabled: Signal::new(false),
            active_item: WritableSignal::new(None),
            soft_disabled: Signal::new(false),
            element: Signal::new(None),
            wrap: Signal::new(true),
            values: WritableSignal::new(Vec::new()),
            multi: Signal::new(false),
            typeahead_delay: Signal::new(DEFAULT_TYPEAHEAD_DELAY),
            multi_expandable: Signal::new(false),
        }
    }
}

/// Selection changes applied after a successful tree move.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NavOptions {
    /// Select the new active node.
    pub select: bool,
    /// Make the new active node the only selection.
    pub select_one: bool,
    /// Toggle the new active node.
    pub toggle: bool,
    /// Toggle the new active node as the only selection.
    pub toggle_one: bool,
    /// Extend the range from the anchor to the new active node.
    pub select_range: bool,
    /// Keep the anchor where it is.
    pub anchor: bool,
}

impl NavOptions {
    /// Extend the selected range to the new active node.
    pub fn range() -> Self {
        Self {
            select_range: true,
            ..Self::default()
        }
    }

    /// Make the new active node the only selection.
    pub fn select_one() -> Self {
        Self {
            select_one: true,
            ..Self::default()
        }
    }
}

/// Tree behavior composed from list focus, navigation, selection, typeahead,
/// and expansion.
#[derive(Debug)]
pub struct Tree<T, V> {
    /// Focus over the visible nodes.
    pub focus: Rc<ListFocus<T>>,
    /// Navigation over the visible nodes.
    pub navigation: ListNavigation<T>,
    /// Selection over the visible nodes.
    pub selection: ListSelection<T, V>,
    /// Typeahead over the visible nodes.
    pub typeahead: ListTypeahead<T>,
    /// Expansion over every node.
    pub expansion: Expansion<T>,
    all_items: Signal<Vec<Rc<T>>>,
    anchor_index: Cell<Option<usize>>,
}

impl<T, V> Tree<T, V>
where
    T: TreeItem<V> + 'static,
    V: PartialEq + Clone,
{
    /// Assemble a tree from `inputs`.
    pub fn new(inputs: TreeInputs<T, V>) -> Self {
        let all_items = inputs.items;
        let visible = {
            let all = all_items.clone();
            Signal::computed(move || filter_items(all.get(), |node: &T| node.visible()))
        };
        let focus = Rc::new(ListFocus::new(ListFocusInputs {
            focus_mode: inputs.focus_mode,
            disabled: inputs.disabled.clone(),
            items: visible,
            active_item: inputs.active_item,
            soft_disabled: inputs.soft_disabled,
            element: inputs.element,
        }));
        let navigation = ListNavigation::new(
            ListNavigationInputs { wrap: inputs.wrap },
            Rc::clone(&focus),
        );
        let selection = ListSelection::new(
            ListSelectionInputs {
                values: inputs.values,
                multi: inputs.multi,
            },
            Rc::clone(&focus),
        );
        let typeahead = ListTypeahead::new(
            ListTypeaheadInputs {
                typeahead_delay: inputs.typeahead_delay,
            },
            Rc::clone(&focus),
        );
        let expansion = Expansion::new(ExpansionInputs {
            multi_expandable: inputs.multi_expandable,
            disabled: inputs.disabled,
            items: all_items.clone(),
        });
        Self {
            focus,
            navigation,
            selection,
            typeahead,
            expansion,
            all_items,
            anchor_index: Cell::new(Some(0)),
        }
    }

    /// Every node, visible or not.
    pub fn all_items(&self) -> Vec<Rc<T>> {
        self.all_items.get()
    }

    /// Nodes currently shown.
    pub fn visible_items(&self) -> Vec<Rc<T>> {
        self.focus.items()
    }

    /// The active node.
    pub fn active_item(&self) -> Option<Rc<T>> {
        self.focus.active_item()
    }

    /// Index of the range anchor among the visible nodes.
    pub fn anchor_index(&self) -> Option<usize> {
        self.anchor_index.get()
    }

    /// Whether `item` can become the active node.
    pub fn is_focusable(&self, item: &T) -> bool {
        item.visible() && self.focus.is_focusable(item)
    }

    /// Siblings of `item` including itself. Roots are siblings of each other.
    pub fn siblings(&self, item: &T) -> Vec<Rc<T>> {
        match item.parent() {
            Some(parent) => parent.children(),
            None => filter_items(self.all_items(), |node: &T| node.parent().is_none()),
        }
    }

    // Navigation

    /// Move to the first visible node.
    pub fn first(&self, opts: NavOptions) -> bool {
        self.navigate(opts, || self.navigation.first())
    }

    /// Move to the last visible node.
    pub fn last(&self, opts: NavOptions) -> bool {
        self.navigate(opts, || self.navigation.last())
    }

    /// Move to the next visible node.
    pub fn next(&self, opts: NavOptions) -> bool {
        self.navigate(opts, || self.navigation.next())
    }

    /// Move to the previous visible node.
    pub fn prev(&self, opts: NavOptions) -> bool {
        self.navigate(opts, || self.navigation.prev())
    }

    /// Move to `item`, if it is visible.
    pub fn goto(&self, item: &Rc<T>, opts: NavOptions) -> bool {
        if !item.visible() {
            return false;
        }
        self.navigate(opts, || self.navigation.goto(item))
    }

    /// Move to the active node's first focusable visible child.
    pub fn first_child(&self, opts: NavOptions) -> bool {
        self.navigate(opts, || {
            let children = self.active_children();
            self.navigation.first_in(&children, FocusOptions::default())
        })
    }

    /// Move to the active node's last focusable visible child.
    pub fn last_child(&self, opts: NavOptions) -> bool {
        self.navigate(opts, || {
            let children = self.active_children();
            self.navigation.last_in(&children, FocusOptions::default())
        })
    }

    /// Move to the active node's next sibling.
    pub fn next_sibling(&self, opts: NavOptions) -> bool {
        self.navigate(opts, || {
            let siblings = self.active_siblings();
            self.navigation.next_in(&siblings, FocusOptions::default())
        })
    }

    /// Move to the active node's previous sibling.
    pub fn prev_sibling(&self, opts: NavOptions) -> bool {
        self.navigate(opts, || {
            let siblings = self.active_siblings();
            self.navigation.prev_in(&siblings, FocusOptions::default())
        })
    }

    /// Move to the active node's parent.
    pub fn parent(&self, opts: NavOptions) -> bool {
        self.navigate(opts, || {
            self.active_item()
                .and_then(|active| active.parent())
                .is_some_and(|parent| self.navigation.goto(&parent))
        })
    }

    // Selection

    /// Select `item`, or the active node.
    pub fn select(&self, item: Option<&Rc<T>>) {
        self.selection.select(item, SelectOptions::default());
    }

    /// Deselect `item`, or the active node.
    pub fn deselect(&self, item: Option<&Rc<T>>) {
        self.selection.deselect(item);
    }

    /// Toggle `item`, or the active node.
    pub fn toggle(&self, item: Option<&Rc<T>>) {
        self.selection.toggle(item);
    }

    /// Toggle the active node as the only selection.
    pub fn toggle_one(&self) {
        self.selection.toggle_one();
    }

    /// Make the active node the only selection.
    pub fn select_one(&self) {
        self.selection.select_one();
    }

    /// Select every visible node.
    pub fn select_all(&self) {
        self.selection.select_all();
    }

    /// Clear the selection.
    pub fn deselect_all(&self) {
        self.selection.deselect_all();
    }

    /// Select all, or clear the selection if everything is selected.
    pub fn toggle_all(&self) {
        self.selection.toggle_all();
    }

    /// Select from the anchor to the active node.
    pub fn select_range(&self) {
        self.selection.select_range(SelectOptions::default());
    }

    /// Pin the range anchor to the visible node at `index`.
    pub fn anchor(&self, index: usize) {
        self.selection.begin_range_selection(Some(index));
        self.anchor_index.set(Some(index));
    }

    // Expansion

    /// Whether `item` may expand or collapse.
    pub fn is_expandable(&self, item: &T) -> bool {
        self.expansion.is_expandable(item)
    }

    /// Expand `item`, or the active node.
    pub fn expand(&self, item: Option<&Rc<T>>) -> bool {
        let Some(item) = self.target(item) else {
            return false;
        };
        if !self.is_focusable(&item) {
            return false;
        }
        self.expansion.open_within(&item, &self.siblings(&item))
    }

    /// Collapse `item`, or the active node.
    ///
    /// If that hides the active node, focus moves to the collapsed node.
    pub fn collapse(&self, item: Option<&Rc<T>>) -> bool {
        let Some(item) = self.target(item) else {
            return false;
        };
        if !self.is_focusable(&item) || !self.expansion.close(&item) {
            return false;
        }
        if self.active_item().is_some_and(|active| !active.visible()) {
            self.focus.focus(&item, FocusOptions::default());
        }
        true
    }

    /// Expand or collapse `item`, or the active node.
    pub fn toggle_expansion(&self, item: Option<&Rc<T>>) -> bool {
        let Some(item) = self.target(item) else {
            return false;
        };
        if !self.is_expandable(&item) || !self.is_focusable(&item) {
            return false;
        }
        if item.expanded().get() {
            self.collapse(Some(&item))
        } else {
            self.expand(Some(&item))
        }
    }

    /// Expand every sibling of `item`, or of the active node.
    ///
    /// Applies in single-expansion mode too: the siblings open together
    /// instead of closing one another.
    pub fn expand_siblings(&self, item: Option<&Rc<T>>) {
        let Some(item) = self.target(item) else {
            return;
        };
        let focusable = self.focus.focusable_filter();
        for sibling in self.siblings(&item) {
            if sibling.visible() && focusable(&sibling) {
                // An empty group closes nothing.
                self.expansion.open_within(&sibling, &[]);
            }
        }
    }

    /// Expand every node. Does nothing in single-expansion mode.
    pub fn expand_all(&self) {
        self.expansion.open_all();
    }

    /// Collapse every node, moving focus to the active node's root.
    pub fn collapse_all(&self) {
        self.expansion.close_all();
        let Some(mut node) = self.active_item() else {
            return;
        };
        if node.visible() {
            return;
        }
        while let Some(parent) = node.parent() {
            node = parent;
            if node.visible() {
                break;
            }
        }
        self.focus.focus(&node, FocusOptions::default());
    }

    // Typeahead

    /// Feed one typed key at time `now` (milliseconds).
    pub fn search(&self, key: &str, now: u64) -> bool {
        self.typeahead.search(key, now)
    }

    /// Whether a typeahead query is in progress at time `now`.
    pub fn is_typing(&self, now: u64) -> bool {
        self.typeahead.is_typing(now)
    }

    fn target(&self, item: Option<&Rc<T>>) -> Option<Rc<T>> {
        item.cloned().or_else(|| self.active_item())
    }

    fn active_children(&self) -> Vec<Rc<T>> {
        self.active_item().map_or_else(Vec::new, |active| {
            filter_items(active.children(), |node: &T| node.visible())
        })
    }

    fn active_siblings(&self) -> Vec<Rc<T>> {
        self.active_item().map_or_else(Vec::new, |active| {
            filter_items(self.siblings(&active), |node: &T| node.visible())
        })
    }

    /// Run a move, then apply the selection change `opts` asks for.
    ///
    /// Range moves never wrap and always extend from the anchor.
    fn navigate(&self, opts: NavOptions, op: impl FnOnce() -> bool) -> bool {
        if opts.select_range {
            self.navigation.suspend_wrap(true);
            self.selection.set_range_start_index(self.anchor_index.get());
        }
        let moved = op();
        if moved {
            self.update_selection(opts);
        }
        self.navigation.suspend_wrap(false);
        moved
    }

    fn update_selection(&self, opts: NavOptions) {
        if opts.select {
            self.selection.select(None, SelectOptions::default());
        }
        if opts.toggle {
            self.selection.toggle(None);
        }
        if opts.toggle_one {
            self.selection.toggle_one();
        }
        if opts.select_one {
            self.selection.select_one();
        }
        if opts.select_range {
            self.selection.select_range(SelectOptions::default());
        }
        if !opts.anchor {
            self.anchor_index.set(self.selection.range_start_index());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use alloc::rc::Weak;
    use alloc::string::String;
    use alloc::vec;
    use core::cell::RefCell;

    #[derive(Debug)]
    struct Node {
        label: String,
        value: usize,
        disabled: WritableSignal<bool>,
        expanded: WritableSignal<bool>,
        children: RefCell<Vec<Rc<Node>>>,
        parent: RefCell<Weak<Node>>,
    }

    impl Item for Node {
        fn id(&self) -> &str {
            &self.label
        }
        fn disabled(&self) -> bool {
            self.disabled.get()
        }
    }

    impl ListSelectionItem<usize> for Node {
        fn value(&self) -> usize {
            self.value
        }
    }

    impl ListTypeaheadItem for Node {
        fn search_term(&self) -> &str {
            &self.label
        }
    }

    impl ExpansionItem for Node {
        fn expanded(&self) -> &WritableSignal<bool> {
            &self.expanded
        }
        fn expandable(&self) -> bool {
            !self.children.borrow().is_empty()
        }
    }

    impl TreeItem<usize> for Node {
        fn children(&self) -> Vec<Rc<Self>> {
            self.children.borrow().clone()
        }
        fn parent(&self) -> Option<Rc<Self>> {
            self.parent.borrow().upgrade()
        }
    }

    /// Nine nodes in display order; `(label, parent index)`.
    const SHAPE: [(&str, Option<usize>); 9] = [
        ("Fruits", None),
        ("Apple", Some(0)),
        ("Banana", Some(0)),
        ("Vegetables", None),
        ("Greens", Some(3)),
        ("Kale", Some(4)),
        ("Carrot", Some(3)),
        ("Grains", None),
        ("Nuts", None),
    ];

    fn build_nodes() -> Vec<Rc<Node>> {
        let nodes: Vec<Rc<Node>> = SHAPE
            .iter()
            .enumerate()
            .map(|(value, (label, _))| {
                Rc::new(Node {
                    label: String::from(*label),
                    value,
                    disabled: WritableSignal::new(false),
                    expanded: WritableSignal::new(false),
                    children: RefCell::new(Vec::new()),
                    parent: RefCell::new(Weak::new()),
                })
            })
            .collect();
        for (index, (_, parent)) in SHAPE.iter().enumerate() {
            if let Some(parent) = parent {
                *nodes[index].parent.borrow_mut() = Rc::downgrade(&nodes[*parent]);
                nodes[*parent].children.borrow_mut().push(Rc::clone(&nodes[index]));
            }
        }
        nodes
    }

    fn tree(nodes: &[Rc<Node>], multi: bool, multi_expandable: bool) -> Tree<Node, usize> {
        Tree::new(TreeInputs {
            items: Signal::new(nodes.to_vec()),
            multi: Signal::new(multi),
            multi_expandable: Signal::new(multi_expandable),
            ..Default::default()
        })
    }

    fn active(tree: &Tree<Node, usize>) -> Option<usize> {
        tree.active_item().map(|n| n.value)
    }

    fn selected(tree: &Tree<Node, usize>) -> Vec<usize> {
        let mut values = tree.selection.inputs.values.get();
        values.sort_unstable();
        values
    }

    #[test]
    fn child_and_parent_moves() {
        let nodes = build_nodes();
        let tree = tree(&nodes, false, false);
        assert!(tree.expand(Some(&nodes[0])));
        assert!(tree.goto(&nodes[0], NavOptions::default()));
        assert!(tree.first_child(NavOptions::default()));
        assert_eq!(active(&tree), Some(1));
        tree.goto(&nodes[0], NavOptions::default());
        assert!(tree.last_child(NavOptions::default()));
        assert_eq!(active(&tree), Some(2));
        tree.goto(&nodes[1], NavOptions::default());
        assert!(tree.parent(NavOptions::default()));
        assert_eq!(active(&tree), Some(0));
        assert!(!tree.parent(NavOptions::default()));
    }

    #[test]
    fn collapsed_children_are_skipped() {
        let nodes = build_nodes();
        let tree = tree(&nodes, false, false);
        assert_eq!(tree.visible_items().len(), 4);
        tree.first(NavOptions::default());
        assert!(!tree.first_child(NavOptions::default()));
        assert!(tree.next(NavOptions::default()));
        assert_eq!(active(&tree), Some(3));
        assert!(!tree.goto(&nodes[5], NavOptions::default()));
        assert_eq!(nodes[5].level(), 3);
    }

    #[test]
    fn sibling_moves_stay_in_the_sibling_set() {
        let nodes = build_nodes();
        let tree = tree(&nodes, false, true);
        tree.expand(Some(&nodes[3]));
        tree.goto(&nodes[4], NavOptions::default());
        assert!(tree.next_sibling(NavOptions::default()));
        assert_eq!(active(&tree), Some(6));
        assert!(tree.prev_sibling(NavOptions::default()));
        assert_eq!(active(&tree), Some(4));

        tree.goto(&nodes[3], NavOptions::default());
        assert!(tree.next_sibling(NavOptions::default()));
        assert_eq!(active(&tree), Some(7));
    }

    #[test]
    fn range_selection_skips_disabled_node() {
        let nodes = build_nodes();
        let tree = tree(&nodes, true, true);
        tree.expand_all();
        assert_eq!(tree.visible_items().len(), 9);
        nodes[1].disabled.set(true);

        tree.goto(&nodes[0], NavOptions::default());
        tree.anchor(0);
        assert!(tree.goto(&nodes[3], NavOptions::range()));
        assert_eq!(tree.selection.inputs.values.get(), vec![0, 2, 3]);
    }

    #[test]
    fn range_moves_do_not_wrap() {
        let nodes = build_nodes();
        let tree = tree(&nodes, true, false);
        tree.last(NavOptions::default());
        tree.anchor(3);
        assert!(!tree.next(NavOptions::range()));
        assert!(tree.navigation.wraps());
        assert!(tree.prev(NavOptions::range()));
        assert_eq!(selected(&tree), vec![7, 8]);
        assert!(tree.next(NavOptions::default()));
        assert_eq!(active(&tree), Some(8));
        assert!(tree.next(NavOptions::default()));
        assert_eq!(active(&tree), Some(0));
    }

    #[test]
    fn select_one_follows_focus() {
        let nodes = build_nodes();
        let tree = tree(&nodes, false, false);
        tree.first(NavOptions::select_one());
        tree.next(NavOptions::select_one());
        assert_eq!(selected(&tree), vec![3]);
    }

    #[test]
    fn single_expansion_is_scoped_to_siblings() {
        let nodes = build_nodes();
        let tree = tree(&nodes, false, false);
        tree.expand(Some(&nodes[0]));
        tree.expand(Some(&nodes[3]));
        assert!(!nodes[0].expanded.get());
        assert!(tree.expand(Some(&nodes[4])));
        assert!(nodes[3].expanded.get());
        assert!(nodes[4].expanded.get());
        // Leaves cannot expand.
        assert!(!tree.toggle_expansion(Some(&nodes[8])));
    }

    #[test]
    fn collapse_moves_focus_out_of_hidden_branch() {
        let nodes = build_nodes();
        let tree = tree(&nodes, false, true);
        tree.expand(Some(&nodes[3]));
        tree.expand(Some(&nodes[4]));
        tree.goto(&nodes[5], NavOptions::default());
        assert!(tree.collapse(Some(&nodes[3])));
        assert_eq!(active(&tree), Some(3));

        tree.expand(Some(&nodes[3]));
        tree.goto(&nodes[5], NavOptions::default());
        tree.collapse_all();
        assert_eq!(active(&tree), Some(3));
        assert_eq!(tree.visible_items().len(), 4);
    }

    #[test]
    fn expand_siblings_treats_roots_as_siblings() {
        let nodes = build_nodes();
        let tree = tree(&nodes, false, true);
        tree.goto(&nodes[0], NavOptions::default());
        tree.expand_siblings(None);
        assert!(nodes[0].expanded.get());
        assert!(nodes[3].expanded.get());
        assert!(!nodes[4].expanded.get());
    }

    #[test]
    fn expand_siblings_opens_all_in_single_mode() {
        let nodes = build_nodes();
        let tree = tree(&nodes, false, false);
        tree.goto(&nodes[0], NavOptions::default());
        tree.expand_siblings(None);
        assert!(nodes[0].expanded.get());
        assert!(nodes[3].expanded.get());
        assert_eq!(tree.visible_items().len(), 8);

        // A nested sibling set opens without touching the roots.
        tree.expand_siblings(Some(&nodes[4]));
        assert!(nodes[4].expanded.get());
        assert!(nodes[0].expanded.get());
        assert_eq!(tree.visible_items().len(), 9);
    }

    #[test]
    fn typeahead_only_sees_visible_nodes() {
        let nodes = build_nodes();
        let tree = tree(&nodes, false, false);
        assert!(tree.search("k", 0));
        assert_eq!(active(&tree), None);
        tree.expand(Some(&nodes[3]));
        tree.expand(Some(&nodes[4]));
        assert!(tree.search("k", 1000));
        assert_eq!(active(&tree), Some(5));
        assert!(tree.is_typing(1100));
    }
}
