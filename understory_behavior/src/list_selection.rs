// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! List selection: a set of selected values with single and multi modes,
//! bulk operations, and anchor-based range selection.
//!
//! Values are unique: selecting an item whose value is already present does
//! nothing. Range operations work in the index order of the focus items and
//! select everything between the range start (the anchor) and the active item,
//! in either direction.
//!
//! ## Stale values
//!
//! [`ListSelection::deselect_all`] drops every value that has no backing item
//! in the current items, even though the removed item's disabled flag can no
//! longer be consulted. Values of items that are present keep honoring the
//! disabled and selectable gates.

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::item::{ListSelectionItem, position_of};
use crate::list_focus::ListFocus;
use crate::signal::{Signal, WritableSignal};

/// Inputs for [`ListSelection`].
#[derive(Debug)]
pub struct ListSelectionInputs<V> {
    /// Selected values, shared with the host.
    pub values: WritableSignal<Vec<V>>,
    /// Allow more than one selected value.
    pub multi: Signal<bool>,
}

impl<V> Default for ListSelectionInputs<V> {
    fn default() -> Self {
        Self {
            values: WritableSignal::new(Vec::new()),
            multi: Signal::new(false),
        }
    }
}

/// Options for [`ListSelection::select`] and [`ListSelection::select_range`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SelectOptions {
    /// Start a new range at the selected item.
    pub anchor: bool,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self { anchor: true }
    }
}

/// Selection state over the items of a shared [`ListFocus`].
#[derive(Debug)]
pub struct ListSelection<T, V> {
    /// Configuration.
    pub inputs: ListSelectionInputs<V>,
    focus: Rc<ListFocus<T>>,
    range_start: WritableSignal<Option<usize>>,
    range_end: WritableSignal<Option<usize>>,
}

impl<T, V> ListSelection<T, V>
where
    T: ListSelectionItem<V>,
    V: PartialEq + Clone,
{
    /// Create a selection behavior over the items of `focus`.
    pub fn new(inputs: ListSelectionInputs<V>, focus: Rc<ListFocus<T>>) -> Self {
        Self {
            inputs,
            focus,
            range_start: WritableSignal::new(Some(0)),
            range_end: WritableSignal::new(Some(0)),
        }
    }

    /// Start index of the current range, the anchor.
    pub fn range_start_index(&self) -> Option<usize> {
        self.range_start.get()
    }

    /// End index of the current range.
    pub fn range_end_index(&self) -> Option<usize> {
        self.range_end.get()
    }

    /// Move the range start without touching the range end.
    pub fn set_range_start_index(&self, index: Option<usize>) {
        self.range_start.set(index);
    }

    /// Whether the item's value is selected.
    pub fn is_selected(&self, item: &T) -> bool {
        let value = item.value();
        self.inputs.values.with(|values| values.contains(&value))
    }

    /// Items whose value is selected, in item order.
    pub fn selected_items(&self) -> Vec<Rc<T>> {
        self.focus
            .items()
            .into_iter()
            .filter(|i| self.is_selected(i))
            .collect()
    }

    /// Select `item`, or the active item when `None`.
    pub fn select(&self, item: Option<&Rc<T>>, opts: SelectOptions) {
        let Some(item) = self.target(item) else {
            return;
        };
        if item.disabled()
            || !item.selectable()
            || !self.focus.is_focusable(&item)
            || self.is_selected(&item)
        {
            return;
        }
        if !self.inputs.multi.get() {
            self.deselect_all();
        }
        if opts.anchor {
            self.begin_range_selection(position_of(&self.focus.items(), &item));
        }
        tracing::trace!(id = item.id(), "selected");
        let value = item.value();
        self.inputs.values.update(|values| values.push(value));
    }

    /// Deselect `item`, or the active item when `None`.
    pub fn deselect(&self, item: Option<&Rc<T>>) {
        let Some(item) = self.target(item) else {
            return;
        };
        if item.disabled() || !item.selectable() {
            return;
        }
        let value = item.value();
        tracing::trace!(id = item.id(), "deselected");
        self.inputs.values.update(|values| values.retain(|v| *v != value));
    }

    /// Flip the selection of `item`, or of the active item when `None`.
    pub fn toggle(&self, item: Option<&Rc<T>>) {
        let Some(item) = self.target(item) else {
            return;
        };
        if self.is_selected(&item) {
            self.deselect(Some(&item));
        } else {
            self.select(Some(&item), SelectOptions::default());
        }
    }

    /// Flip the active item: deselect it, or make it the only selection.
    pub fn toggle_one(&self) {
        let Some(item) = self.focus.active_item() else {
            return;
        };
        if self.is_selected(&item) {
            self.deselect(Some(&item));
        } else {
            self.select_one();
        }
    }

    /// Make the active item the only selected item.
    pub fn select_one(&self) {
        let Some(item) = self.focus.active_item() else {
            return;
        };
        if item.disabled() || !item.selectable() {
            return;
        }
        self.deselect_all();
        // A disabled item may have kept its selection.
        if !self.inputs.values.with(Vec::is_empty) && !self.inputs.multi.get() {
            return;
        }
        self.select(Some(&item), SelectOptions::default());
    }

    /// Select every selectable item. Does nothing in single mode.
    pub fn select_all(&self) {
        if !self.inputs.multi.get() {
            return;
        }
        for item in self.focus.items() {
            self.select(Some(&item), SelectOptions { anchor: false });
        }
        self.begin_range_selection(self.focus.active_index());
    }

    /// Deselect everything, purging values whose item is gone.
    pub fn deselect_all(&self) {
        let items = self.focus.items();
        for value in self.inputs.values.get() {
            match items.iter().find(|i| i.value() == value) {
                Some(item) => self.deselect(Some(item)),
                None => self.inputs.values.update(|values| values.retain(|v| *v != value)),
            }
        }
    }

    /// Select all if any selectable item is unselected, otherwise deselect all.
    pub fn toggle_all(&self) {
        let focusable = self.focus.focusable_filter();
        let all_selected = self
            .focus
            .items()
            .iter()
            .filter(|i| !i.disabled() && i.selectable() && focusable(i))
            .all(|i| self.is_selected(i));
        if all_selected {
            self.deselect_all();
        } else {
            self.select_all();
        }
    }

    /// Select the items between the range start and the active item.
    ///
    /// Items that were in the previous range but fall outside the new one are
    /// deselected, so the result depends only on the anchor and the active
    /// item, not on the path taken.
    pub fn select_range(&self, opts: SelectOptions) {
        let prev_active = self.focus.prev_active_index();
        let is_start_of_range = prev_active == self.range_start_index();
        if is_start_of_range && opts.anchor {
            self.begin_range_selection(prev_active);
        }

        let in_range = self.items_from(self.range_start_index());
        let out_of_range: Vec<Rc<T>> = self
            .items_from(self.range_end_index())
            .into_iter()
            .filter(|i| !in_range.iter().any(|r| Rc::ptr_eq(r, i)))
            .collect();

        for item in &out_of_range {
            self.deselect(Some(item));
        }
        for item in &in_range {
            self.select(Some(item), SelectOptions { anchor: false });
        }
        if let Some(last) = in_range.last() {
            self.range_end
                .set(position_of(&self.focus.items(), last));
        }
    }

    /// Start a new range at `index`. Both ends move there.
    pub fn begin_range_selection(&self, index: Option<usize>) {
        self.range_start.set(index);
        self.range_end.set(index);
    }

    fn target(&self, item: Option<&Rc<T>>) -> Option<Rc<T>> {
        match item {
            Some(item) => Some(Rc::clone(item)),
            None => self.focus.active_item(),
        }
    }

    /// Items between `index` and the active item, ending at the active item.
    fn items_from(&self, index: Option<usize>) -> Vec<Rc<T>> {
        let (Some(index), Some(active)) = (index, self.focus.active_index()) else {
            return Vec::new();
        };
        let items = self.focus.items();
        let lower = index.min(active);
        let upper = index.max(active).min(items.len().saturating_sub(1));
        let mut range: Vec<Rc<T>> = items.get(lower..=upper).unwrap_or_default().to_vec();
        if active < index {
            range.reverse();
        }
        range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::list_focus::{FocusOptions, ListFocusInputs};
    use crate::list_navigation::{ListNavigation, ListNavigationInputs};
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;

    #[derive(Debug)]
    struct Choice {
        id: String,
        value: usize,
        disabled: WritableSignal<bool>,
    }

    impl Item for Choice {
        fn id(&self) -> &str {
            &self.id
        }
        fn disabled(&self) -> bool {
            self.disabled.get()
        }
    }

    impl ListSelectionItem<usize> for Choice {
        fn value(&self) -> usize {
            self.value
        }
    }

    struct Fixture {
        items: Vec<Rc<Choice>>,
        items_signal: WritableSignal<Vec<Rc<Choice>>>,
        nav: ListNavigation<Choice>,
        selection: ListSelection<Choice, usize>,
    }

    fn fixture(n: usize, multi: bool) -> Fixture {
        let items: Vec<Rc<Choice>> = (0..n)
            .map(|value| {
                Rc::new(Choice {
                    id: format!("opt-{value}"),
                    value,
                    disabled: WritableSignal::new(false),
                })
            })
            .collect();
        let items_signal = WritableSignal::new(items.clone());
        let focus = Rc::new(ListFocus::new(ListFocusInputs {
            items: items_signal.read_only(),
            ..Default::default()
        }));
        let nav = ListNavigation::new(
            ListNavigationInputs {
                wrap: Signal::new(false),
            },
            Rc::clone(&focus),
        );
        let selection = ListSelection::new(
            ListSelectionInputs {
                values: WritableSignal::new(Vec::new()),
                multi: Signal::new(multi),
            },
            focus,
        );
        Fixture {
            items,
            items_signal,
            nav,
            selection,
        }
    }

    fn values(f: &Fixture) -> Vec<usize> {
        let mut values = f.selection.inputs.values.get();
        values.sort_unstable();
        values
    }

    #[test]
    fn single_mode_replaces_selection() {
        let f = fixture(3, false);
        f.selection.select(Some(&f.items[0]), SelectOptions::default());
        f.selection.select(Some(&f.items[2]), SelectOptions::default());
        assert_eq!(values(&f), vec![2]);
    }

    #[test]
    fn select_is_idempotent_and_skips_disabled() {
        let f = fixture(3, true);
        f.items[1].disabled.set(true);
        f.selection.select(Some(&f.items[0]), SelectOptions::default());
        f.selection.select(Some(&f.items[0]), SelectOptions::default());
        f.selection.select(Some(&f.items[1]), SelectOptions::default());
        assert_eq!(values(&f), vec![0]);
    }

    #[test]
    fn toggle_flips_active_item() {
        let f = fixture(3, true);
        f.nav.goto(&f.items[1]);
        f.selection.toggle(None);
        assert!(f.selection.is_selected(&f.items[1]));
        f.selection.toggle(None);
        assert!(values(&f).is_empty());
    }

    #[test]
    fn toggle_one_clears_others() {
        let f = fixture(3, true);
        f.selection.select(Some(&f.items[0]), SelectOptions::default());
        f.nav.goto(&f.items[2]);
        f.selection.toggle_one();
        assert_eq!(values(&f), vec![2]);
        f.selection.toggle_one();
        assert!(values(&f).is_empty());
    }

    #[test]
    fn select_all_only_in_multi_mode() {
        let single = fixture(3, false);
        single.selection.select_all();
        assert!(values(&single).is_empty());

        let multi = fixture(3, true);
        multi.items[2].disabled.set(true);
        multi.selection.select_all();
        assert_eq!(values(&multi), vec![0, 1]);
        multi.selection.toggle_all();
        assert!(values(&multi).is_empty());
        multi.selection.toggle_all();
        assert_eq!(values(&multi), vec![0, 1]);
    }

    #[test]
    fn deselect_all_keeps_disabled_but_purges_removed() {
        let f = fixture(4, true);
        f.selection.inputs.values.set(vec![0, 1, 3]);
        f.items[1].disabled.set(true);
        f.items_signal.set(f.items[..3].to_vec());
        f.selection.deselect_all();
        assert_eq!(values(&f), vec![1]);
    }

    #[test]
    fn select_one_blocked_by_disabled_selection_in_single_mode() {
        let f = fixture(3, false);
        f.selection.inputs.values.set(vec![0]);
        f.items[0].disabled.set(true);
        f.nav.goto(&f.items[2]);
        f.selection.select_one();
        assert_eq!(values(&f), vec![0]);
    }

    #[test]
    fn single_mode_never_exceeds_one_value() {
        let f = fixture(4, false);
        let ops: [fn(&Fixture, usize); 5] = [
            |f, i| f.selection.select(Some(&f.items[i]), SelectOptions::default()),
            |f, i| f.selection.toggle(Some(&f.items[i])),
            |f, i| {
                f.nav.goto(&f.items[i]);
                f.selection.select_one();
            },
            |f, i| {
                f.nav.goto(&f.items[i]);
                f.selection.toggle_one();
            },
            |f, _| f.selection.toggle_all(),
        ];
        for round in 0..40 {
            let op = ops[round % ops.len()];
            op(&f, (round * 7) % 4);
            assert!(f.selection.inputs.values.with(Vec::len) <= 1);
        }
    }

    fn range_after(f: &Fixture, path: &[usize]) -> Vec<usize> {
        f.nav.goto(&f.items[0]);
        f.selection.begin_range_selection(Some(0));
        for &target in path {
            f.nav.goto_with(&f.items[target], FocusOptions::state_only());
            f.selection.select_range(SelectOptions { anchor: false });
        }
        values(f)
    }

    #[test]
    fn range_selection_is_path_independent() {
        let forward_back = fixture(6, true);
        let back_forward = fixture(6, true);
        let a = range_after(&forward_back, &[1, 2, 3, 4, 3]);
        let b = range_after(&back_forward, &[1, 2, 3]);
        assert_eq!(a, vec![0, 1, 2, 3]);
        assert_eq!(a, b);
    }

    #[test]
    fn range_selection_works_backwards_from_anchor() {
        let f = fixture(6, true);
        f.nav.goto(&f.items[4]);
        f.selection.begin_range_selection(Some(4));
        f.nav.goto(&f.items[1]);
        f.selection.select_range(SelectOptions { anchor: false });
        assert_eq!(values(&f), vec![1, 2, 3, 4]);
        assert_eq!(f.selection.range_end_index(), Some(1));
        f.nav.goto(&f.items[5]);
        f.selection.select_range(SelectOptions { anchor: false });
        assert_eq!(values(&f), vec![4, 5]);
    }

    #[test]
    fn range_selection_skips_disabled_items() {
        let f = fixture(9, true);
        f.items[1].disabled.set(true);
        f.nav.goto(&f.items[0]);
        f.selection.begin_range_selection(Some(0));
        f.nav.goto(&f.items[3]);
        f.selection.select_range(SelectOptions::default());
        assert_eq!(f.selection.inputs.values.get(), vec![0, 2, 3]);
    }
}
