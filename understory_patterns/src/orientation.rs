// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout hints that decide which arrow keys move through a widget, and how
//! moving interacts with selection.

/// Axis along which a widget's items are laid out.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Items stack top to bottom; Up/Down move.
    #[default]
    Vertical,
    /// Items run along a line; Left/Right move.
    Horizontal,
}

/// Inline text direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextDirection {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left; horizontal arrow keys swap meaning.
    Rtl,
}

/// When keyboard navigation changes the selection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// Selection follows focus.
    #[default]
    Follow,
    /// Selection changes only on activation.
    Explicit,
}

/// Key names that move to the previous and next item.
pub(crate) fn prev_next_keys(
    orientation: Orientation,
    direction: TextDirection,
) -> (&'static str, &'static str) {
    match (orientation, direction) {
        (Orientation::Vertical, _) => ("ArrowUp", "ArrowDown"),
        (Orientation::Horizontal, TextDirection::Ltr) => ("ArrowLeft", "ArrowRight"),
        (Orientation::Horizontal, TextDirection::Rtl) => ("ArrowRight", "ArrowLeft"),
    }
}

/// Key names that collapse and expand a tree node (or go to parent and child).
pub(crate) fn collapse_expand_keys(
    orientation: Orientation,
    direction: TextDirection,
) -> (&'static str, &'static str) {
    match (orientation, direction) {
        (Orientation::Horizontal, _) => ("ArrowUp", "ArrowDown"),
        (Orientation::Vertical, TextDirection::Ltr) => ("ArrowLeft", "ArrowRight"),
        (Orientation::Vertical, TextDirection::Rtl) => ("ArrowRight", "ArrowLeft"),
    }
}
