// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics for inconsistent pattern state.
//!
//! Nothing here is raised during ordinary operation. Hosts call a pattern's
//! `validate` during development and surface the messages however they like.

use alloc::string::String;
use alloc::vec::Vec;

use understory_behavior::{Item, ListFocus, contains_item};

/// A state inconsistency a host can fix but the pattern does not auto-correct.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// An always-expanded disclosure is collapsed.
    #[error("disclosure `{id}` is always expanded but its expanded state is false")]
    AlwaysExpandedButCollapsed {
        /// Id of the disclosure.
        id: String,
    },
    /// The active item is not one of the widget's current items.
    #[error("active item `{id}` is not part of the current items")]
    ActiveItemNotInItems {
        /// Id of the stray active item.
        id: String,
    },
}

/// Report an active item that is missing from the focus items.
pub(crate) fn active_item_errors<T: Item>(focus: &ListFocus<T>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Some(active) = focus.active_item()
        && !contains_item(&focus.items(), &active)
    {
        errors.push(ValidationError::ActiveItemNotInItems {
            id: String::from(active.id()),
        });
    }
    errors
}
