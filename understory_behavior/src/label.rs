// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label control: resolve the effective label text and labelling references.

use alloc::string::String;
use alloc::vec::Vec;

use crate::signal::Signal;

/// Inputs for [`LabelControl`].
#[derive(Clone, Debug, Default)]
pub struct LabelControlInputs {
    /// References used when nothing more specific is provided.
    pub default_labelled_by: Signal<Vec<String>>,
    /// Explicit label text.
    pub label: Option<Signal<Option<String>>>,
    /// Explicit labelling references.
    pub labelled_by: Option<Signal<Vec<String>>>,
}

/// Resolves label text vs. labelling references.
///
/// Precedence: explicit non-empty `labelled_by`, then explicit label text
/// (which suppresses references entirely), then `default_labelled_by`.
#[derive(Clone, Debug, Default)]
pub struct LabelControl {
    /// Configuration.
    pub inputs: LabelControlInputs,
}

impl LabelControl {
    /// Create a label control.
    pub fn new(inputs: LabelControlInputs) -> Self {
        Self { inputs }
    }

    /// Explicit label text, if any.
    pub fn label(&self) -> Option<String> {
        self.inputs.label.as_ref().and_then(Signal::get)
    }

    /// Effective labelling references.
    pub fn labelled_by(&self) -> Vec<String> {
        if let Some(explicit) = self.inputs.labelled_by.as_ref().map(Signal::get)
            && !explicit.is_empty()
        {
            return explicit;
        }
        if self.label().is_some() {
            return Vec::new();
        }
        self.inputs.default_labelled_by.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| String::from(*s)).collect()
    }

    #[test]
    fn default_references_when_nothing_explicit() {
        let control = LabelControl::new(LabelControlInputs {
            default_labelled_by: Signal::new(ids(&["heading"])),
            ..Default::default()
        });
        assert_eq!(control.labelled_by(), ids(&["heading"]));
        assert_eq!(control.label(), None);
    }

    #[test]
    fn label_text_suppresses_default_references() {
        let control = LabelControl::new(LabelControlInputs {
            default_labelled_by: Signal::new(ids(&["heading"])),
            label: Some(Signal::new(Some(String::from("Fruits")))),
            labelled_by: None,
        });
        assert!(control.labelled_by().is_empty());
        assert_eq!(control.label().as_deref(), Some("Fruits"));
    }

    #[test]
    fn explicit_references_win() {
        let control = LabelControl::new(LabelControlInputs {
            default_labelled_by: Signal::new(ids(&["heading"])),
            label: Some(Signal::new(Some(String::from("Fruits")))),
            labelled_by: Some(Signal::new(vec![String::from("caption")])),
        });
        assert_eq!(control.labelled_by(), ids(&["caption"]));
    }

    #[test]
    fn empty_explicit_references_fall_through() {
        let control = LabelControl::new(LabelControlInputs {
            default_labelled_by: Signal::new(ids(&["heading"])),
            label: None,
            labelled_by: Some(Signal::new(Vec::new())),
        });
        assert_eq!(control.labelled_by(), ids(&["heading"]));
    }
}
