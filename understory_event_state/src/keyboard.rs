// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard event manager: an ordered table of key bindings.
//!
//! Bindings are tested in registration order. Every binding whose modifier
//! and key matchers accept the event runs; each one applies its own
//! [`EventOptions`] to the event afterwards.
//!
//! ```
//! use understory_event_state::{KeyboardEvent, KeyboardEventManager, Modifiers};
//! use core::cell::Cell;
//!
//! struct Counter(Cell<i32>);
//!
//! let manager = KeyboardEventManager::new()
//!     .on("ArrowDown", |c: &Counter, _| c.0.set(c.0.get() + 1))
//!     .on("ArrowUp", |c: &Counter, _| c.0.set(c.0.get() - 1))
//!     .on_with(Modifiers::SHIFT, "ArrowDown", |c: &Counter, _| c.0.set(c.0.get() + 10));
//!
//! let counter = Counter(Cell::new(0));
//! let mut down = KeyboardEvent::new("ArrowDown");
//! assert!(manager.handle(&counter, &mut down));
//! assert!(down.default_prevented);
//! assert_eq!(counter.0.get(), 1);
//!
//! let mut shift_down = KeyboardEvent::new("ArrowDown").with_modifiers(Modifiers::SHIFT);
//! manager.handle(&counter, &mut shift_down);
//! assert_eq!(counter.0.get(), 11);
//! ```

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use smallvec::SmallVec;

use crate::event::{KeyboardEvent, Modifiers};

/// Per-binding policy applied after a handler runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EventOptions {
    /// Skip auto-repeat events.
    pub ignore_repeat: bool,
    /// Mark the event as default-prevented once handled.
    pub prevent_default: bool,
    /// Mark the event as propagation-stopped once handled.
    pub stop_propagation: bool,
}

impl Default for EventOptions {
    fn default() -> Self {
        Self {
            ignore_repeat: true,
            prevent_default: true,
            stop_propagation: true,
        }
    }
}

impl EventOptions {
    /// Options that let auto-repeat events through (for example arrow keys held down).
    pub fn allow_repeat() -> Self {
        Self {
            ignore_repeat: false,
            ..Self::default()
        }
    }

    /// Options that handle the event without touching its default action or propagation.
    pub fn passive() -> Self {
        Self {
            ignore_repeat: true,
            prevent_default: false,
            stop_propagation: false,
        }
    }
}

/// Which modifier states a binding accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModifierMatch {
    /// Exactly this set of modifiers, no more and no fewer.
    Exact(Modifiers),
    /// Exactly one of the listed sets (for example `Ctrl` or `Meta` for "select all").
    OneOf(SmallVec<[Modifiers; 2]>),
    /// Any modifier state.
    Any,
}

impl ModifierMatch {
    /// Whether `modifiers` satisfies this matcher.
    pub fn matches(&self, modifiers: Modifiers) -> bool {
        match self {
            Self::Exact(m) => *m == modifiers,
            Self::OneOf(set) => set.contains(&modifiers),
            Self::Any => true,
        }
    }
}

impl From<Modifiers> for ModifierMatch {
    fn from(modifiers: Modifiers) -> Self {
        Self::Exact(modifiers)
    }
}

impl<const N: usize> From<[Modifiers; N]> for ModifierMatch {
    fn from(set: [Modifiers; N]) -> Self {
        Self::OneOf(set.into_iter().collect())
    }
}

/// Which key names a binding accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyMatcher {
    /// A single exact key name.
    Key(String),
    /// Any of several key names (for example direction keys that depend on text direction).
    AnyOf(SmallVec<[String; 2]>),
    /// Any printable single character.
    Printable,
}

impl KeyMatcher {
    /// Whether `key` satisfies this matcher.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Self::Key(k) => k == key,
            Self::AnyOf(keys) => keys.iter().any(|k| k == key),
            Self::Printable => is_printable_char(key),
        }
    }
}

impl From<&str> for KeyMatcher {
    fn from(key: &str) -> Self {
        Self::Key(key.into())
    }
}

impl From<String> for KeyMatcher {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl<const N: usize> From<[&str; N]> for KeyMatcher {
    fn from(keys: [&str; N]) -> Self {
        Self::AnyOf(keys.into_iter().map(String::from).collect())
    }
}

/// Whether `key` names exactly one printable character.
///
/// Named keys such as `"Shift"` or `"ArrowUp"` are longer than one character
/// and never match.
pub fn is_printable_char(key: &str) -> bool {
    let mut chars = key.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if !c.is_control())
}

type KeyHandler<C> = Box<dyn Fn(&C, &KeyboardEvent)>;

struct KeyBinding<C> {
    modifiers: ModifierMatch,
    key: KeyMatcher,
    handler: KeyHandler<C>,
    options: EventOptions,
}

/// Ordered table of keyboard bindings over a handler context `C`.
///
/// `C` is usually the pattern that owns the bindings; handlers receive it by
/// shared reference and mutate state through its signals.
pub struct KeyboardEventManager<C> {
    bindings: SmallVec<[KeyBinding<C>; 8]>,
}

impl<C> fmt::Debug for KeyboardEventManager<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: SmallVec<[&KeyMatcher; 8]> = self.bindings.iter().map(|b| &b.key).collect();
        f.debug_struct("KeyboardEventManager")
            .field("keys", &keys)
            .finish_non_exhaustive()
    }
}

impl<C> Default for KeyboardEventManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> KeyboardEventManager<C> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            bindings: SmallVec::new(),
        }
    }

    /// Bind `key` with no modifiers held.
    #[must_use]
    pub fn on(
        self,
        key: impl Into<KeyMatcher>,
        handler: impl Fn(&C, &KeyboardEvent) + 'static,
    ) -> Self {
        self.on_with_options(Modifiers::empty(), key, handler, EventOptions::default())
    }

    /// Bind `key` under the given modifier matcher.
    #[must_use]
    pub fn on_with(
        self,
        modifiers: impl Into<ModifierMatch>,
        key: impl Into<KeyMatcher>,
        handler: impl Fn(&C, &KeyboardEvent) + 'static,
    ) -> Self {
        self.on_with_options(modifiers, key, handler, EventOptions::default())
    }

    /// Bind `key` under the given modifier matcher and options.
    #[must_use]
    pub fn on_with_options(
        mut self,
        modifiers: impl Into<ModifierMatch>,
        key: impl Into<KeyMatcher>,
        handler: impl Fn(&C, &KeyboardEvent) + 'static,
        options: EventOptions,
    ) -> Self {
        self.bindings.push(KeyBinding {
            modifiers: modifiers.into(),
            key: key.into(),
            handler: Box::new(handler),
            options,
        });
        self
    }

    /// Bind `key` only when `condition` holds; otherwise return the table unchanged.
    ///
    /// Lets callers keep a single builder chain when some bindings depend on
    /// configuration (for example range selection only in multi-select mode).
    #[must_use]
    pub fn on_if(
        self,
        condition: bool,
        modifiers: impl Into<ModifierMatch>,
        key: impl Into<KeyMatcher>,
        handler: impl Fn(&C, &KeyboardEvent) + 'static,
    ) -> Self {
        if condition {
            self.on_with(modifiers, key, handler)
        } else {
            self
        }
    }

    /// Like [`on_if`](Self::on_if), with explicit options.
    #[must_use]
    pub fn on_if_with_options(
        self,
        condition: bool,
        modifiers: impl Into<ModifierMatch>,
        key: impl Into<KeyMatcher>,
        handler: impl Fn(&C, &KeyboardEvent) + 'static,
        options: EventOptions,
    ) -> Self {
        if condition {
            self.on_with_options(modifiers, key, handler, options)
        } else {
            self
        }
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if no bindings are registered.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Run every matching binding in registration order.
    ///
    /// Returns `true` if at least one binding handled the event.
    pub fn handle(&self, context: &C, event: &mut KeyboardEvent) -> bool {
        let mut handled = false;
        for binding in &self.bindings {
            if binding.options.ignore_repeat && event.repeat {
                continue;
            }
            if !binding.modifiers.matches(event.modifiers) || !binding.key.matches(&event.key) {
                continue;
            }
            tracing::trace!(key = %event.key, "keyboard binding matched");
            (binding.handler)(context, event);
            if binding.options.stop_propagation {
                event.stop_propagation();
            }
            if binding.options.prevent_default {
                event.prevent_default();
            }
            handled = true;
        }
        handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[derive(Default)]
    struct Log(RefCell<Vec<&'static str>>);

    impl Log {
        fn push(&self, entry: &'static str) {
            self.0.borrow_mut().push(entry);
        }
        fn entries(&self) -> Vec<&'static str> {
            self.0.borrow().clone()
        }
    }

    #[test]
    fn all_matching_bindings_run_in_registration_order() {
        let manager = KeyboardEventManager::new()
            .on("Enter", |l: &Log, _| l.push("first"))
            .on("Escape", |l: &Log, _| l.push("other"))
            .on_with(ModifierMatch::Any, "Enter", |l: &Log, _| l.push("second"));

        let log = Log::default();
        assert!(manager.handle(&log, &mut KeyboardEvent::new("Enter")));
        assert_eq!(log.entries(), ["first", "second"]);
    }

    #[test]
    fn modifiers_must_match_exactly_by_default() {
        let manager = KeyboardEventManager::new().on("a", |l: &Log, _| l.push("plain"));
        let log = Log::default();

        let mut ctrl_a = KeyboardEvent::new("a").with_modifiers(Modifiers::CTRL);
        assert!(!manager.handle(&log, &mut ctrl_a));
        assert!(!ctrl_a.default_prevented);
        assert!(log.entries().is_empty());
    }

    #[test]
    fn one_of_modifier_sets() {
        let manager = KeyboardEventManager::new().on_with(
            [Modifiers::CTRL, Modifiers::META],
            "a",
            |l: &Log, _| l.push("select-all"),
        );
        let log = Log::default();
        manager.handle(&log, &mut KeyboardEvent::new("a").with_modifiers(Modifiers::META));
        manager.handle(&log, &mut KeyboardEvent::new("a").with_modifiers(Modifiers::CTRL));
        manager.handle(
            &log,
            &mut KeyboardEvent::new("a").with_modifiers(Modifiers::CTRL | Modifiers::SHIFT),
        );
        assert_eq!(log.entries(), ["select-all", "select-all"]);
    }

    #[test]
    fn repeat_events_are_ignored_unless_allowed() {
        let manager = KeyboardEventManager::new()
            .on(" ", |l: &Log, _| l.push("toggle"))
            .on_with_options(
                Modifiers::empty(),
                "ArrowDown",
                |l: &Log, _| l.push("next"),
                EventOptions::allow_repeat(),
            );
        let log = Log::default();
        let mut held_space = KeyboardEvent::new(" ").repeating();
        assert!(!manager.handle(&log, &mut held_space));
        assert!(manager.handle(&log, &mut KeyboardEvent::new("ArrowDown").repeating()));
        assert_eq!(log.entries(), ["next"]);
    }

    #[test]
    fn passive_bindings_leave_event_untouched() {
        let manager = KeyboardEventManager::new().on_with_options(
            Modifiers::empty(),
            "Tab",
            |l: &Log, _| l.push("tab"),
            EventOptions::passive(),
        );
        let log = Log::default();
        let mut tab = KeyboardEvent::new("Tab");
        assert!(manager.handle(&log, &mut tab));
        assert!(!tab.default_prevented);
        assert!(!tab.propagation_stopped);
    }

    #[test]
    fn printable_matcher_rejects_named_keys() {
        assert!(KeyMatcher::Printable.matches("a"));
        assert!(KeyMatcher::Printable.matches(" "));
        assert!(KeyMatcher::Printable.matches("é"));
        assert!(!KeyMatcher::Printable.matches("Shift"));
        assert!(!KeyMatcher::Printable.matches("ArrowUp"));
        assert!(!KeyMatcher::Printable.matches(""));
        assert!(!KeyMatcher::Printable.matches("\u{8}"));
    }

    #[test]
    fn any_of_matches_candidate_keys() {
        let matcher = KeyMatcher::from(["ArrowLeft", "ArrowUp"]);
        assert!(matcher.matches("ArrowLeft"));
        assert!(matcher.matches("ArrowUp"));
        assert!(!matcher.matches("ArrowRight"));
    }

    #[test]
    fn conditional_bindings() {
        let manager = KeyboardEventManager::<Log>::new()
            .on_if(false, Modifiers::SHIFT, "ArrowDown", |l, _| l.push("range"))
            .on_if(true, Modifiers::empty(), "ArrowDown", |l, _| l.push("next"));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn conditional_bindings_keep_their_options() {
        let manager = KeyboardEventManager::<Log>::new()
            .on_if_with_options(
                false,
                Modifiers::SHIFT,
                "ArrowDown",
                |l, _| l.push("range"),
                EventOptions::allow_repeat(),
            )
            .on_if_with_options(
                true,
                Modifiers::empty(),
                "ArrowDown",
                |l, _| l.push("next"),
                EventOptions::allow_repeat(),
            );
        let log = Log::default();
        assert_eq!(manager.len(), 1);
        assert!(manager.handle(&log, &mut KeyboardEvent::new("ArrowDown").repeating()));
        assert_eq!(log.entries(), ["next"]);
    }
}
