// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer event manager.
//!
//! Composite widgets usually need one pointer-down handler ("go to the item
//! under the pointer and act on it"), optionally specialized by modifier
//! (Shift-click extends a range, Ctrl-click toggles). Bindings are matched the
//! same way as keyboard bindings: in registration order, every match runs.

use alloc::boxed::Box;
use core::fmt;

use smallvec::SmallVec;

use crate::event::{Modifiers, PointerButton, PointerEvent};
use crate::keyboard::{EventOptions, ModifierMatch};

type PointerHandler<C> = Box<dyn Fn(&C, &PointerEvent)>;

struct PointerBinding<C> {
    button: PointerButton,
    modifiers: ModifierMatch,
    handler: PointerHandler<C>,
    options: EventOptions,
}

/// Ordered table of pointer bindings over a handler context `C`.
pub struct PointerEventManager<C> {
    bindings: SmallVec<[PointerBinding<C>; 4]>,
}

impl<C> fmt::Debug for PointerEventManager<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerEventManager")
            .field("bindings", &self.bindings.len())
            .finish_non_exhaustive()
    }
}

impl<C> Default for PointerEventManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> PointerEventManager<C> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            bindings: SmallVec::new(),
        }
    }

    /// Bind an unmodified primary-button press.
    #[must_use]
    pub fn on(self, handler: impl Fn(&C, &PointerEvent) + 'static) -> Self {
        self.on_with(Modifiers::empty(), handler)
    }

    /// Bind a primary-button press under the given modifier matcher.
    #[must_use]
    pub fn on_with(
        self,
        modifiers: impl Into<ModifierMatch>,
        handler: impl Fn(&C, &PointerEvent) + 'static,
    ) -> Self {
        self.on_button(PointerButton::Primary, modifiers, handler)
    }

    /// Bind a press of `button` under the given modifier matcher.
    #[must_use]
    pub fn on_button(
        mut self,
        button: PointerButton,
        modifiers: impl Into<ModifierMatch>,
        handler: impl Fn(&C, &PointerEvent) + 'static,
    ) -> Self {
        self.bindings.push(PointerBinding {
            button,
            modifiers: modifiers.into(),
            handler: Box::new(handler),
            // Pointer presses never repeat; only the default/propagation flags apply.
            options: EventOptions::default(),
        });
        self
    }

    /// Run every matching binding in registration order.
    ///
    /// Returns `true` if at least one binding handled the event.
    pub fn handle(&self, context: &C, event: &mut PointerEvent) -> bool {
        let mut handled = false;
        for binding in &self.bindings {
            if binding.button != event.button || !binding.modifiers.matches(event.modifiers) {
                continue;
            }
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
    use core::cell::Cell;

    #[test]
    fn primary_press_runs_handler() {
        let manager = PointerEventManager::new().on(|c: &Cell<u32>, _| c.set(c.get() + 1));
        let count = Cell::new(0);
        let mut event = PointerEvent::on("item-1");
        assert!(manager.handle(&count, &mut event));
        assert!(event.default_prevented);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn secondary_button_is_ignored_by_default() {
        let manager = PointerEventManager::new().on(|c: &Cell<u32>, _| c.set(c.get() + 1));
        let count = Cell::new(0);
        let mut event = PointerEvent::on("item-1").with_button(PointerButton::Secondary);
        assert!(!manager.handle(&count, &mut event));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn modifier_specific_bindings() {
        let manager = PointerEventManager::new()
            .on(|c: &Cell<u32>, _| c.set(1))
            .on_with(Modifiers::SHIFT, |c: &Cell<u32>, _| c.set(2))
            .on_with([Modifiers::CTRL, Modifiers::META], |c: &Cell<u32>, _| c.set(3));
        let state = Cell::new(0);

        manager.handle(&state, &mut PointerEvent::on("a").with_modifiers(Modifiers::SHIFT));
        assert_eq!(state.get(), 2);
        manager.handle(&state, &mut PointerEvent::on("a").with_modifiers(Modifiers::META));
        assert_eq!(state.get(), 3);
        manager.handle(&state, &mut PointerEvent::on("a"));
        assert_eq!(state.get(), 1);
    }
}
