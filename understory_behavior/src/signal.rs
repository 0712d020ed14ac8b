// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal signal cells.
//!
//! Every input and per-item state in this crate is read through a [`Signal`]
//! so the host can mutate it between calls without the behavior owning the
//! storage. Writable state uses [`WritableSignal`], a shared cell: clones
//! observe the same value.
//!
//! Computed signals are recomputed on every read rather than memoized. The
//! derivations in this crate are small (a filter or lookup over an item list),
//! so eager recomputation keeps the model simple and never serves stale data.
//!
//! Signals are single-threaded. Reading a [`WritableSignal`] from inside its
//! own [`WritableSignal::update`] closure panics, as with any `RefCell`.

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

/// A shared, writable value cell.
pub struct WritableSignal<T> {
    cell: Rc<RefCell<T>>,
}

impl<T> Clone for WritableSignal<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for WritableSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.try_borrow() {
            Ok(value) => f.debug_tuple("WritableSignal").field(&*value).finish(),
            Err(_) => f.write_str("WritableSignal(<borrowed>)"),
        }
    }
}

impl<T: Default> Default for WritableSignal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> WritableSignal<T> {
    /// Create a cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            cell: Rc::new(RefCell::new(value)),
        }
    }

    /// Read the value through a closure without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.borrow())
    }

    /// Replace the value.
    pub fn set(&self, value: T) {
        *self.cell.borrow_mut() = value;
    }

    /// Replace the value, returning the previous one.
    pub fn replace(&self, value: T) -> T {
        self.cell.replace(value)
    }

    /// Mutate the value in place.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.cell.borrow_mut());
    }

    /// Whether both handles share the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T: Clone> WritableSignal<T> {
    /// Read a clone of the value.
    pub fn get(&self) -> T {
        self.cell.borrow().clone()
    }
}

impl<T: Clone + 'static> WritableSignal<T> {
    /// A read-only view of this cell.
    pub fn read_only(&self) -> Signal<T> {
        Signal {
            source: Source::Cell(Rc::clone(&self.cell)),
        }
    }
}

enum Source<T> {
    Value(Rc<T>),
    Cell(Rc<RefCell<T>>),
    Computed(Rc<dyn Fn() -> T>),
}

/// A read-only accessor: a constant, a view of a [`WritableSignal`], or a
/// computation over other signals.
pub struct Signal<T> {
    source: Source<T>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        let source = match &self.source {
            Source::Value(v) => Source::Value(Rc::clone(v)),
            Source::Cell(c) => Source::Cell(Rc::clone(c)),
            Source::Computed(f) => Source::Computed(Rc::clone(f)),
        };
        Self { source }
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Source::Value(v) => f.debug_tuple("Signal").field(&**v).finish(),
            Source::Cell(c) => match c.try_borrow() {
                Ok(value) => f.debug_tuple("Signal").field(&*value).finish(),
                Err(_) => f.write_str("Signal(<borrowed>)"),
            },
            Source::Computed(_) => f.write_str("Signal(<computed>)"),
        }
    }
}

impl<T: Default> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Signal<T> {
    /// A signal that always yields `value`.
    pub fn new(value: T) -> Self {
        Self {
            source: Source::Value(Rc::new(value)),
        }
    }

    /// A signal whose value is recomputed by `f` on every read.
    pub fn computed(f: impl Fn() -> T + 'static) -> Self {
        Self {
            source: Source::Computed(Rc::new(f)),
        }
    }
}

impl<T: Clone> Signal<T> {
    /// Read the current value.
    pub fn get(&self) -> T {
        match &self.source {
            Source::Value(v) => T::clone(&**v),
            Source::Cell(c) => c.borrow().clone(),
            Source::Computed(f) => f(),
        }
    }
}

impl<T: Clone + 'static> From<WritableSignal<T>> for Signal<T> {
    fn from(signal: WritableSignal<T>) -> Self {
        signal.read_only()
    }
}

impl<T: Clone + 'static> From<&WritableSignal<T>> for Signal<T> {
    fn from(signal: &WritableSignal<T>) -> Self {
        signal.read_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writable_clones_share_state() {
        let a = WritableSignal::new(1);
        let b = a.clone();
        b.set(2);
        assert_eq!(a.get(), 2);
        a.update(|v| *v += 1);
        assert_eq!(b.get(), 3);
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn read_only_view_tracks_writes() {
        let source = WritableSignal::new(false);
        let view = source.read_only();
        assert!(!view.get());
        source.set(true);
        assert!(view.get());
    }

    #[test]
    fn computed_recomputes_on_read() {
        let a = WritableSignal::new(2);
        let b = WritableSignal::new(3);
        let sum = {
            let (a, b) = (a.clone(), b.clone());
            Signal::computed(move || a.get() + b.get())
        };
        assert_eq!(sum.get(), 5);
        a.set(10);
        assert_eq!(sum.get(), 13);
    }

    #[test]
    fn constant_signal() {
        let s = Signal::new(7_u8);
        assert_eq!(s.clone().get(), 7);
        assert_eq!(Signal::<u8>::default().get(), 0);
    }
}
