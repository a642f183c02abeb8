//! Client state containers.
//!
//! SYSTEM CONTEXT
//! ==============
//! State structs are plain data with transition methods. Components hold
//! them in `RwSignal`s provided via context; stores and hooks only see the
//! `StateCell` seam, so the same transition code runs against a signal in
//! the browser and a `RefCell` in tests.

pub mod auth;
pub mod resource;
pub mod toast;

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;

/// Shared, mutable handle to a piece of state.
pub trait StateCell<S>: Clone + 'static {
    fn update_state(&self, f: impl FnOnce(&mut S));
    fn read_state<R>(&self, f: impl FnOnce(&S) -> R) -> R;
}

impl<S: Send + Sync + 'static> StateCell<S> for RwSignal<S> {
    fn update_state(&self, f: impl FnOnce(&mut S)) {
        self.update(f);
    }

    fn read_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        self.with_untracked(f)
    }
}

impl<S: 'static> StateCell<S> for Rc<RefCell<S>> {
    fn update_state(&self, f: impl FnOnce(&mut S)) {
        f(&mut self.borrow_mut());
    }

    fn read_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.borrow())
    }
}
