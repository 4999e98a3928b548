//! Render Scope
//!
//! The handle a render body receives. It exposes the three primitives hooks
//! are built on:
//!
//! - retained state that survives across renders without causing one
//!   ([`RenderScope::retain`]),
//! - post-commit callbacks ([`RenderScope::on_commit`],
//!   [`RenderScope::use_effect`]),
//! - unmount callbacks ([`RenderScope::on_unmount`]).
//!
//! Retained state is matched to call sites by call order, so hooks must be
//! called unconditionally and in the same order on every render.

use std::any::Any;
use std::sync::Arc;

use parking_lot::Mutex;

use super::effect::{run_cleanup, run_effect, Cleanup, EffectSlot};
use super::instance::InstanceId;
use crate::diff::Deps;
use crate::error::{InspectError, Result};

/// A one-shot post-commit callback.
pub(crate) type Callback = Box<dyn FnOnce() + Send>;

/// A retained-state slot.
pub(crate) type Slot = Box<dyn Any + Send>;

/// Work queued by one render pass, run when it commits.
///
/// Cleanups of effects about to re-run go first, then the callbacks in the
/// order they were queued.
pub(crate) struct CommitQueue {
    cleanups: Vec<Arc<Mutex<EffectSlot>>>,
    callbacks: Vec<Callback>,
}

impl CommitQueue {
    pub(crate) fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub(crate) fn run(self) {
        for slot in &self.cleanups {
            run_cleanup(slot);
        }
        for callback in self.callbacks {
            callback();
        }
    }
}

/// Per-render access to the component's retained state and commit queue.
pub struct RenderScope<'a> {
    instance: InstanceId,
    component: &'a str,
    first_render: bool,
    slots: &'a mut Vec<Slot>,
    cursor: usize,
    cleanups: Vec<Arc<Mutex<EffectSlot>>>,
    queue: Vec<Callback>,
}

impl<'a> RenderScope<'a> {
    pub(crate) fn new(
        instance: InstanceId,
        component: &'a str,
        first_render: bool,
        slots: &'a mut Vec<Slot>,
    ) -> Self {
        Self {
            instance,
            component,
            first_render,
            slots,
            cursor: 0,
            cleanups: Vec::new(),
            queue: Vec::new(),
        }
    }

    /// The instance being rendered.
    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    /// The host component's name.
    pub fn component(&self) -> &str {
        self.component
    }

    /// Whether this render will be the instance's first commit.
    pub fn is_first_render(&self) -> bool {
        self.first_render
    }

    /// Retain state across renders.
    ///
    /// On the first render `init` creates the state; later renders get the
    /// same state back. Mutating it does not trigger a render.
    pub fn retain<T, F>(&mut self, init: F) -> Result<Arc<Mutex<T>>>
    where
        T: Send + 'static,
        F: FnOnce() -> T,
    {
        let index = self.cursor;
        self.cursor += 1;

        if index == self.slots.len() {
            let state = Arc::new(Mutex::new(init()));
            self.slots.push(Box::new(Arc::clone(&state)));
            return Ok(state);
        }

        self.slots[index]
            .downcast_ref::<Arc<Mutex<T>>>()
            .cloned()
            .ok_or(InspectError::HookOrder { index })
    }

    /// Queue a callback to run once after this render commits.
    ///
    /// Callbacks run in the order they were queued.
    pub fn on_commit<F>(&mut self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.queue.push(Box::new(callback));
    }

    /// Run `effect` after commit when `deps` changed since its last run.
    ///
    /// With `deps` of `None` the effect runs after every commit. The effect
    /// may return a cleanup, run before its next run and on unmount. On a
    /// commit, the cleanups of all re-running effects run before any
    /// post-commit callback.
    pub fn use_effect<F>(&mut self, deps: Option<Deps>, effect: F) -> Result<()>
    where
        F: FnOnce() -> Option<Cleanup> + Send + 'static,
    {
        let slot = self.retain(EffectSlot::default)?;
        let should_run = slot.lock().should_run(deps.as_ref());

        if should_run {
            self.cleanups.push(Arc::clone(&slot));
            self.on_commit(move || run_effect(&slot, deps, effect));
        }
        Ok(())
    }

    /// Register a callback to run when the component unmounts.
    ///
    /// Registered once per mount; later renders reuse the first callback.
    pub fn on_unmount<F>(&mut self, callback: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.use_effect(Some(Deps::new()), move || Some(Box::new(callback) as Cleanup))
    }

    pub(crate) fn into_commit(self) -> CommitQueue {
        CommitQueue {
            cleanups: self.cleanups,
            callbacks: self.queue,
        }
    }
}
