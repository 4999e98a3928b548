//! Component Host
//!
//! A minimal host for one component instance. It drives the render, commit
//! and unmount lifecycle that the inspection hooks attach to.
//!
//! # How It Works
//!
//! 1. [`ComponentHost::render`] runs the render body with a fresh
//!    [`RenderScope`]. Hooks read retained state and queue post-commit
//!    callbacks; nothing committed is mutated yet.
//!
//! 2. When the body returns successfully, the render commits: the instance
//!    becomes mounted, the cleanups of effects about to re-run run, and then
//!    the queued callbacks run in the order they were queued. If the body
//!    fails, its callbacks are dropped unrun. A first render that fails also
//!    drops the state it retained, so the next attempt mounts from scratch.
//!
//! 3. [`ComponentHost::unmount`] runs pending effect cleanups in call order,
//!    releases all retained state, and refuses further renders. Dropping the
//!    host unmounts it.
//!
//! The host does not schedule renders on its own; callers render whenever
//! their inputs change.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use super::effect::{run_cleanup, EffectSlot};
use super::instance::{InstanceId, Lifecycle};
use super::scope::{CommitQueue, RenderScope, Slot};
use crate::error::{InspectError, Result};

/// One mounted (or mountable) component instance.
pub struct ComponentHost {
    id: InstanceId,
    name: String,
    lifecycle: Lifecycle,

    /// Retained state, one slot per hook call site, in call order.
    slots: Vec<Slot>,

    /// Number of render passes run, including discarded ones.
    render_passes: u64,

    /// Number of commits.
    commits: u64,
}

impl ComponentHost {
    /// Create a host for a component called `name`. Nothing renders yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: InstanceId::new(),
            name: name.into(),
            lifecycle: Lifecycle::Uninitialized,
            slots: Vec::new(),
            render_passes: 0,
            commits: 0,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn render_passes(&self) -> u64 {
        self.render_passes
    }

    pub fn commits(&self) -> u64 {
        self.commits
    }

    /// Run one render pass and commit it.
    pub fn render<R, F>(&mut self, body: F) -> Result<R>
    where
        F: FnOnce(&mut RenderScope<'_>) -> Result<R>,
    {
        self.ensure_mounted()?;
        let (output, queue) = self.run_pass(body)?;
        self.commit(queue);
        Ok(output)
    }

    /// Run the render body twice, then commit only the second pass.
    ///
    /// This surfaces hooks that mutate committed state during render: such
    /// state would advance twice for a single commit.
    pub fn render_strict<R, F>(&mut self, mut body: F) -> Result<R>
    where
        F: FnMut(&mut RenderScope<'_>) -> Result<R>,
    {
        self.ensure_mounted()?;
        let (_, discarded) = self.run_pass(&mut body)?;
        drop(discarded);
        let (output, queue) = self.run_pass(&mut body)?;
        self.commit(queue);
        Ok(output)
    }

    /// Tear the instance down. Calling it again does nothing.
    pub fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }

        for slot in &self.slots {
            if let Some(effect) = slot.downcast_ref::<Arc<Mutex<EffectSlot>>>() {
                run_cleanup(effect);
            }
        }
        self.slots.clear();
        self.lifecycle = Lifecycle::Unmounted;

        trace!(component = %self.name, instance = %self.id, "unmounted");
    }

    fn ensure_mounted(&self) -> Result<()> {
        if self.lifecycle == Lifecycle::Unmounted {
            return Err(InspectError::Unmounted {
                component: self.name.clone(),
            });
        }
        Ok(())
    }

    fn run_pass<R, F>(&mut self, body: F) -> Result<(R, CommitQueue)>
    where
        F: FnOnce(&mut RenderScope<'_>) -> Result<R>,
    {
        self.render_passes += 1;
        let first_render = self.lifecycle == Lifecycle::Uninitialized;
        let mut scope = RenderScope::new(self.id, &self.name, first_render, &mut self.slots);
        match body(&mut scope) {
            Ok(output) => Ok((output, scope.into_commit())),
            Err(err) => {
                drop(scope);
                // Nothing retained by a render that never mounted survives it.
                if first_render {
                    self.slots.clear();
                }
                Err(err)
            }
        }
    }

    fn commit(&mut self, queue: CommitQueue) {
        self.lifecycle = Lifecycle::Mounted;
        self.commits += 1;

        trace!(
            component = %self.name,
            instance = %self.id,
            commit = self.commits,
            callbacks = queue.len(),
            "committed"
        );

        queue.run();
    }
}

impl Drop for ComponentHost {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl std::fmt::Debug for ComponentHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentHost")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("lifecycle", &self.lifecycle)
            .field("slots", &self.slots.len())
            .field("commits", &self.commits)
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
