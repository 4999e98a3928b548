//! Change-Set Tracker
//!
//! Retains the snapshot of the last committed render and diffs each new
//! render against it.
//!
//! # Render and commit
//!
//! Tracking is split in two phases to match the host lifecycle:
//!
//! 1. [`ChangeTracker::observe`] runs during the render pass. It diffs the
//!    current input against the committed snapshot and stages the input.
//!
//! 2. [`ChangeTracker::commit`] runs after the render commits. It promotes
//!    the staged input to be the snapshot for the next render.
//!
//! A render body that runs more than once before a commit (double-invoked
//! render diagnostics) therefore sees the same change set every time.
//!
//! # First render
//!
//! The snapshot is seeded with the first input itself, so the first change
//! set is always empty. Initial values never show up as changes from
//! `undefined`.

use super::change_set::ChangeSet;
use super::snapshot::{ArityPolicy, Deps, Props, Snapshot};
use crate::error::Result;

/// Tracker for an ordered dependency list.
pub type DepsTracker = ChangeTracker<Deps>;

/// Tracker for a named prop mapping.
pub type PropsTracker = ChangeTracker<Props>;

/// Retains one snapshot and computes change sets against it.
#[derive(Debug, Clone)]
pub struct ChangeTracker<S: Snapshot> {
    /// Input of the last committed render.
    committed: Option<S>,

    /// Input of the render in progress, promoted on commit.
    staged: Option<S>,

    policy: ArityPolicy,
}

impl<S: Snapshot> ChangeTracker<S> {
    pub fn new(policy: ArityPolicy) -> Self {
        Self {
            committed: None,
            staged: None,
            policy,
        }
    }

    /// Diff `current` against the committed snapshot and stage it.
    ///
    /// When diffing fails (a dependency list changed length), `current`
    /// becomes the committed snapshot right away, so the next render is
    /// compared against the new shape.
    pub fn observe(&mut self, current: &S) -> Result<ChangeSet> {
        let previous = self.committed.get_or_insert_with(|| current.clone());
        match S::diff(previous, current, self.policy) {
            Ok(changes) => {
                self.staged = Some(current.clone());
                Ok(changes)
            }
            Err(err) => {
                self.committed = Some(current.clone());
                self.staged = None;
                Err(err)
            }
        }
    }

    /// Promote the staged input to the committed snapshot.
    pub fn commit(&mut self) {
        if let Some(staged) = self.staged.take() {
            self.committed = Some(staged);
        }
    }

    /// Observe and commit in one step, for callers without a render phase.
    pub fn track(&mut self, current: &S) -> Result<ChangeSet> {
        let changes = self.observe(current);
        self.commit();
        changes
    }

    /// The snapshot of the last committed render, if any.
    pub fn committed(&self) -> Option<&S> {
        self.committed.as_ref()
    }

    pub fn policy(&self) -> ArityPolicy {
        self.policy
    }

    /// Forget all retained input. The next observation seeds again.
    pub fn reset(&mut self) {
        self.committed = None;
        self.staged = None;
    }
}

impl<S: Snapshot> Default for ChangeTracker<S> {
    fn default() -> Self {
        Self::new(ArityPolicy::default())
    }
}
