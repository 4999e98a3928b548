//! Effect Slots
//!
//! An effect is a side-effecting callback that runs after a render commits.
//!
//! # When Effects Run
//!
//! 1. After the first commit, always.
//!
//! 2. After later commits, only if the dependency list changed. Dependencies
//!    are compared pairwise by identity (`same_value`), so a `NaN` dependency
//!    does not re-run the effect on every render.
//!
//! 3. Without a dependency list, after every commit.
//!
//! # Cleanup
//!
//! An effect can return a cleanup callback. It runs before the effect runs
//! again and when the component unmounts.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::diff::Deps;

/// Callback returned by an effect, run before its next run and on unmount.
pub type Cleanup = Box<dyn FnOnce() + Send>;

/// Retained state of one `use_effect` call site.
#[derive(Default)]
pub(crate) struct EffectSlot {
    /// Dependencies of the last run. `None` before the first run and for
    /// effects without a dependency list.
    deps: Option<Deps>,

    /// Cleanup returned by the last run.
    cleanup: Option<Cleanup>,
}

impl EffectSlot {
    /// Whether an effect with `next` dependencies should run after this commit.
    pub(crate) fn should_run(&self, next: Option<&Deps>) -> bool {
        match (&self.deps, next) {
            (Some(previous), Some(next)) => !previous.same_values(next),
            _ => true,
        }
    }
}

/// Run `effect` for the slot: previous cleanup first, then the effect.
///
/// The slot lock is not held while user code runs.
pub(crate) fn run_effect<F>(slot: &Arc<Mutex<EffectSlot>>, deps: Option<Deps>, effect: F)
where
    F: FnOnce() -> Option<Cleanup>,
{
    let previous_cleanup = slot.lock().cleanup.take();
    if let Some(cleanup) = previous_cleanup {
        cleanup();
    }

    let cleanup = effect();

    let mut slot = slot.lock();
    slot.cleanup = cleanup;
    slot.deps = deps;
}

/// Run the pending cleanup of the slot, if any.
pub(crate) fn run_cleanup(slot: &Arc<Mutex<EffectSlot>>) {
    let cleanup = slot.lock().cleanup.take();
    if let Some(cleanup) = cleanup {
        cleanup();
    }
}
