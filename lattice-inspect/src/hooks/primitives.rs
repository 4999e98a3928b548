//! Primitive hooks: one tracked fact each.
//!
//! Each hook reads its retained state during the render pass and queues the
//! matching commit on the scope, so the fact it returns always describes the
//! render in progress relative to the previous commit.

use std::sync::Arc;

use crate::diff::{ArityPolicy, ChangeSet, Deps, DepsTracker, Props, PropsTracker};
use crate::error::Result;
use crate::host::RenderScope;
use crate::metrics::{Clock, RenderCounter, RenderTiming, TimestampTracker};

/// The number of the render in progress: 1 on the first render, then one
/// more per committed render.
pub fn use_render_count(cx: &mut RenderScope<'_>) -> Result<u64> {
    let counter = cx.retain(RenderCounter::new)?;
    let count = counter.lock().current();
    cx.on_commit(move || counter.lock().commit());
    Ok(count)
}

/// Time elapsed since the previous commit, read from `clock`.
pub fn use_render_timing(cx: &mut RenderScope<'_>, clock: &Arc<dyn Clock>) -> Result<RenderTiming> {
    let tracker = cx.retain(TimestampTracker::new)?;
    let timing = tracker.lock().observe(clock.now_ms());

    let clock = Arc::clone(clock);
    cx.on_commit(move || tracker.lock().commit(clock.now_ms()));
    Ok(timing)
}

/// Props that changed since the previous commit. Empty on the first render.
pub fn use_prop_changes(cx: &mut RenderScope<'_>, props: &Props) -> Result<ChangeSet> {
    let tracker = cx.retain(PropsTracker::default)?;
    let changes = tracker.lock().observe(props)?;
    cx.on_commit(move || tracker.lock().commit());
    Ok(changes)
}

/// Dependency positions that changed since the previous commit. Empty on the
/// first render.
pub fn use_dependency_changes(
    cx: &mut RenderScope<'_>,
    deps: &Deps,
    policy: ArityPolicy,
) -> Result<ChangeSet> {
    let tracker = cx.retain(|| DepsTracker::new(policy))?;
    let changes = tracker.lock().observe(deps)?;
    cx.on_commit(move || tracker.lock().commit());
    Ok(changes)
}
