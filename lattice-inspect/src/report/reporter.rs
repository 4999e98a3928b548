//! Reporters
//!
//! A [`Reporter`] is the diagnostic sink records are written to.
//!
//! - [`TracingReporter`] emits `tracing` events under the `lattice_inspect`
//!   target. Records with changes log at `INFO`, records without at `DEBUG`,
//!   so a subscriber filtering at `INFO` only sees renders that changed
//!   something (plus mount and unmount markers, and effect records whose
//!   dependency list changed length).
//! - [`MemoryReporter`] keeps records in memory for assertions.
//!
//! Reporting never fails from the caller's point of view: whatever the sink
//! does with a record is its own business.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use super::record::DebugRecord;

/// A sink for diagnostic records.
pub trait Reporter: Send + Sync {
    fn report(&self, record: &DebugRecord);
}

/// Emits each record as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

// Levels are part of a callsite's static metadata, so each level needs its
// own expansion.
macro_rules! emit_render {
    ($level:ident, $component:ident, $instance:ident, $info:ident) => {
        $level!(
            target: "lattice_inspect",
            component = %$component,
            instance = *$instance,
            render_count = $info.render_count,
            time_since_last_render = $info.time_since_last_render,
            last_render_timestamp = $info.last_render_timestamp,
            changed = $info.changed_props.len(),
            changes = %$info.changed_props.to_json(),
            "[debug-info] <{} /> Re-rendered",
            $component
        )
    };
}

macro_rules! emit_effect {
    ($level:ident, $effect:ident, $instance:ident, $info:ident) => {
        $level!(
            target: "lattice_inspect",
            effect = %$effect,
            instance = *$instance,
            render_count = $info.render_count,
            time_since_last_render = $info.time_since_last_render,
            last_render_timestamp = $info.last_render_timestamp,
            changed = $info.changed_deps.len(),
            changes = %$info.changed_deps.to_json(),
            "[effect-debug-info] {}",
            $effect
        )
    };
}

impl Reporter for TracingReporter {
    fn report(&self, record: &DebugRecord) {
        match record {
            DebugRecord::Mounted {
                component,
                instance,
                props,
            } => {
                let props = serde_json::to_string(props).unwrap_or_default();
                info!(
                    target: "lattice_inspect",
                    component = %component,
                    instance = *instance,
                    props = %props,
                    "[debug-info] <{} /> Mounted",
                    component
                );
            }
            DebugRecord::Rendered {
                component,
                instance,
                info,
            } => {
                if info.has_changes() {
                    emit_render!(info, component, instance, info);
                } else {
                    emit_render!(debug, component, instance, info);
                }
            }
            DebugRecord::Unmounted {
                component,
                instance,
            } => {
                info!(
                    target: "lattice_inspect",
                    component = %component,
                    instance = *instance,
                    "[debug-info] <{} /> Unmounted",
                    component
                );
            }
            DebugRecord::Effect {
                effect,
                instance,
                info,
            } => {
                if info.is_notable() {
                    emit_effect!(info, effect, instance, info);
                } else {
                    emit_effect!(debug, effect, instance, info);
                }
            }
        }
    }
}

/// Stores records in memory. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    records: Arc<Mutex<Vec<DebugRecord>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records so far, oldest first.
    pub fn records(&self) -> Vec<DebugRecord> {
        self.records.lock().clone()
    }

    /// Remove and return all records so far.
    pub fn take(&self) -> Vec<DebugRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, record: &DebugRecord) {
        self.records.lock().push(record.clone());
    }
}

impl<R: Reporter + ?Sized> Reporter for Arc<R> {
    fn report(&self, record: &DebugRecord) {
        (**self).report(record);
    }
}
