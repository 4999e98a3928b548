//! Diagnostic Records
//!
//! The facts a hook reports after a commit. Records are plain data so a
//! [`Reporter`](super::Reporter) can log, store or forward them.

use serde::Serialize;

use crate::diff::{ChangeSet, Props};
use crate::metrics::RenderTiming;

/// What `use_debug_info` knows about the render in progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    pub render_count: u64,
    pub changed_props: ChangeSet,
    pub time_since_last_render: u64,
    pub last_render_timestamp: u64,
}

impl DebugInfo {
    pub fn new(render_count: u64, changed_props: ChangeSet, timing: RenderTiming) -> Self {
        Self {
            render_count,
            changed_props,
            time_since_last_render: timing.time_since_last_render,
            last_render_timestamp: timing.last_render_timestamp,
        }
    }

    pub fn has_changes(&self) -> bool {
        !self.changed_props.is_empty()
    }
}

/// What `use_effect_debug_info` knows about the render in progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectDebugInfo {
    pub render_count: u64,
    pub changed_deps: ChangeSet,
    pub time_since_last_render: u64,
    pub last_render_timestamp: u64,
    /// Set when the dependency list changed length this render. The change
    /// set is empty then, and the tracker restarts from the new list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_error: Option<String>,
}

impl EffectDebugInfo {
    pub fn new(render_count: u64, changed_deps: ChangeSet, timing: RenderTiming) -> Self {
        Self {
            render_count,
            changed_deps,
            time_since_last_render: timing.time_since_last_render,
            last_render_timestamp: timing.last_render_timestamp,
            dependency_error: None,
        }
    }

    pub fn has_changes(&self) -> bool {
        !self.changed_deps.is_empty()
    }

    /// Changes or a dependency error.
    pub fn is_notable(&self) -> bool {
        self.has_changes() || self.dependency_error.is_some()
    }
}

/// One diagnostic record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DebugRecord {
    /// The component committed for the first time (or under a new name).
    Mounted {
        component: String,
        instance: u64,
        props: Props,
    },

    /// The component committed a render.
    Rendered {
        component: String,
        instance: u64,
        info: DebugInfo,
    },

    /// The component was torn down (or renamed).
    Unmounted { component: String, instance: u64 },

    /// A tracked effect's component committed a render.
    Effect {
        effect: String,
        instance: u64,
        info: EffectDebugInfo,
    },
}

impl DebugRecord {
    /// The component or effect name the record is about.
    pub fn name(&self) -> &str {
        match self {
            DebugRecord::Mounted { component, .. }
            | DebugRecord::Rendered { component, .. }
            | DebugRecord::Unmounted { component, .. } => component,
            DebugRecord::Effect { effect, .. } => effect,
        }
    }

    pub fn instance(&self) -> u64 {
        match self {
            DebugRecord::Mounted { instance, .. }
            | DebugRecord::Rendered { instance, .. }
            | DebugRecord::Unmounted { instance, .. }
            | DebugRecord::Effect { instance, .. } => *instance,
        }
    }

    /// The change set carried by per-render records.
    pub fn changes(&self) -> Option<&ChangeSet> {
        match self {
            DebugRecord::Rendered { info, .. } => Some(&info.changed_props),
            DebugRecord::Effect { info, .. } => Some(&info.changed_deps),
            _ => None,
        }
    }

    /// Whether the record should stand out: a per-render record with
    /// changes, or an effect record whose dependency list changed length.
    pub fn highlight(&self) -> bool {
        match self {
            DebugRecord::Rendered { info, .. } => info.has_changes(),
            DebugRecord::Effect { info, .. } => info.is_notable(),
            _ => false,
        }
    }

    /// Render the record as a JSON object string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
