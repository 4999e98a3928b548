//! Instance identity and lifecycle state.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a mounted component instance.
///
/// Two instances of the same component get different IDs, which lets
/// diagnostics from sibling instances be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Generate a new unique instance ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a component instance is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Created, never committed.
    Uninitialized,

    /// At least one render has committed.
    Mounted,

    /// Torn down. Retained state has been released.
    Unmounted,
}
