//! Error types for the inspection hooks.
//!
//! Inspection is a side channel: none of these errors are fatal to the host
//! component, but misuse (a dependency list that changes length, hooks called
//! in a different order between renders) is reported instead of silently
//! producing misaligned diagnostics.

use thiserror::Error;

/// Result type alias using [`InspectError`].
pub type Result<T> = std::result::Result<T, InspectError>;

/// Errors raised by trackers, hooks and the component host.
#[derive(Debug, Error)]
pub enum InspectError {
    /// A dependency list changed length between renders.
    #[error("dependency list changed length between renders: expected {expected}, found {found}")]
    DependencyArity { expected: usize, found: usize },

    /// A retained-state slot holds a different type than the hook expects.
    #[error("hook order changed between renders: slot {index} holds a different type")]
    HookOrder { index: usize },

    /// A render was requested after the component unmounted.
    #[error("component {component} is unmounted")]
    Unmounted { component: String },

    /// Configuration could not be parsed.
    #[error("invalid inspect configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A configuration environment variable is set but not valid unicode.
    #[error("environment variable {var} is not valid unicode")]
    InvalidEnv { var: &'static str },
}
