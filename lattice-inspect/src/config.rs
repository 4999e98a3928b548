//! Inspection Configuration
//!
//! Controls which diagnostic records are emitted and how strictly dependency
//! lists are validated. Configuration is plain data: it can be built in code,
//! parsed from JSON, or read from the `LATTICE_INSPECT` environment variable.

use std::env::VarError;

use serde::{Deserialize, Serialize};

use crate::diff::ArityPolicy;
use crate::error::{InspectError, Result};

/// Environment variable holding a JSON-encoded [`InspectConfig`].
pub const CONFIG_ENV_VAR: &str = "LATTICE_INSPECT";

/// Settings shared by every hook created from one `Inspector`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    /// Emit diagnostic records at all. Trackers keep running when disabled.
    pub enabled: bool,

    /// Only emit per-render records when the change set is non-empty.
    /// Mount and unmount markers are always emitted.
    pub log_only_on_change: bool,

    /// Reject dependency lists that change length between renders.
    pub strict_dependency_arity: bool,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_only_on_change: false,
            strict_dependency_arity: true,
        }
    }
}

impl InspectConfig {
    /// Parse configuration from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read configuration from [`CONFIG_ENV_VAR`], or defaults when unset
    /// or blank. A value that is not valid unicode is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_var(std::env::var(CONFIG_ENV_VAR))
    }

    fn from_var(var: std::result::Result<String, VarError>) -> Result<Self> {
        match var {
            Ok(json) if json.trim().is_empty() => Ok(Self::default()),
            Ok(json) => Self::from_json(&json),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(VarError::NotUnicode(_)) => Err(InspectError::InvalidEnv {
                var: CONFIG_ENV_VAR,
            }),
        }
    }

    /// The arity policy dependency trackers should use.
    pub fn arity_policy(&self) -> ArityPolicy {
        if self.strict_dependency_arity {
            ArityPolicy::Strict
        } else {
            ArityPolicy::Lenient
        }
    }
}
