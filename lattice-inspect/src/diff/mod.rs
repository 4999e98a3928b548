//! Change Detection
//!
//! This module implements shallow change detection for the values a
//! component renders with: its props and the dependency lists of its
//! effects.
//!
//! # Concepts
//!
//! ## Values
//!
//! A [`Value`] is compared the way a script runtime compares with `!==`:
//! primitives by value, objects and functions by identity. There is no deep
//! equality; two distinct objects with identical contents are different.
//!
//! ## Snapshots
//!
//! A [`Snapshot`] is the tracked input of one render. [`Deps`] is an ordered
//! list reported by position (`dep-#0`, `dep-#1`, ...); [`Props`] is a named
//! mapping reported by key.
//!
//! ## Trackers
//!
//! A [`ChangeTracker`] keeps exactly one snapshot, the one from the last
//! committed render, and produces a [`ChangeSet`] for each new render.

mod value;
mod change_set;
mod snapshot;
mod tracker;

pub use value::{Value, Symbol, ObjectRef, FunctionRef, ForeignRef};
pub use change_set::{Change, ChangeSet, dep_key, DEP_KEY_PREFIX};
pub use snapshot::{ArityPolicy, Deps, Props, Snapshot};
pub use tracker::{ChangeTracker, DepsTracker, PropsTracker};
