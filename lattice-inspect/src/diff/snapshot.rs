//! Snapshots
//!
//! A snapshot is the tracked input of one render: either an ordered
//! dependency list ([`Deps`]) or a named prop mapping ([`Props`]). The
//! [`Snapshot`] trait computes the [`ChangeSet`] between two snapshots of the
//! same kind.
//!
//! # Dependency lists
//!
//! Positions are compared pairwise and reported as `dep-#<index>`. A list
//! is expected to keep its length for the lifetime of a component; what
//! happens when it does not is decided by the [`ArityPolicy`].
//!
//! # Props
//!
//! Keys are compared over the union of both mappings, with a missing key
//! read as `undefined`. A key missing from one side and `undefined` on the
//! other is therefore not a change.

use indexmap::IndexMap;
use serde::Serialize;
use smallvec::SmallVec;

use super::change_set::{dep_key, Change, ChangeSet};
use super::value::Value;
use crate::error::{InspectError, Result};

/// How a dependency tracker treats a list whose length changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArityPolicy {
    /// Report [`InspectError::DependencyArity`].
    #[default]
    Strict,
    /// Compare over the longer list, reading missing positions as `undefined`.
    Lenient,
}

/// Tracked input that can be diffed against its previous version.
pub trait Snapshot: Clone + Send + 'static {
    /// Compute the changes from `previous` to `current`.
    fn diff(previous: &Self, current: &Self, policy: ArityPolicy) -> Result<ChangeSet>;
}

/// An ordered dependency list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Deps(SmallVec<[Value; 8]>);

impl Deps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.0.push(value.into());
    }

    /// Pairwise identity comparison, as used to decide whether an effect re-runs.
    pub fn same_values(&self, other: &Deps) -> bool {
        self.len() == other.len()
            && self.0.iter().zip(other.0.iter()).all(|(a, b)| a.same_value(b))
    }
}

impl From<&[Value]> for Deps {
    fn from(values: &[Value]) -> Self {
        Self(values.iter().cloned().collect())
    }
}

impl From<Vec<Value>> for Deps {
    fn from(values: Vec<Value>) -> Self {
        Self(SmallVec::from_vec(values))
    }
}

impl FromIterator<Value> for Deps {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Snapshot for Deps {
    fn diff(previous: &Self, current: &Self, policy: ArityPolicy) -> Result<ChangeSet> {
        if previous.len() != current.len() && policy == ArityPolicy::Strict {
            return Err(InspectError::DependencyArity {
                expected: previous.len(),
                found: current.len(),
            });
        }

        let mut changes = ChangeSet::new();
        let undefined = Value::Undefined;
        for index in 0..previous.len().max(current.len()) {
            let before = previous.get(index).unwrap_or(&undefined);
            let after = current.get(index).unwrap_or(&undefined);
            if !after.strict_eq(before) {
                changes.insert(dep_key(index), Change::new(before.clone(), after.clone()));
            }
        }
        Ok(changes)
    }
}

/// A named prop mapping, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Props(IndexMap<String, Value>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Snapshot for Props {
    fn diff(previous: &Self, current: &Self, _policy: ArityPolicy) -> Result<ChangeSet> {
        let mut changes = ChangeSet::new();
        let undefined = Value::Undefined;

        // Current keys first, then keys that only existed before.
        let removed = previous.keys().filter(|key| !current.0.contains_key(*key));
        for key in current.keys().chain(removed) {
            let before = previous.get(key).unwrap_or(&undefined);
            let after = current.get(key).unwrap_or(&undefined);
            if !after.strict_eq(before) {
                changes.insert(key, Change::new(before.clone(), after.clone()));
            }
        }
        Ok(changes)
    }
}

/// Build a [`Deps`] list from expressions convertible into [`Value`].
#[macro_export]
macro_rules! deps {
    () => { $crate::diff::Deps::new() };
    ($($value:expr),+ $(,)?) => {
        <$crate::diff::Deps as ::std::iter::FromIterator<$crate::diff::Value>>::from_iter(
            [$($crate::diff::Value::from($value)),+]
        )
    };
}

/// Build [`Props`] from `key => value` pairs.
#[macro_export]
macro_rules! props {
    () => { $crate::diff::Props::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::diff::Props::new()$(.with($key, $value))+
    };
}
