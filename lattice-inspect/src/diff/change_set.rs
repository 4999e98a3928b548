//! Change Sets
//!
//! A [`ChangeSet`] records which tracked values differ between two renders.
//! Entries keep insertion order so diagnostics list props in the order the
//! component declared them and dependencies by ascending index.

use indexmap::IndexMap;
use serde::Serialize;

use super::value::Value;

/// Prefix of the synthetic keys used for dependency-list positions.
pub const DEP_KEY_PREFIX: &str = "dep-#";

/// The change-set key for position `index` of a dependency list.
pub fn dep_key(index: usize) -> String {
    format!("{}{}", DEP_KEY_PREFIX, index)
}

/// One changed value: what it was at the previous commit and what it is now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change {
    pub previous: Value,
    #[serde(rename = "new")]
    pub current: Value,
}

impl Change {
    pub fn new(previous: Value, current: Value) -> Self {
        Self { previous, current }
    }
}

/// Identifier → change, for the identifiers whose values differ.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChangeSet {
    entries: IndexMap<String, Change>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change. A later insert for the same key replaces the earlier one.
    pub fn insert(&mut self, key: impl Into<String>, change: Change) {
        self.entries.insert(key.into(), change);
    }

    pub fn get(&self, key: &str) -> Option<&Change> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Change)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render the change set as a JSON object string for log fields.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = (&'a String, &'a Change);
    type IntoIter = indexmap::map::Iter<'a, String, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
