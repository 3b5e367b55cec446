//! Parameter store
//!
//! Insertion-ordered map of endpoint parameters as produced by the upstream
//! query-string parser. Values are JSON values so callers can hand over either
//! raw strings or already-typed values.

use serde::{Deserialize, Serialize};
use serde_json::Map;

/// A single parameter value (string, number, bool, ...)
pub type ParameterValue = serde_json::Value;

/// Ordered `key -> value` parameters with prefix-group extraction.
///
/// Keys are unique and case-sensitive. Backed by `serde_json::Map`, which
/// keeps insertion order with the `preserve_order` feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterStore {
    entries: Map<String, ParameterValue>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter. An existing key keeps its position and gets the new value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> Option<ParameterValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&ParameterValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a single parameter and return its value. The others keep their order.
    pub fn remove(&mut self, key: &str) -> Option<ParameterValue> {
        self.entries.shift_remove(key)
    }

    /// Whether at least one key starts with `prefix`
    pub fn has_properties(&self, prefix: &str) -> bool {
        self.entries.keys().any(|key| key.starts_with(prefix))
    }

    /// Remove every parameter whose key starts with `prefix`.
    ///
    /// The returned store is keyed by the suffix (prefix stripped) and keeps
    /// the relative order of the extracted entries. When nothing matches the
    /// result is empty and `self` is left untouched.
    pub fn extract_properties(&mut self, prefix: &str) -> ParameterStore {
        let mut extracted = ParameterStore::new();
        let mut kept = Map::new();

        for (key, value) in std::mem::take(&mut self.entries) {
            match key.strip_prefix(prefix) {
                Some(suffix) => {
                    extracted.insert(suffix, value);
                }
                None => {
                    kept.insert(key, value);
                }
            }
        }

        self.entries = kept;
        extracted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl From<Map<String, ParameterValue>> for ParameterStore {
    fn from(entries: Map<String, ParameterValue>) -> Self {
        Self { entries }
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterStore
where
    K: Into<String>,
    V: Into<ParameterValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = ParameterStore::new();
        store.extend(iter);
        store
    }
}

impl<K, V> Extend<(K, V)> for ParameterStore
where
    K: Into<String>,
    V: Into<ParameterValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for ParameterStore {
    type Item = (String, ParameterValue);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
