//! The Solr request parameter multimap.

use serde::{Deserialize, Serialize};

/// An insertion-ordered, string-keyed multimap of Solr request parameters.
///
/// This mirrors the shape of standard Solr HTTP query parameters: keys like
/// `fq`, `hl.fl` and `facet.query` may repeat, while keys like `sort` and
/// `group` carry a single value. [`set`](QueryParams::set) replaces every
/// existing value for a key; [`add`](QueryParams::add) appends another one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    entries: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        QueryParams::default()
    }

    /// Replace every value of `key` with a single value.
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        self.entries.retain(|(k, _)| *k != key);
        self.entries.push((key, value.into()));
    }

    /// Append a value for `key`, keeping any existing ones.
    pub fn add<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.entries.push((key.into(), value.into()));
    }

    /// Get the first value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get every value of `key`, in insertion order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Check whether any value is present for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Remove every value of `key`, returning the removed values.
    pub fn remove(&mut self, key: &str) -> Vec<String> {
        self.remove_matching(|k, _| k == key)
            .into_iter()
            .map(|(_, v)| v)
            .collect()
    }

    /// Remove the first value of `key`, returning it.
    pub fn take_first(&mut self, key: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Remove every entry matching the predicate, returning the removed
    /// entries in insertion order.
    pub fn remove_matching<F>(&mut self, mut predicate: F) -> Vec<(String, String)>
    where
        F: FnMut(&str, &str) -> bool,
    {
        let mut removed = Vec::new();
        self.entries.retain(|(k, v)| {
            if predicate(k, v) {
                removed.push((k.clone(), v.clone()));
                false
            } else {
                true
            }
        });
        removed
    }

    /// Iterate over all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the parameter set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        QueryParams {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
