//! Header set serialization.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// A mapping from header name to value.
///
/// Names are kept exactly as provided (no case folding) and are unique:
/// inserting an existing name replaces its value. The host receives the set
/// as a JSON object of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderSet(BTreeMap<String, String>);

impl HeaderSet {
    /// Creates an empty header set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header, returning the set for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a header, returning the previous value for that exact name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    /// Looks up a header by its exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns true if a header with this exact name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs.
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    /// Serializes the set for lending.
    ///
    /// Never returns zero bytes: an empty set encodes as `{}`.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; with string keys and values this
    /// does not happen in practice.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.0)
    }

    /// Parses a set from the JSON object encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not a JSON object of strings.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes).map(Self)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a HeaderSet {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_encodes_as_empty_object() {
        let bytes = HeaderSet::new().to_bytes().unwrap();
        assert_eq!(bytes, b"{}");
    }

    #[test]
    fn names_are_case_sensitive() {
        let headers = HeaderSet::new()
            .with("Accept", "application/json")
            .with("accept", "text/plain");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("Accept"), Some("application/json"));
        assert_eq!(headers.get("ACCEPT"), None);
    }

    #[test]
    fn insert_replaces_existing_name() {
        let mut headers = HeaderSet::new();
        assert_eq!(headers.insert("User-Agent", "a"), None);
        assert_eq!(headers.insert("User-Agent", "b"), Some("a".to_string()));
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("User-Agent"), Some("b"));
    }

    #[test]
    fn bytes_round_trip_preserves_every_pair() {
        let headers: HeaderSet = [
            ("Authorization", "Bearer t0k&n"),
            ("Content-Type", "application/json"),
            ("X-Empty", ""),
            ("x-lower", "<v>"),
        ]
        .into_iter()
        .collect();

        let bytes = headers.to_bytes().unwrap();
        let decoded = HeaderSet::from_bytes(&bytes).unwrap();

        assert_eq!(decoded, headers);
        assert_eq!(decoded.len(), 4);
    }

    #[test]
    fn encoding_is_a_plain_json_object() {
        let headers = HeaderSet::new().with("Accept", "a&b");
        let value: serde_json::Value = serde_json::from_slice(&headers.to_bytes().unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({"Accept": "a&b"}));
    }

    #[test]
    fn from_bytes_rejects_non_string_values() {
        assert!(HeaderSet::from_bytes(br#"{"Accept": 1}"#).is_err());
        assert!(HeaderSet::from_bytes(b"[]").is_err());
    }

    #[test]
    fn deserializes_from_module_input() {
        let headers: HeaderSet = serde_json::from_str(r#"{"X-Trace": "1"}"#).unwrap();
        assert!(headers.contains("X-Trace"));
        assert_eq!((&headers).into_iter().count(), 1);
    }
}
