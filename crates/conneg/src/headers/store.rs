//! Ordered, case-insensitive, multi-valued header store.
//!
//! This is the engine's only read dependency on the transport layer: whatever
//! parsed the wire format hands raw name/value pairs to [`HttpHeaders`], and
//! the negotiator reads them back by name.

use indexmap::IndexMap;

/// An ordered multi-map of raw header name/value pairs.
///
/// Names are normalized on every access (`FOO_BAR`, `foo-bar` and `Foo-Bar`
/// address the same entry), insertion order of distinct names is preserved,
/// and a name may hold multiple values in insertion order.
#[derive(Debug, Clone, Default)]
pub struct HttpHeaders {
    values: IndexMap<String, Vec<String>>,
}

/// Normalizes a header name: underscores become hyphens, then each
/// hyphen-separated token is capitalized (`FOO_BAR` → `Foo-Bar`).
fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    for (i, token) in name.replace('_', "-").split('-').enumerate() {
        if i > 0 {
            normalized.push('-');
        }
        let mut chars = token.chars();
        if let Some(first) = chars.next() {
            normalized.extend(first.to_uppercase());
            normalized.extend(chars.flat_map(char::to_lowercase));
        }
    }
    normalized
}

impl HttpHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header to a single value, replacing any existing values.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(normalize_name(name), vec![value.into()]);
    }

    /// Appends one more occurrence of a header, preserving existing values.
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        self.values.entry(normalize_name(name)).or_default().push(value.into());
    }

    /// Returns all values for a header in insertion order, or an empty slice.
    pub fn get(&self, name: &str) -> &[String] {
        self.values.get(&normalize_name(name)).map_or(&[], Vec::as_slice)
    }

    /// Returns the first value for a header, if any.
    pub fn get_first(&self, name: &str) -> Option<&str> {
        self.get(name).first().map(String::as_str)
    }

    /// Returns true if the header is present under any casing.
    pub fn contains_key(&self, name: &str) -> bool {
        self.values.contains_key(&normalize_name(name))
    }

    /// Removes a header and all its values, preserving the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.values.shift_remove(&normalize_name(name))
    }

    /// Returns the number of distinct header names.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(normalized name, values)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.values.iter().map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}
