//! Request header types

use serde::{Deserialize, Serialize};

/// A single header entry with key and value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// The header name (e.g., "Content-Type")
    pub key: String,
    /// The header value (e.g., "application/json")
    pub value: String,
    /// Whether this header is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl Header {
    /// Creates a new enabled header.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Creates a new disabled header.
    #[must_use]
    pub fn disabled(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: false,
        }
    }

    /// Returns true if the header takes part in a dispatched request.
    #[must_use]
    pub fn is_materialized(&self) -> bool {
        self.enabled && !self.key.trim().is_empty()
    }
}

/// An ordered list of headers.
///
/// Keys need not be unique; insertion order is preserved so that
/// generated snippets are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers {
    items: Vec<Header>,
}

impl Headers {
    /// Creates an empty header list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends a header.
    pub fn add(&mut self, header: Header) {
        self.items.push(header);
    }

    /// Appends an enabled header built from key and value.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.push(Header::new(key, value));
    }

    /// Returns the enabled headers with a non-empty key, duplicates included.
    pub fn materialized(&self) -> impl Iterator<Item = &Header> {
        self.items.iter().filter(|h| h.is_materialized())
    }

    /// Returns true if an enabled header with this key exists (case-insensitive).
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.materialized().any(|h| h.key.eq_ignore_ascii_case(key))
    }

    /// Returns all headers (enabled and disabled).
    #[must_use]
    pub fn all(&self) -> &[Header] {
        &self.items
    }

    /// Returns mutable access to the underlying list.
    pub fn all_mut(&mut self) -> &mut Vec<Header> {
        &mut self.items
    }

    /// Returns the number of headers.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const in stable
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Header> for Headers {
    fn from_iter<T: IntoIterator<Item = Header>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_creation() {
        let header = Header::new("Content-Type", "application/json");
        assert_eq!(header.key, "Content-Type");
        assert_eq!(header.value, "application/json");
        assert!(header.enabled);
    }

    #[test]
    fn test_materialized_skips_disabled_and_blank_keys() {
        let mut headers = Headers::new();
        headers.add(Header::new("Accept", "application/json"));
        headers.add(Header::disabled("X-Debug", "true"));
        headers.add(Header::new("  ", "orphan"));
        headers.add(Header::new("Accept", "text/plain"));

        let keys: Vec<_> = headers.materialized().map(|h| h.value.as_str()).collect();
        assert_eq!(keys, vec!["application/json", "text/plain"]);
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let mut headers = Headers::new();
        headers.push("content-type", "text/xml");
        headers.add(Header::disabled("Authorization", "x"));
        assert!(headers.contains("Content-Type"));
        assert!(!headers.contains("authorization"));
    }
}
