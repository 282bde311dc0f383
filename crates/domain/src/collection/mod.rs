//! Saved request collections

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::request::RequestSpec;

/// A named, ordered group of saved requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Unique identifier
    pub id: Uuid,
    /// Collection name
    pub name: String,
    /// Requests in this collection
    #[serde(default)]
    pub requests: Vec<RequestSpec>,
}

impl Collection {
    /// Creates a new empty collection.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            requests: Vec::new(),
        }
    }

    /// Appends a request.
    pub fn add(&mut self, request: RequestSpec) {
        self.requests.push(request);
    }

    /// Replaces the request with the same id, appending it when absent.
    /// Returns true if an existing request was replaced.
    pub fn replace(&mut self, request: RequestSpec) -> bool {
        if let Some(slot) = self.requests.iter_mut().find(|r| r.id == request.id) {
            *slot = request;
            true
        } else {
            self.requests.push(request);
            false
        }
    }

    /// Removes a request by id.
    pub fn remove(&mut self, id: Uuid) -> Option<RequestSpec> {
        let index = self.requests.iter().position(|r| r.id == id)?;
        Some(self.requests.remove(index))
    }

    /// Finds a request by id or by name.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&RequestSpec> {
        self.requests
            .iter()
            .find(|r| r.id.to_string() == key || r.name == key)
    }

    /// Returns the number of requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns true if the collection has no requests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_find() {
        let mut collection = Collection::new("Users API");
        collection.add(RequestSpec::get("https://api.test/users").with_name("List users"));

        assert_eq!(collection.len(), 1);
        assert!(collection.find("List users").is_some());
        assert!(collection.find("missing").is_none());
    }

    #[test]
    fn test_replace_by_id() {
        let mut collection = Collection::new("c");
        let request = RequestSpec::get("https://a.test");
        let id = request.id;
        collection.add(request);

        let mut updated = RequestSpec::get("https://b.test");
        updated.id = id;
        assert!(collection.replace(updated));
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.requests[0].url, "https://b.test");

        assert!(!collection.replace(RequestSpec::get("https://c.test")));
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut collection = Collection::new("c");
        let request = RequestSpec::get("https://a.test");
        let id = request.id;
        collection.add(request);

        assert!(collection.remove(id).is_some());
        assert!(collection.remove(id).is_none());
        assert!(collection.is_empty());
    }
}
