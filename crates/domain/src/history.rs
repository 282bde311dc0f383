//! Request History Domain Model
//!
//! Defines the structure for tracking executed requests.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::request::RequestSpec;

/// Maximum number of history entries kept.
pub const HISTORY_LIMIT: usize = 50;

/// A single entry in the request history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Unique identifier for this entry.
    pub id: String,
    /// When the request completed.
    pub timestamp: DateTime<Utc>,
    /// Snapshot of the dispatched request.
    pub request: RequestSpec,
    /// Response status code; 0 for calls that failed before a response.
    pub response_status: u16,
    /// Request duration in milliseconds.
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

impl HistoryItem {
    /// Creates a new history entry stamped with the current time.
    #[must_use]
    pub fn new(request: RequestSpec, response_status: u16, duration_ms: Option<u64>) -> Self {
        Self {
            id: crate::generate_id(),
            timestamp: Utc::now(),
            request,
            response_status,
            duration_ms,
        }
    }

    /// Returns true if the call never produced a response.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.response_status == 0
    }

    /// Returns a human-readable "time ago" string.
    #[must_use]
    pub fn time_ago(&self) -> String {
        let duration = Utc::now().signed_duration_since(self.timestamp);

        if duration.num_seconds() < 60 {
            "just now".to_string()
        } else if duration.num_minutes() < 60 {
            let mins = duration.num_minutes();
            format!("{mins}m ago")
        } else if duration.num_hours() < 24 {
            let hours = duration.num_hours();
            format!("{hours}h ago")
        } else if duration.num_days() < 7 {
            let days = duration.num_days();
            format!("{days}d ago")
        } else {
            self.timestamp.format("%Y-%m-%d").to_string()
        }
    }

    /// Returns the duration as a display string.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_display(&self) -> String {
        match self.duration_ms {
            Some(ms) if ms < 1000 => format!("{ms}ms"),
            Some(ms) => format!("{:.1}s", ms as f64 / 1000.0),
            None => "-".to_string(),
        }
    }
}

/// Newest-first request history capped at [`HISTORY_LIMIT`] entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct RequestHistory {
    entries: VecDeque<HistoryItem>,
}

impl RequestHistory {
    /// Creates a new empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Adds an entry at the front, evicting the oldest beyond the cap.
    pub fn add(&mut self, entry: HistoryItem) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_LIMIT);
    }

    /// Returns all entries (newest first).
    #[must_use]
    pub const fn entries(&self) -> &VecDeque<HistoryItem> {
        &self.entries
    }

    /// Returns an entry by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Removes an entry by ID.
    pub fn remove(&mut self, id: &str) -> Option<HistoryItem> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        self.entries.remove(index)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(url: &str, status: u16) -> HistoryItem {
        HistoryItem::new(RequestSpec::get(url), status, Some(10))
    }

    #[test]
    fn test_history_item_creation() {
        let entry = item("https://api.example.com", 200);
        assert_eq!(entry.response_status, 200);
        assert!(!entry.is_failure());
        assert!(item("https://x", 0).is_failure());
    }

    #[test]
    fn test_history_cap_keeps_newest() {
        let mut history = RequestHistory::new();

        for i in 0..(HISTORY_LIMIT + 7) {
            history.add(item(&format!("https://example.com/{i}"), 200));
        }

        assert_eq!(history.len(), HISTORY_LIMIT);
        let newest = format!("https://example.com/{}", HISTORY_LIMIT + 6);
        assert_eq!(history.entries()[0].request.url, newest);
        assert_eq!(history.entries()[HISTORY_LIMIT - 1].request.url, "https://example.com/7");
    }

    #[test]
    fn test_get_and_remove() {
        let mut history = RequestHistory::new();
        let entry = item("https://example.com", 201);
        let id = entry.id.clone();
        history.add(entry);

        assert!(history.get(&id).is_some());
        assert!(history.remove(&id).is_some());
        assert!(history.is_empty());
    }

    #[test]
    fn test_duration_display() {
        assert_eq!(item("https://x", 200).duration_display(), "10ms");
        let slow = HistoryItem::new(RequestSpec::get("https://x"), 200, Some(1500));
        assert_eq!(slow.duration_display(), "1.5s");
        let failed = HistoryItem::new(RequestSpec::get("https://x"), 0, None);
        assert_eq!(failed.duration_display(), "-");
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let mut history = RequestHistory::new();
        history.add(item("https://x", 200));
        let json = serde_json::to_value(&history).unwrap_or_default();
        assert!(json.is_array());
    }
}
