//! Bounded field discovery over sampled JSON rows.

use indexmap::IndexSet;
use serde_json::{Map, Value};

/// Number of array elements inspected.
pub const SAMPLE_LIMIT: usize = 50;
/// Nested objects with this many keys or more are treated as leaves.
pub const MAX_NESTED_KEYS: usize = 10;
/// Paths never grow beyond this many segments.
pub const MAX_SEGMENTS: usize = 3;

/// Lists the dotted field paths found in the first [`SAMPLE_LIMIT`]
/// elements of an array, or in the value itself.
///
/// Paths are unique and in first-seen order. Non-object samples
/// contribute nothing.
#[must_use]
pub fn discover_fields(value: &Value) -> Vec<String> {
    let mut fields = IndexSet::new();
    let samples: &[Value] = match value {
        Value::Array(items) => &items[..items.len().min(SAMPLE_LIMIT)],
        other => std::slice::from_ref(other),
    };

    for sample in samples {
        if let Value::Object(map) = sample {
            walk(&mut fields, "", 0, map);
        }
    }

    fields.into_iter().collect()
}

fn walk(fields: &mut IndexSet<String>, prefix: &str, depth: usize, map: &Map<String, Value>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        let segments = depth + 1;
        match value {
            Value::Object(nested)
                if !nested.is_empty()
                    && nested.len() < MAX_NESTED_KEYS
                    && segments < MAX_SEGMENTS =>
            {
                walk(fields, &path, segments, nested);
            }
            _ => {
                fields.insert(path);
            }
        }
    }
}
