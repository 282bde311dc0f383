//! Stable JSON output for files on disk.
//!
//! Documents are written with 2-space indentation and a trailing newline
//! so that saved state diffs cleanly between sessions.

mod json;

pub use json::{SerializationError, from_json, to_json_stable};
