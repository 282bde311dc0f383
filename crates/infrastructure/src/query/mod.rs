//! JSON query engine.
//!
//! Everything here works on an already parsed [`serde_json::Value`] and
//! never performs I/O:
//!
//! - [`discover_fields`] samples rows and lists bounded dotted paths,
//! - [`CompiledQuery`] and [`filter`] evaluate criteria under AND/OR,
//! - [`quick_search`] handles the one-line search box,
//! - [`apply_quick_op`] and [`flatten`] reshape values.
//!
//! ```
//! use courier_infrastructure::query::{flatten, quick_search};
//! use serde_json::json;
//!
//! let rows = json!([{"status": "active", "id": 1}, {"status": "idle", "id": 2}]);
//! assert_eq!(quick_search(&rows, "status=active"), json!([{"status": "active", "id": 1}]));
//! assert_eq!(flatten(&json!({"a": {"b": 1}})), json!({"a.b": 1}));
//! ```

mod discover;
mod filter;
mod quick;
mod render;
mod value;

pub use discover::{MAX_NESTED_KEYS, MAX_SEGMENTS, SAMPLE_LIMIT, discover_fields};
pub use filter::{CompiledQuery, filter};
pub use quick::{QuickSearch, apply_quick_op, quick_search};
pub use render::{to_js_snippet, to_transform_script};
pub use value::{display, flatten, numeric, resolve_path};
