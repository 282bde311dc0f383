//! Response transform language.
//!
//! A declarative pipeline applied to parsed JSON response bodies in place
//! of arbitrary user code:
//!
//! ```
//! use courier_infrastructure::scripting::TransformEngine;
//! use serde_json::json;
//!
//! let body = json!({"items": [{"id": 2}, {"id": 1}]});
//! let out = TransformEngine::new().run("get items\nsort id\nlimit 1", &body);
//! assert_eq!(out, Ok(json!([{"id": 1}])));
//! ```

mod executor;
mod parser;

pub use executor::TransformEngine;
pub use parser::{TransformError, TransformScript, TransformStep, parse_transform};
