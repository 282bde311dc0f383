//! Courier Infrastructure - Adapters and engines
//!
//! This crate provides concrete implementations of the ports defined in
//! the application layer, plus the pure engines that work on requests and
//! response bodies: snippet generation, JSON querying, table projection,
//! the transform language and text import.

pub mod adapters;
pub mod codegen;
pub mod import;
pub mod persistence;
pub mod query;
pub mod scripting;
pub mod serialization;
pub mod table;

pub use adapters::{ProtocolRouter, ReqwestHttpClient, SimulatedProtocolClient};
pub use codegen::{CodeGenerator, generate, generate_snippet};
pub use import::{ImportError, ImportFormat, ImportedRequest, RequestDraft, import_text};
pub use persistence::{FileKeyValueStore, MemoryKeyValueStore, default_data_dir};
pub use query::{discover_fields, filter, flatten, quick_search};
pub use scripting::{TransformEngine, TransformError, parse_transform};
pub use serialization::{SerializationError, from_json, to_json_stable};
pub use table::{Table, TableView};
