//! Courier Domain - Core business types
//!
//! This crate defines the domain model for the Courier API client.
//! All types here are pure Rust with no I/O dependencies.

pub mod codegen;
pub mod collection;
pub mod environment;
pub mod error;
pub mod history;
pub mod id;
pub mod query;
pub mod request;
pub mod response;
pub mod settings;
pub mod table;

pub use codegen::{CodeSnippet, CodeTarget, RequestMode};
pub use collection::Collection;
pub use environment::{Environment, Variable};
pub use error::{DomainError, DomainResult};
pub use history::{HISTORY_LIMIT, HistoryItem, RequestHistory};
pub use id::generate_id;
pub use query::{Criterion, CriterionPatch, MatchType, Operator, QueryState, QuickOp};
pub use request::{BodyType, Header, Headers, HttpMethod, RequestSpec};
pub use response::{
    ExecutionFailure, ExecutionOutcome, RequestErrorKind, ResponseBody, ResponseSpec,
    reason_phrase,
};
pub use settings::{ThemeMode, UserProfile};
pub use table::{ServerQuery, SortDirection, SortSpec, TableMode};
