//! Courier Application - Use cases and ports
//!
//! This crate contains the application logic that orchestrates domain
//! types and defines the ports implemented by the infrastructure layer.

pub mod error;
pub mod execute_request;
pub mod ports;
pub mod state;
pub mod use_cases;
pub mod variable_resolver;

pub use error::{ApplicationError, ApplicationResult};
pub use execute_request::{ExecuteOptions, RequestExecutor, classify_body};
pub use state::{AppState, Document, StateStore};
