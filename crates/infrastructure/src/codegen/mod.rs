//! Code snippet generation.
//!
//! Turns a [`RequestSpec`](courier_domain::request::RequestSpec) into
//! ready-to-run code for a target language and client library.

pub mod escape;
mod generator;

pub(crate) use generator::{FtpTarget, mongo_namespace};
pub use generator::{CodeGenerator, generate, generate_snippet};
