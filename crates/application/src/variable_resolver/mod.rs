//! Variable interpolation
//!
//! Replaces `{{key}}` placeholders with values from the active
//! environment. Unresolved placeholders are kept verbatim.
//!
//! # Usage
//!
//! ```
//! use courier_application::variable_resolver::VariableResolver;
//! use courier_domain::environment::Environment;
//!
//! let mut env = Environment::new("development");
//! env.set("host", "localhost");
//!
//! let resolver = VariableResolver::new(Some(&env));
//! let result = resolver.resolve("http://{{host}}/api/{{version}}");
//! assert_eq!(result.resolved, "http://localhost/api/{{version}}");
//! assert_eq!(result.unresolved, vec!["version"]);
//! ```

pub mod engine;
pub mod parser;

pub use engine::{ResolutionResult, VariableResolver, interpolate};
pub use parser::{VariableReference, parse_variables};
