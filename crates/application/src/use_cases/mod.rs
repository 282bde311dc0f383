//! Application use cases (business logic orchestration).

mod collection;
mod environment;
mod send_request;

pub use collection::{DeleteFromCollection, SaveToCollection};
pub use environment::{DeleteEnvironment, SetVariable, SwitchEnvironment};
pub use send_request::SendRequest;
