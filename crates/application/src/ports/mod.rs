//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod http_client;
mod key_value_store;
mod transformer;

pub use http_client::{ExecuteFuture, HttpClient, HttpClientError};
pub use key_value_store::{KeyValueStore, StoreError};
pub use transformer::ResponseTransformer;
