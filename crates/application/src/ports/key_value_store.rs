//! Key-value storage port

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used by this store.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// A document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// String-keyed blob storage. Values are JSON text.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    /// Returns an error if the underlying storage cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the value cannot be written.
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes the value under `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns an error if the underlying storage cannot be modified.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
