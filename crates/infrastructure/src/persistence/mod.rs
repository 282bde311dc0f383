//! Key-value store adapters.

mod file_store;
mod memory_store;

pub use file_store::{FileKeyValueStore, default_data_dir};
pub use memory_store::MemoryKeyValueStore;
