//! In-memory key-value store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use courier_application::ports::{KeyValueStore, StoreError};

/// Key-value store kept in memory, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored keys, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use courier_application::{AppState, Document, StateStore};
    use courier_domain::settings::ThemeMode;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_state_store_roundtrip() {
        let backend = Arc::new(MemoryKeyValueStore::new());
        let store = StateStore::new(Arc::clone(&backend));

        let mut state = AppState::default();
        state.theme = ThemeMode::Light;
        store.save(Document::Theme, &state).await.unwrap();

        assert_eq!(backend.keys().await, vec!["courier.theme".to_string()]);
        assert_eq!(store.load().await.theme, ThemeMode::Light);

        store.reset(Document::Theme).await.unwrap();
        assert_eq!(store.load().await.theme, ThemeMode::default());
    }
}
