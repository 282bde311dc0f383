//! Persisted application state
//!
//! [`AppState`] aggregates every document the client persists. Each
//! document loads and saves independently through a [`KeyValueStore`],
//! and a document that is missing or fails to parse falls back to its
//! default instead of failing the whole load.

use std::fmt;
use std::sync::Arc;

use courier_domain::{
    collection::Collection,
    environment::Environment,
    history::RequestHistory,
    request::RequestSpec,
    settings::{ThemeMode, UserProfile},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::ports::{KeyValueStore, StoreError};

/// One independently persisted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Document {
    /// Last-used request.
    Config,
    /// Request history.
    History,
    /// Environment list.
    Environments,
    /// Active environment id.
    ActiveEnvironment,
    /// Saved collections.
    Collections,
    /// User profile.
    User,
    /// Theme preference.
    Theme,
}

impl Document {
    /// Returns every document.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Config,
            Self::History,
            Self::Environments,
            Self::ActiveEnvironment,
            Self::Collections,
            Self::User,
            Self::Theme,
        ]
    }

    /// Returns the storage key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Config => "courier.config",
            Self::History => "courier.history",
            Self::Environments => "courier.environments",
            Self::ActiveEnvironment => "courier.active_environment",
            Self::Collections => "courier.collections",
            Self::User => "courier.user",
            Self::Theme => "courier.theme",
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Everything the client persists between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Last-used request.
    pub config: RequestSpec,
    /// Executed requests, newest first.
    pub history: RequestHistory,
    /// Known environments.
    pub environments: Vec<Environment>,
    /// Id of the active environment.
    pub active_environment: Option<Uuid>,
    /// Saved collections.
    pub collections: Vec<Collection>,
    /// Local user profile.
    pub user: UserProfile,
    /// Theme preference.
    pub theme: ThemeMode,
}

impl AppState {
    /// Returns the active environment, if one is set and still exists.
    #[must_use]
    pub fn active_environment(&self) -> Option<&Environment> {
        let id = self.active_environment?;
        self.environments.iter().find(|env| env.id == id)
    }

    /// Finds an environment by id or name.
    #[must_use]
    pub fn environment(&self, key: &str) -> Option<&Environment> {
        self.environments
            .iter()
            .find(|env| env.id.to_string() == key || env.name == key)
    }

    /// Finds an environment by id or name for editing.
    pub fn environment_mut(&mut self, key: &str) -> Option<&mut Environment> {
        self.environments
            .iter_mut()
            .find(|env| env.id.to_string() == key || env.name == key)
    }

    /// Finds a collection by id or name.
    #[must_use]
    pub fn collection(&self, key: &str) -> Option<&Collection> {
        self.collections
            .iter()
            .find(|c| c.id.to_string() == key || c.name == key)
    }

    /// Finds a collection by id or name for editing.
    pub fn collection_mut(&mut self, key: &str) -> Option<&mut Collection> {
        self.collections
            .iter_mut()
            .find(|c| c.id.to_string() == key || c.name == key)
    }
}

/// Loads and saves [`AppState`] documents through a key-value store.
pub struct StateStore<K: KeyValueStore + ?Sized> {
    store: Arc<K>,
}

impl<K: KeyValueStore + ?Sized> Clone for StateStore<K> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<K: KeyValueStore + ?Sized> StateStore<K> {
    /// Creates a state store over the given backend.
    pub const fn new(store: Arc<K>) -> Self {
        Self { store }
    }

    /// Loads every document, each falling back to its default on failure.
    pub async fn load(&self) -> AppState {
        AppState {
            config: self.read(Document::Config).await,
            history: self.read(Document::History).await,
            environments: self.read(Document::Environments).await,
            active_environment: self.read(Document::ActiveEnvironment).await,
            collections: self.read(Document::Collections).await,
            user: self.read(Document::User).await,
            theme: self.read(Document::Theme).await,
        }
    }

    /// Writes one document.
    ///
    /// # Errors
    /// Returns an error if the document cannot be encoded or stored.
    pub async fn save(&self, document: Document, state: &AppState) -> Result<(), StoreError> {
        match document {
            Document::Config => self.write(document, &state.config).await,
            Document::History => self.write(document, &state.history).await,
            Document::Environments => self.write(document, &state.environments).await,
            Document::ActiveEnvironment => {
                self.write(document, &state.active_environment).await
            }
            Document::Collections => self.write(document, &state.collections).await,
            Document::User => self.write(document, &state.user).await,
            Document::Theme => self.write(document, &state.theme).await,
        }
    }

    /// Writes every document, stopping at the first failure.
    ///
    /// # Errors
    /// Returns the first storage error encountered.
    pub async fn save_all(&self, state: &AppState) -> Result<(), StoreError> {
        for document in Document::all() {
            self.save(*document, state).await?;
        }
        Ok(())
    }

    /// Removes one document so the next load yields its default.
    ///
    /// # Errors
    /// Returns an error if the backend cannot remove the key.
    pub async fn reset(&self, document: Document) -> Result<(), StoreError> {
        self.store.remove(document.key()).await
    }

    async fn read<T: DeserializeOwned + Default>(&self, document: Document) -> T {
        let raw = match self.store.get(document.key()).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                tracing::warn!(document = %document, error = %e, "failed to read document, using default");
                return T::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(document = %document, error = %e, "failed to parse document, using default");
            T::default()
        })
    }

    async fn write<T: Serialize + Sync>(
        &self,
        document: Document,
        value: &T,
    ) -> Result<(), StoreError> {
        let json =
            serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.put(document.key(), &json).await?;
        tracing::debug!(document = %document, "document saved");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use courier_domain::history::HistoryItem;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    /// In-memory store for tests.
    #[derive(Default)]
    pub(crate) struct MapStore {
        pub(crate) entries: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl KeyValueStore for MapStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.entries.lock().await.get(key).cloned())
        }

        async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.entries
                .lock()
                .await
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.entries.lock().await.remove(key);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_load_empty_store_yields_defaults() {
        let store = StateStore::new(Arc::new(MapStore::default()));
        let state = store.load().await;

        assert!(state.history.is_empty());
        assert!(state.environments.is_empty());
        assert_eq!(state.active_environment, None);
        assert_eq!(state.theme, ThemeMode::Dark);
    }

    #[tokio::test]
    async fn test_save_all_then_load_restores_state() {
        let store = StateStore::new(Arc::new(MapStore::default()));

        let mut state = AppState::default();
        let mut env = Environment::new("dev");
        env.set("host", "localhost");
        state.active_environment = Some(env.id);
        state.environments.push(env);
        state
            .history
            .add(HistoryItem::new(RequestSpec::get("https://a.test"), 200, Some(12)));
        state.theme = ThemeMode::Light;
        state.collections.push(Collection::new("Users"));

        store.save_all(&state).await.unwrap();
        let loaded = store.load().await;

        assert_eq!(loaded, state);
        assert_eq!(
            loaded.active_environment().map(|e| e.name.as_str()),
            Some("dev")
        );
    }

    #[tokio::test]
    async fn test_corrupt_document_falls_back_independently() {
        let backend = Arc::new(MapStore::default());
        backend.put(Document::History.key(), "{not json").await.unwrap();
        backend.put(Document::Theme.key(), "\"light\"").await.unwrap();

        let state = StateStore::new(backend).load().await;

        assert!(state.history.is_empty());
        assert_eq!(state.theme, ThemeMode::Light);
    }

    #[tokio::test]
    async fn test_reset_removes_document() {
        let backend = Arc::new(MapStore::default());
        let store = StateStore::new(Arc::clone(&backend));
        let state = AppState {
            theme: ThemeMode::System,
            ..AppState::default()
        };
        store.save(Document::Theme, &state).await.unwrap();
        store.reset(Document::Theme).await.unwrap();

        assert_eq!(store.load().await.theme, ThemeMode::Dark);
        assert!(backend.entries.lock().await.is_empty());
    }

    #[test]
    fn test_document_keys_are_unique() {
        let mut keys: Vec<_> = Document::all().iter().map(|d| d.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), Document::all().len());
    }
}
