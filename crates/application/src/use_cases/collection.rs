//! Collection use cases

use courier_domain::{collection::Collection, request::RequestSpec};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::KeyValueStore;
use crate::state::{AppState, Document, StateStore};

/// Saves a request into a collection, creating the collection if needed.
/// A request whose id is already present is replaced in place.
pub struct SaveToCollection<K: KeyValueStore + ?Sized> {
    store: StateStore<K>,
}

impl<K: KeyValueStore + ?Sized> SaveToCollection<K> {
    /// Creates a new `SaveToCollection` use case.
    pub const fn new(store: StateStore<K>) -> Self {
        Self { store }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns a storage error if the collections cannot be persisted.
    pub async fn execute(
        &self,
        state: &mut AppState,
        collection: &str,
        request: RequestSpec,
    ) -> ApplicationResult<()> {
        if let Some(existing) = state.collection_mut(collection) {
            existing.replace(request);
        } else {
            let mut created = Collection::new(collection);
            created.add(request);
            state.collections.push(created);
        }
        self.store.save(Document::Collections, state).await?;
        Ok(())
    }
}

/// Removes a request (by id or name) from a collection.
pub struct DeleteFromCollection<K: KeyValueStore + ?Sized> {
    store: StateStore<K>,
}

impl<K: KeyValueStore + ?Sized> DeleteFromCollection<K> {
    /// Creates a new `DeleteFromCollection` use case.
    pub const fn new(store: StateStore<K>) -> Self {
        Self { store }
    }

    /// Executes the use case and returns the removed request.
    ///
    /// # Errors
    /// Returns `NotFound` if the collection or request does not exist.
    pub async fn execute(
        &self,
        state: &mut AppState,
        collection: &str,
        request: &str,
    ) -> ApplicationResult<RequestSpec> {
        let target = state
            .collection_mut(collection)
            .ok_or_else(|| ApplicationError::NotFound(format!("collection '{collection}'")))?;
        let id = target
            .find(request)
            .ok_or_else(|| ApplicationError::NotFound(format!("request '{request}'")))?
            .id;
        let removed = target
            .remove(id)
            .ok_or_else(|| ApplicationError::NotFound(format!("request '{request}'")))?;

        self.store.save(Document::Collections, state).await?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::MapStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_save_then_delete() {
        let store = StateStore::new(Arc::new(MapStore::default()));
        let mut state = AppState::default();
        let request = RequestSpec::get("https://a.test").with_name("ping");

        SaveToCollection::new(store.clone())
            .execute(&mut state, "smoke", request.clone())
            .await
            .unwrap();
        SaveToCollection::new(store.clone())
            .execute(&mut state, "smoke", request)
            .await
            .unwrap();
        assert_eq!(state.collections.len(), 1);
        assert_eq!(state.collections[0].len(), 1);
        assert_eq!(store.load().await.collections, state.collections);

        let removed = DeleteFromCollection::new(store.clone())
            .execute(&mut state, "smoke", "ping")
            .await
            .unwrap();
        assert_eq!(removed.name, "ping");
        assert!(state.collections[0].is_empty());

        let missing = DeleteFromCollection::new(store)
            .execute(&mut state, "other", "ping")
            .await;
        assert!(matches!(missing, Err(ApplicationError::NotFound(_))));
    }
}
