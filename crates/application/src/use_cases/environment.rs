//! Environment use cases

use courier_domain::environment::Environment;

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::KeyValueStore;
use crate::state::{AppState, Document, StateStore};

/// Makes an environment active, or clears the selection.
pub struct SwitchEnvironment<K: KeyValueStore + ?Sized> {
    store: StateStore<K>,
}

impl<K: KeyValueStore + ?Sized> SwitchEnvironment<K> {
    /// Creates a new `SwitchEnvironment` use case.
    pub const fn new(store: StateStore<K>) -> Self {
        Self { store }
    }

    /// Executes the use case. `None` deactivates interpolation.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown environment, or a storage error.
    pub async fn execute(&self, state: &mut AppState, key: Option<&str>) -> ApplicationResult<()> {
        let selected = match key {
            Some(key) => Some(
                state
                    .environment(key)
                    .ok_or_else(|| ApplicationError::NotFound(format!("environment '{key}'")))?
                    .id,
            ),
            None => None,
        };
        state.active_environment = selected;
        self.store.save(Document::ActiveEnvironment, state).await?;
        Ok(())
    }
}

/// Sets a variable, creating the environment when it does not exist.
pub struct SetVariable<K: KeyValueStore + ?Sized> {
    store: StateStore<K>,
}

impl<K: KeyValueStore + ?Sized> SetVariable<K> {
    /// Creates a new `SetVariable` use case.
    pub const fn new(store: StateStore<K>) -> Self {
        Self { store }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns `Invalid` for an empty key, or a storage error.
    pub async fn execute(
        &self,
        state: &mut AppState,
        environment: &str,
        key: &str,
        value: &str,
    ) -> ApplicationResult<()> {
        if key.trim().is_empty() {
            return Err(ApplicationError::Invalid("variable key is empty".into()));
        }

        if let Some(env) = state.environment_mut(environment) {
            env.set(key, value);
        } else {
            let mut env = Environment::new(environment);
            env.set(key, value);
            tracing::info!(environment = %environment, "created environment");
            state.environments.push(env);
        }

        self.store.save(Document::Environments, state).await?;
        Ok(())
    }
}

/// Deletes an environment, clearing the selection if it was active.
pub struct DeleteEnvironment<K: KeyValueStore + ?Sized> {
    store: StateStore<K>,
}

impl<K: KeyValueStore + ?Sized> DeleteEnvironment<K> {
    /// Creates a new `DeleteEnvironment` use case.
    pub const fn new(store: StateStore<K>) -> Self {
        Self { store }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown environment, or a storage error.
    pub async fn execute(&self, state: &mut AppState, key: &str) -> ApplicationResult<()> {
        let id = state
            .environment(key)
            .ok_or_else(|| ApplicationError::NotFound(format!("environment '{key}'")))?
            .id;
        state.environments.retain(|env| env.id != id);
        self.store.save(Document::Environments, state).await?;

        if state.active_environment == Some(id) {
            state.active_environment = None;
            self.store.save(Document::ActiveEnvironment, state).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::MapStore;
    use std::sync::Arc;

    fn store() -> StateStore<MapStore> {
        StateStore::new(Arc::new(MapStore::default()))
    }

    #[tokio::test]
    async fn test_set_variable_creates_environment() {
        let store = store();
        let mut state = AppState::default();

        SetVariable::new(store.clone())
            .execute(&mut state, "dev", "host", "localhost")
            .await
            .unwrap();
        SetVariable::new(store.clone())
            .execute(&mut state, "dev", "host", "127.0.0.1")
            .await
            .unwrap();

        assert_eq!(state.environments.len(), 1);
        assert_eq!(state.environments[0].resolve("host"), Some("127.0.0.1"));
        assert_eq!(store.load().await.environments, state.environments);
    }

    #[tokio::test]
    async fn test_set_variable_rejects_empty_key() {
        let mut state = AppState::default();
        let result = SetVariable::new(store())
            .execute(&mut state, "dev", "  ", "x")
            .await;
        assert!(matches!(result, Err(ApplicationError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_switch_and_delete() {
        let store = store();
        let mut state = AppState::default();
        state.environments.push(Environment::new("prod"));

        SwitchEnvironment::new(store.clone())
            .execute(&mut state, Some("prod"))
            .await
            .unwrap();
        assert_eq!(state.active_environment().map(|e| e.name.as_str()), Some("prod"));

        let missing = SwitchEnvironment::new(store.clone())
            .execute(&mut state, Some("nope"))
            .await;
        assert!(matches!(missing, Err(ApplicationError::NotFound(_))));

        DeleteEnvironment::new(store.clone())
            .execute(&mut state, "prod")
            .await
            .unwrap();
        assert!(state.environments.is_empty());
        assert_eq!(state.active_environment, None);
        assert_eq!(store.load().await.active_environment, None);
    }
}
