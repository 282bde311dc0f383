//! Send request use case

use courier_domain::{request::RequestSpec, response::ExecutionOutcome, table::ServerQuery};

use crate::execute_request::{ExecuteOptions, RequestExecutor};
use crate::ports::{HttpClient, KeyValueStore};
use crate::state::{AppState, Document, StateStore};

/// Executes a request against the active environment and persists the
/// resulting history and last-used request.
pub struct SendRequest<C: HttpClient + ?Sized, K: KeyValueStore + ?Sized> {
    executor: RequestExecutor<C>,
    store: StateStore<K>,
}

impl<C: HttpClient + ?Sized, K: KeyValueStore + ?Sized> SendRequest<C, K> {
    /// Creates a new `SendRequest` use case.
    pub const fn new(executor: RequestExecutor<C>, store: StateStore<K>) -> Self {
        Self { executor, store }
    }

    /// Executes the use case.
    ///
    /// Storage failures are logged and do not affect the returned outcome.
    pub async fn execute(
        &self,
        state: &mut AppState,
        request: &RequestSpec,
        transform: Option<&str>,
    ) -> ExecutionOutcome {
        self.execute_with_query(state, request, transform, None).await
    }

    /// Executes the use case with server-side table state merged into the
    /// request body. The last-used request is stored without the query.
    pub async fn execute_with_query(
        &self,
        state: &mut AppState,
        request: &RequestSpec,
        transform: Option<&str>,
        server_query: Option<&ServerQuery>,
    ) -> ExecutionOutcome {
        // The state document is the source of truth; the executor history is replaced whole.
        *self.executor.history().lock().await = state.history.clone();

        let options = ExecuteOptions {
            environment: state.active_environment(),
            transform,
            server_query,
        };
        let outcome = self.executor.execute(request, options).await;

        state.history = self.executor.history_snapshot().await;
        state.config = request.clone();

        for document in [Document::History, Document::Config] {
            if let Err(e) = self.store.save(document, state).await {
                tracing::warn!(document = %document, error = %e, "failed to persist document");
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{ExecuteFuture, HttpClientError};
    use crate::state::tests::MapStore;
    use courier_domain::{environment::Environment, response::ResponseSpec};
    use std::sync::Arc;
    use std::time::Duration;

    struct EchoUrl;

    impl HttpClient for EchoUrl {
        fn execute<'a>(&'a self, request: &'a RequestSpec) -> ExecuteFuture<'a> {
            let body = request.url.clone().into_bytes();
            Box::pin(async move {
                Ok::<_, HttpClientError>(ResponseSpec::new(
                    200,
                    vec![("Content-Type".into(), "text/plain".into())],
                    body,
                    Duration::from_millis(1),
                ))
            })
        }
    }

    #[tokio::test]
    async fn test_send_uses_active_environment_and_persists() {
        let backend = Arc::new(MapStore::default());
        let store = StateStore::new(Arc::clone(&backend));
        let use_case = SendRequest::new(RequestExecutor::new(Arc::new(EchoUrl)), store.clone());

        let mut state = AppState::default();
        let mut env = Environment::new("dev");
        env.set("host", "api.test");
        state.active_environment = Some(env.id);
        state.environments.push(env);

        let request = RequestSpec::get("https://{{host}}/ping");
        let outcome = use_case.execute(&mut state, &request, None).await;

        assert_eq!(
            outcome.body.as_text(),
            Some("https://api.test/ping")
        );
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.config.url, "https://{{host}}/ping");

        let reloaded = store.load().await;
        assert_eq!(reloaded.history, state.history);
        assert_eq!(reloaded.config, state.config);
    }

    #[tokio::test]
    async fn test_send_appends_to_existing_history() {
        let store = StateStore::new(Arc::new(MapStore::default()));
        let use_case = SendRequest::new(RequestExecutor::new(Arc::new(EchoUrl)), store);
        let mut state = AppState::default();

        use_case
            .execute(&mut state, &RequestSpec::get("https://a.test/1"), None)
            .await;
        use_case
            .execute(&mut state, &RequestSpec::get("https://a.test/2"), None)
            .await;

        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history.entries()[0].request.url, "https://a.test/2");
    }
}
