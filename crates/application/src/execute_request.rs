//! Execution driver
//!
//! Interpolates a request, dispatches it through the [`HttpClient`] port,
//! classifies and optionally transforms the response body, and records
//! one history entry per call. Network failures never propagate past this
//! boundary: they become a zero-status outcome with a synthetic body.

use std::sync::Arc;
use std::time::Instant;

use courier_domain::{
    environment::Environment,
    history::{HistoryItem, RequestHistory},
    request::{BodyType, HttpMethod, RequestSpec},
    response::{ExecutionOutcome, ResponseBody, ResponseSpec},
    table::ServerQuery,
};
use tokio::sync::Mutex;

use crate::ports::{HttpClient, ResponseTransformer};
use crate::variable_resolver::VariableResolver;

/// Per-call inputs besides the request itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecuteOptions<'a> {
    /// Environment used for `{{key}}` interpolation.
    pub environment: Option<&'a Environment>,
    /// Transform script applied to JSON bodies.
    pub transform: Option<&'a str>,
    /// Server-side table state merged into the outgoing body.
    pub server_query: Option<&'a ServerQuery>,
}

/// Classifies a raw body by its content type.
///
/// JSON content types (including `+json` suffixes) are parsed, falling
/// back to text when parsing fails. Any content type mentioning `xml` is
/// tagged as XML without parsing. Everything else is text.
#[must_use]
pub fn classify_body(content_type: Option<&str>, body: &[u8]) -> ResponseBody {
    let text = || String::from_utf8_lossy(body).into_owned();
    let Some(content_type) = content_type else {
        return ResponseBody::Text(text());
    };

    let is_json = content_type.parse::<mime::Mime>().map_or_else(
        |_| content_type.to_ascii_lowercase().contains("application/json"),
        |m| {
            (m.type_() == mime::APPLICATION && m.subtype() == mime::JSON)
                || m.suffix().is_some_and(|suffix| suffix == mime::JSON)
        },
    );

    if is_json {
        return serde_json::from_slice(body).map_or_else(
            |_| ResponseBody::Text(text()),
            ResponseBody::Json,
        );
    }

    if content_type.to_ascii_lowercase().contains("xml") {
        ResponseBody::Xml(text())
    } else {
        ResponseBody::Text(text())
    }
}

/// Folds server-side filter and sort state into the request body. A
/// bodyless method becomes POST so the query reaches the server.
fn with_server_query(request: &RequestSpec, query: &ServerQuery) -> RequestSpec {
    let mut merged = request.clone();
    merged.body = query.merge_into_body(&request.body);
    merged.body_type = BodyType::Json;
    if !merged.method.carries_body() {
        merged.method = HttpMethod::Post;
    }
    merged
}

/// Builds the request actually handed to the transport.
fn prepare_dispatch(request: &RequestSpec, environment: Option<&Environment>) -> RequestSpec {
    let mut dispatch = VariableResolver::new(environment).resolve_request(request);
    if !dispatch.method.carries_body() {
        dispatch.body.clear();
    }
    if let Some(content_type) = dispatch.implied_content_type() {
        dispatch.headers.push("Content-Type", content_type);
    }
    dispatch
}

/// Executes requests and owns the shared request history.
pub struct RequestExecutor<C: HttpClient + ?Sized> {
    client: Arc<C>,
    transformer: Option<Arc<dyn ResponseTransformer>>,
    history: Arc<Mutex<RequestHistory>>,
}

impl<C: HttpClient + ?Sized> RequestExecutor<C> {
    /// Creates an executor with an empty history and no transformer.
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            transformer: None,
            history: Arc::new(Mutex::new(RequestHistory::new())),
        }
    }

    /// Sets the engine used for transform scripts.
    #[must_use]
    pub fn with_transformer(mut self, transformer: Arc<dyn ResponseTransformer>) -> Self {
        self.transformer = Some(transformer);
        self
    }

    /// Returns the shared history handle.
    #[must_use]
    pub fn history(&self) -> Arc<Mutex<RequestHistory>> {
        Arc::clone(&self.history)
    }

    /// Returns a copy of the current history.
    pub async fn history_snapshot(&self) -> RequestHistory {
        self.history.lock().await.clone()
    }

    /// Executes one request. Never fails: transport errors become a
    /// zero-status outcome, and every call is recorded in history.
    pub async fn execute(
        &self,
        request: &RequestSpec,
        options: ExecuteOptions<'_>,
    ) -> ExecutionOutcome {
        let merged;
        let request = match options.server_query {
            Some(query) => {
                merged = with_server_query(request, query);
                &merged
            }
            None => request,
        };
        let dispatch = prepare_dispatch(request, options.environment);
        tracing::debug!(method = %dispatch.method, url = %dispatch.url, "dispatching request");

        let start = Instant::now();
        let result = self.client.execute(&dispatch).await;
        let elapsed = start.elapsed();

        let outcome = match result {
            Ok(response) => self.complete(response, elapsed, options.transform),
            Err(e) => {
                tracing::warn!(url = %dispatch.url, error = %e, "request failed");
                ExecutionOutcome::failed(e.to_error_kind(), e.to_string(), elapsed)
            }
        };

        tracing::info!(
            method = %dispatch.method,
            url = %dispatch.url,
            status = outcome.status,
            duration_ms = outcome.duration_ms(),
            "request completed"
        );

        let entry = HistoryItem::new(request.clone(), outcome.status, Some(outcome.duration_ms()));
        self.history.lock().await.add(entry);

        outcome
    }

    fn complete(
        &self,
        response: ResponseSpec,
        elapsed: std::time::Duration,
        transform: Option<&str>,
    ) -> ExecutionOutcome {
        let mut body = classify_body(response.content_type(), &response.body);

        let script = transform.filter(|s| !s.trim().is_empty());
        let replacement = match (&body, script, &self.transformer) {
            (ResponseBody::Json(value), Some(script), Some(transformer)) => {
                transformer.transform(script, value).map_or_else(
                    |e| {
                        tracing::warn!(error = %e, "transform failed, keeping parsed body");
                        None
                    },
                    Some,
                )
            }
            _ => None,
        };
        let transformed = replacement.is_some();
        if let Some(value) = replacement {
            body = ResponseBody::Json(value);
        }

        ExecutionOutcome {
            status: response.status,
            status_text: response.status_text,
            size: response.body.len(),
            headers: response.headers,
            body,
            duration: elapsed,
            transformed,
            error: None,
        }
    }
}
