//! Dispatch by request mode.

use std::sync::Arc;

use courier_application::ports::{ExecuteFuture, HttpClient, HttpClientError};
use courier_domain::{codegen::RequestMode, request::RequestSpec};

use super::{ReqwestHttpClient, SimulatedProtocolClient};

/// Sends rest mode requests through the HTTP transport and everything
/// else through the simulated one.
#[derive(Clone)]
pub struct ProtocolRouter {
    http: Arc<dyn HttpClient>,
    simulated: Arc<dyn HttpClient>,
}

impl ProtocolRouter {
    /// Creates a router over the given transports.
    #[must_use]
    pub fn new(http: Arc<dyn HttpClient>, simulated: Arc<dyn HttpClient>) -> Self {
        Self { http, simulated }
    }

    /// Creates a router using reqwest for HTTP and canned FTP/DB replies.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, HttpClientError> {
        Ok(Self::new(
            Arc::new(ReqwestHttpClient::new()?),
            Arc::new(SimulatedProtocolClient::new()),
        ))
    }

    fn transport(&self, mode: RequestMode) -> &dyn HttpClient {
        match mode {
            RequestMode::Rest => self.http.as_ref(),
            RequestMode::Ftp | RequestMode::MongoQuery | RequestMode::SqlQuery => {
                self.simulated.as_ref()
            }
        }
    }
}

impl std::fmt::Debug for ProtocolRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtocolRouter").finish_non_exhaustive()
    }
}

impl HttpClient for ProtocolRouter {
    fn execute<'a>(&'a self, request: &'a RequestSpec) -> ExecuteFuture<'a> {
        let mode = RequestMode::of(request);
        tracing::debug!(mode = %mode, "routing request");
        self.transport(mode).execute(request)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use courier_domain::request::HttpMethod;
    use courier_domain::response::ResponseSpec;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    struct Fixed(u16);

    impl HttpClient for Fixed {
        fn execute<'a>(&'a self, _request: &'a RequestSpec) -> ExecuteFuture<'a> {
            let status = self.0;
            Box::pin(async move {
                Ok(ResponseSpec::new(status, Vec::new(), Vec::new(), Duration::ZERO))
            })
        }
    }

    fn router() -> ProtocolRouter {
        ProtocolRouter::new(Arc::new(Fixed(200)), Arc::new(Fixed(299)))
    }

    #[tokio::test]
    async fn test_routes_by_mode() {
        let router = router();
        let cases = [
            (RequestSpec::get("https://a.test"), 200),
            (RequestSpec::post("ftp://files.test/x"), 299),
            (
                RequestSpec::with_method(HttpMethod::MongoQuery, "mongodb://h/db"),
                299,
            ),
            (
                RequestSpec::with_method(HttpMethod::SqlQuery, "postgres://h/db"),
                299,
            ),
        ];
        for (request, expected) in cases {
            let response = router.execute(&request).await.expect("should respond");
            assert_eq!(response.status, expected, "{}", request.url);
        }
    }

    #[tokio::test]
    async fn test_default_router_simulates_sql() {
        let router = ProtocolRouter::with_defaults().expect("router should build");
        let request = RequestSpec::with_method(HttpMethod::SqlQuery, "postgres://h/db");
        let response = router.execute(&request).await.expect("should respond");
        assert_eq!(response.header("x-courier-simulated"), Some("true"));
    }
}
