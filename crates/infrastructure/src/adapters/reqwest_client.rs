//! HTTP client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port for rest mode requests.

use std::time::Instant;

use courier_application::ports::{ExecuteFuture, HttpClient, HttpClientError};
use courier_domain::{
    request::{BodyType, HttpMethod, RequestSpec},
    response::ResponseSpec,
};
use reqwest::{Client, Method, Url};

const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// Wraps `reqwest::Client`. Requests are sent exactly as described: the
/// caller has already interpolated variables and dropped GET/HEAD bodies.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "Courier/0.1.0"
    /// - No request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("Courier/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    ///
    /// FTP and database methods never reach this adapter through the
    /// router; they are still sent verbatim as extension methods.
    fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
            other => Method::from_bytes(other.as_str().as_bytes()).unwrap_or(Method::POST),
        }
    }

    /// Encodes the body for the wire.
    ///
    /// JSON bodies must parse; form bodies hold one `key=value` per line
    /// and are URL-encoded. Everything else is sent as written.
    fn encode_body(body: &str, body_type: BodyType) -> Result<String, HttpClientError> {
        match body_type {
            BodyType::Json => {
                serde_json::from_str::<serde_json::Value>(body)
                    .map_err(|e| HttpClientError::InvalidBody(format!("Invalid JSON: {e}")))?;
                Ok(body.to_string())
            }
            BodyType::Form => {
                let fields: Vec<(&str, &str)> = body
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(|line| line.split_once('=').unwrap_or((line, "")))
                    .collect();
                serde_urlencoded::to_string(&fields)
                    .map_err(|e| HttpClientError::InvalidBody(e.to_string()))
            }
            BodyType::Text | BodyType::Xml | BodyType::Query => Ok(body.to_string()),
        }
    }

    /// Maps reqwest errors to the port's `HttpClientError`.
    fn map_error(error: &reqwest::Error) -> HttpClientError {
        let host = error
            .url()
            .and_then(Url::host_str)
            .unwrap_or("unknown")
            .to_string();

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        if error.is_connect() {
            let message = error_chain(error);
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") || lower.contains("lookup") {
                return HttpClientError::DnsError { host, message };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host,
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            if lower.contains("certificate") || lower.contains("tls") {
                return HttpClientError::Tls(message);
            }
            return HttpClientError::ConnectionFailed(message);
        }

        HttpClientError::Other(error_chain(error))
    }
}

/// Joins an error with its sources, since reqwest keeps the useful part
/// (resolver or socket error) in the chain.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(&'a self, request: &'a RequestSpec) -> ExecuteFuture<'a> {
        Box::pin(async move {
            let url = request.url.trim();
            let parsed_url =
                Url::parse(url).map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {url}")))?;

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(request.method), parsed_url);

            for header in request.headers.materialized() {
                builder = builder.header(header.key.trim(), &header.value);
            }

            if let Some(content_type) = request.implied_content_type() {
                builder = builder.header("Content-Type", content_type);
            }

            if let Some(body) = request.effective_body() {
                builder = builder.body(Self::encode_body(body, request.body_type)?);
            }

            tracing::debug!(method = %request.method, url, "sending request");
            let start = Instant::now();

            let response = builder.send().await.map_err(|e| Self::map_error(&e))?;
            let status = response.status().as_u16();

            let headers: Vec<(String, String)> = response
                .headers()
                .iter()
                .map(|(k, v)| {
                    (
                        k.to_string(),
                        String::from_utf8_lossy(v.as_bytes()).into_owned(),
                    )
                })
                .collect();

            let body = response
                .bytes()
                .await
                .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?
                .to_vec();

            Ok(ResponseSpec::new(status, headers, body, start.elapsed()))
        })
    }
}
