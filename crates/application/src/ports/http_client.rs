//! Transport port
//!
//! Every protocol family (HTTP, FTP, database) dispatches through this trait.

use std::future::Future;
use std::pin::Pin;

use courier_domain::{RequestErrorKind, request::RequestSpec, response::ResponseSpec};
use thiserror::Error;

/// Errors a transport can report instead of a response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Host name resolution failed.
    #[error("could not resolve host '{host}': {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying message.
        message: String,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// Any other connection-level failure.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// TLS negotiation failed.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Redirect limit exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// The configured limit.
        max: usize,
    },

    /// The request body could not be built.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Maps the error to its display category.
    #[must_use]
    pub const fn to_error_kind(&self) -> RequestErrorKind {
        match self {
            Self::InvalidUrl(_) => RequestErrorKind::InvalidUrl,
            Self::DnsError { .. } => RequestErrorKind::DnsError,
            Self::ConnectionRefused { .. } => RequestErrorKind::ConnectionRefused,
            Self::ConnectionFailed(_) => RequestErrorKind::ConnectionFailed,
            Self::Tls(_) => RequestErrorKind::TlsError,
            Self::TooManyRedirects { .. } => RequestErrorKind::TooManyRedirects,
            Self::InvalidBody(_) => RequestErrorKind::InvalidBody,
            Self::Other(_) => RequestErrorKind::Unknown,
        }
    }
}

/// Future returned by [`HttpClient::execute`].
pub type ExecuteFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + 'a>>;

/// Port for dispatching a fully interpolated request.
///
/// Implementations must not attach a body to GET or HEAD requests.
pub trait HttpClient: Send + Sync {
    /// Executes the request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained.
    fn execute<'a>(&'a self, request: &'a RequestSpec) -> ExecuteFuture<'a>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_mapping() {
        let err = HttpClientError::ConnectionRefused {
            host: "localhost".into(),
            port: 1,
        };
        assert_eq!(err.to_error_kind(), RequestErrorKind::ConnectionRefused);
        assert_eq!(err.to_string(), "connection refused by localhost:1");
        assert_eq!(
            HttpClientError::Other("boom".into()).to_error_kind(),
            RequestErrorKind::Unknown
        );
    }
}
