//! Classified result of one executed request.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::spec::duration_millis;

/// Response body after content-type classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum ResponseBody {
    /// Parsed JSON document.
    Json(Value),
    /// XML text, tagged but not parsed.
    Xml(String),
    /// Anything else, as text.
    Text(String),
}

impl ResponseBody {
    /// Returns the JSON value if the body was classified as JSON.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the raw text for XML and text bodies.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Xml(text) | Self::Text(text) => Some(text),
        }
    }

    /// Returns the body rendered for display (JSON pretty-printed).
    #[must_use]
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Self::Xml(text) | Self::Text(text) => text.clone(),
        }
    }

    /// Returns the short kind name.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Json(_) => "json",
            Self::Xml(_) => "xml",
            Self::Text(_) => "text",
        }
    }
}

impl Default for ResponseBody {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// Categories of request errors for user-friendly display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestErrorKind {
    /// Invalid URL format.
    InvalidUrl,
    /// DNS resolution failed.
    DnsError,
    /// Could not establish connection.
    ConnectionFailed,
    /// Connection was refused by the server.
    ConnectionRefused,
    /// TLS/SSL error.
    TlsError,
    /// Invalid request body.
    InvalidBody,
    /// Too many redirects.
    TooManyRedirects,
    /// Unknown or unexpected error.
    Unknown,
}

impl RequestErrorKind {
    /// Returns user-friendly suggestions for this error type.
    #[must_use]
    pub const fn suggestions(&self) -> &[&'static str] {
        match self {
            Self::InvalidUrl => &[
                "Check that the URL starts with http://, https:// or ftp://",
                "Verify there are no typos in the URL",
            ],
            Self::DnsError => &[
                "Check if the hostname is correct",
                "Verify your internet connection",
            ],
            Self::ConnectionFailed | Self::ConnectionRefused => &[
                "Check if the server is running",
                "Verify the port number is correct",
            ],
            Self::TlsError => &[
                "The server's SSL certificate may be invalid",
                "Verify the hostname matches the certificate",
            ],
            Self::InvalidBody => &["Check that the body matches its body type"],
            Self::TooManyRedirects => &[
                "The server may have a redirect loop",
                "Try the final URL directly",
            ],
            Self::Unknown => &["Check the error details for more information"],
        }
    }

    /// Returns a human-readable title for this error type.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "Invalid URL",
            Self::DnsError => "DNS Resolution Failed",
            Self::ConnectionFailed => "Connection Failed",
            Self::ConnectionRefused => "Connection Refused",
            Self::TlsError => "SSL/TLS Error",
            Self::InvalidBody => "Invalid Request Body",
            Self::TooManyRedirects => "Too Many Redirects",
            Self::Unknown => "Unknown Error",
        }
    }
}

/// Why a call produced no response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionFailure {
    /// Error category.
    pub kind: RequestErrorKind,
    /// Human-readable message.
    pub message: String,
}

/// Everything the execution driver reports about one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    /// Status code, 0 when the call failed.
    pub status: u16,
    /// Status text.
    pub status_text: String,
    /// Response headers.
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    /// Classified (and possibly transformed) body.
    pub body: ResponseBody,
    /// Measured latency.
    #[serde(with = "duration_millis")]
    pub duration: Duration,
    /// Raw body size in bytes.
    pub size: usize,
    /// Whether a transform script replaced the parsed body.
    #[serde(default)]
    pub transformed: bool,
    /// Failure details for calls that produced no response.
    #[serde(default)]
    pub error: Option<ExecutionFailure>,
}

impl ExecutionOutcome {
    /// Builds the synthetic outcome recorded for a failed call.
    #[must_use]
    pub fn failed(kind: RequestErrorKind, message: impl Into<String>, duration: Duration) -> Self {
        let message = message.into();
        Self {
            status: 0,
            status_text: kind.title().to_string(),
            headers: Vec::new(),
            body: ResponseBody::Json(serde_json::json!({ "error": message })),
            duration,
            size: 0,
            transformed: false,
            error: Some(ExecutionFailure { kind, message }),
        }
    }

    /// Returns the latency in whole milliseconds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn duration_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }
}
