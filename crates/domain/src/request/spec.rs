//! Request descriptor type

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BodyType, Header, Headers, HttpMethod};

/// Complete description of one HTTP, FTP or database call before dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Unique identifier for this request
    pub id: Uuid,
    /// Human-readable name
    pub name: String,
    /// Request method
    pub method: HttpMethod,
    /// Target URL (may contain variable placeholders)
    pub url: String,
    /// Request headers
    #[serde(default)]
    pub headers: Headers,
    /// Raw request body
    #[serde(default)]
    pub body: String,
    /// How the body is interpreted
    #[serde(default)]
    pub body_type: BodyType,
}

impl RequestSpec {
    /// Creates a new request with default values.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            method: HttpMethod::default(),
            url: String::new(),
            headers: Headers::new(),
            body: String::new(),
            body_type: BodyType::default(),
        }
    }

    /// Creates a request with the given method and URL.
    #[must_use]
    pub fn with_method(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Self::new("New Request")
        }
    }

    /// Creates a GET request with the given URL.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::with_method(HttpMethod::Get, url)
    }

    /// Creates a POST request with the given URL.
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::with_method(HttpMethod::Post, url)
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the body and its type.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>, body_type: BodyType) -> Self {
        self.body = body.into();
        self.body_type = body_type;
        self
    }

    /// Appends an enabled header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(Header::new(key, value));
        self
    }

    /// Returns the body to send, or `None` when the method cannot carry
    /// one or the body is empty.
    #[must_use]
    pub fn effective_body(&self) -> Option<&str> {
        if self.method.carries_body() && !self.body.is_empty() {
            Some(&self.body)
        } else {
            None
        }
    }

    /// Returns the content type to add when no explicit header sets one.
    #[must_use]
    pub fn implied_content_type(&self) -> Option<&'static str> {
        self.effective_body()?;
        if self.headers.contains("content-type") {
            return None;
        }
        self.body_type.content_type()
    }
}

impl Default for RequestSpec {
    fn default() -> Self {
        Self::new("New Request")
    }
}
