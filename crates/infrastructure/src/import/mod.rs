//! Import Module
//!
//! Turns pasted text into a partial request: a curl command line, a SOAP
//! envelope, a JSON document or plain text.

mod curl;
mod soap;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use courier_domain::request::{BodyType, Header, HttpMethod, RequestSpec};

pub use curl::{parse_curl, tokenize};
pub use soap::{SoapVersion, detect_soap, parse_soap};

/// Import error types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImportError {
    /// Nothing to import
    #[error("Nothing to import")]
    Empty,
    /// The curl command names no URL
    #[error("curl command has no URL")]
    MissingUrl,
    /// A quote was opened but never closed
    #[error("Unterminated {0} quote in curl command")]
    UnterminatedQuote(char),
    /// A flag that takes a value ended the command
    #[error("Missing value for {0}")]
    MissingValue(String),
    /// The method given with -X is not supported
    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),
}

/// Detected import format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportFormat {
    /// curl command line
    Curl,
    /// SOAP 1.1 envelope
    Soap11,
    /// SOAP 1.2 envelope
    Soap12,
    /// JSON document
    Json,
    /// Anything else
    Text,
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Curl => write!(f, "curl"),
            Self::Soap11 => write!(f, "SOAP 1.1"),
            Self::Soap12 => write!(f, "SOAP 1.2"),
            Self::Json => write!(f, "JSON"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// A partial request produced by an import. Unset fields leave the
/// target request untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDraft {
    /// Request method.
    pub method: Option<HttpMethod>,
    /// Target URL.
    pub url: Option<String>,
    /// Headers in command order, duplicates included.
    pub headers: Vec<Header>,
    /// Raw body.
    pub body: Option<String>,
    /// Body interpretation.
    pub body_type: Option<BodyType>,
}

impl RequestDraft {
    /// Merges the draft into a request.
    ///
    /// Existing headers whose key (case-insensitive) appears in the draft
    /// are dropped and every draft header is appended.
    pub fn apply_to(&self, request: &mut RequestSpec) {
        if let Some(method) = self.method {
            request.method = method;
        }
        if let Some(url) = &self.url {
            request.url.clone_from(url);
        }
        if let Some(body) = &self.body {
            request.body.clone_from(body);
        }
        if let Some(body_type) = self.body_type {
            request.body_type = body_type;
        }
        if !self.headers.is_empty() {
            request.headers.all_mut().retain(|existing| {
                !self
                    .headers
                    .iter()
                    .any(|h| h.key.eq_ignore_ascii_case(&existing.key))
            });
            for header in &self.headers {
                request.headers.add(header.clone());
            }
        }
    }
}

/// Result of importing pasted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedRequest {
    /// What the input was recognised as.
    pub format: ImportFormat,
    /// The partial request.
    pub draft: RequestDraft,
}

/// Recognises and parses pasted text.
///
/// # Errors
///
/// Returns an error for empty input or a malformed curl command.
pub fn import_text(input: &str) -> Result<ImportedRequest, ImportError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ImportError::Empty);
    }

    if is_curl(trimmed) {
        let draft = parse_curl(trimmed)?;
        tracing::debug!(url = ?draft.url, "imported curl command");
        return Ok(ImportedRequest {
            format: ImportFormat::Curl,
            draft,
        });
    }

    if let Some(version) = detect_soap(trimmed) {
        let format = match version {
            SoapVersion::V11 => ImportFormat::Soap11,
            SoapVersion::V12 => ImportFormat::Soap12,
        };
        return Ok(ImportedRequest {
            format,
            draft: parse_soap(trimmed, version),
        });
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        let body = serde_json::to_string_pretty(&value).unwrap_or_else(|_| trimmed.to_string());
        return Ok(ImportedRequest {
            format: ImportFormat::Json,
            draft: RequestDraft {
                body: Some(body),
                body_type: Some(BodyType::Json),
                ..RequestDraft::default()
            },
        });
    }

    Ok(ImportedRequest {
        format: ImportFormat::Text,
        draft: RequestDraft {
            body: Some(trimmed.to_string()),
            body_type: Some(BodyType::Text),
            ..RequestDraft::default()
        },
    })
}

fn is_curl(input: &str) -> bool {
    input
        .strip_prefix("curl")
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_curl_scenario() {
        let imported = import_text(
            r#"curl --location --request POST 'https://api.test/x' --header 'Authorization: Bearer t' --data-raw '{"a":1}'"#,
        );
        assert_eq!(
            imported,
            Ok(ImportedRequest {
                format: ImportFormat::Curl,
                draft: RequestDraft {
                    method: Some(HttpMethod::Post),
                    url: Some("https://api.test/x".to_string()),
                    headers: vec![Header::new("Authorization", "Bearer t")],
                    body: Some(r#"{"a":1}"#.to_string()),
                    body_type: Some(BodyType::Json),
                },
            })
        );
    }

    #[test]
    fn test_json_is_pretty_printed() {
        let imported = import_text(r#"{"a":[1,2]}"#);
        assert_eq!(
            imported.map(|i| (i.format, i.draft.body)),
            Ok((
                ImportFormat::Json,
                Some("{\n  \"a\": [\n    1,\n    2\n  ]\n}".to_string())
            ))
        );
    }

    #[test]
    fn test_text_fallback() {
        let imported = import_text("  curly hair  ");
        assert_eq!(
            imported.map(|i| (i.format, i.draft.body, i.draft.body_type)),
            Ok((
                ImportFormat::Text,
                Some("curly hair".to_string()),
                Some(BodyType::Text)
            ))
        );
        assert_eq!(import_text(" \n "), Err(ImportError::Empty));
    }

    #[test]
    fn test_apply_to_merges_headers_by_key() {
        let mut request = RequestSpec::get("https://old.test")
            .with_header("Authorization", "keep")
            .with_header("content-type", "application/json");

        let draft = RequestDraft {
            method: Some(HttpMethod::Post),
            headers: vec![
                Header::new("Content-Type", "text/xml"),
                Header::new("X-Tag", "1"),
                Header::new("X-Tag", "2"),
            ],
            body: Some("<a/>".to_string()),
            body_type: Some(BodyType::Xml),
            ..RequestDraft::default()
        };
        draft.apply_to(&mut request);

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://old.test");
        assert_eq!(request.body, "<a/>");
        let headers: Vec<_> = request
            .headers
            .all()
            .iter()
            .map(|h| (h.key.as_str(), h.value.as_str()))
            .collect();
        assert_eq!(
            headers,
            vec![
                ("Authorization", "keep"),
                ("Content-Type", "text/xml"),
                ("X-Tag", "1"),
                ("X-Tag", "2")
            ]
        );
    }
}
