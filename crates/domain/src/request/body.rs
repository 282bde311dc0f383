//! Request body type tag

use serde::{Deserialize, Serialize};

/// How the raw request body is interpreted.
///
/// The tag is set explicitly; the body content is never sniffed to
/// change it except by the import surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    /// JSON document
    #[default]
    Json,
    /// Plain text
    Text,
    /// XML document (including SOAP envelopes)
    Xml,
    /// Database query object or statement
    Query,
    /// URL-encoded form, one `key=value` per line
    Form,
}

impl BodyType {
    /// Returns the content type implied by this body type, if any.
    #[must_use]
    pub const fn content_type(self) -> Option<&'static str> {
        match self {
            Self::Json => Some("application/json"),
            Self::Text => Some("text/plain"),
            Self::Xml => Some("text/xml"),
            Self::Form => Some("application/x-www-form-urlencoded"),
            Self::Query => None,
        }
    }

    /// Returns the lowercase name of this body type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Xml => "xml",
            Self::Query => "query",
            Self::Form => "form",
        }
    }
}

impl std::str::FromStr for BodyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "xml" | "soap" => Ok(Self::Xml),
            "query" => Ok(Self::Query),
            "form" => Ok(Self::Form),
            other => Err(format!("unknown body type: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type() {
        assert_eq!(BodyType::Json.content_type(), Some("application/json"));
        assert_eq!(BodyType::Query.content_type(), None);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("SOAP".parse::<BodyType>(), Ok(BodyType::Xml));
        assert!("yaml".parse::<BodyType>().is_err());
    }
}
