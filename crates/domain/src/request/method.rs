//! Request method enumeration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// Supported request methods.
///
/// Besides the HTTP verbs this covers the FTP commands and the two
/// synthetic database query methods that select the DB request modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HttpMethod {
    /// HTTP GET method
    #[default]
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP DELETE method
    Delete,
    /// HTTP PATCH method
    Patch,
    /// HTTP HEAD method
    Head,
    /// HTTP OPTIONS method
    Options,
    /// FTP directory listing
    List,
    /// FTP file retrieval
    Retr,
    /// FTP file upload
    Stor,
    /// MongoDB query
    MongoQuery,
    /// SQL query
    SqlQuery,
}

impl HttpMethod {
    /// Returns all available methods.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Get,
            Self::Post,
            Self::Put,
            Self::Delete,
            Self::Patch,
            Self::Head,
            Self::Options,
            Self::List,
            Self::Retr,
            Self::Stor,
            Self::MongoQuery,
            Self::SqlQuery,
        ]
    }

    /// Returns whether a request with this method may carry a body.
    ///
    /// GET and HEAD never carry one, whatever the descriptor holds.
    #[must_use]
    pub const fn carries_body(self) -> bool {
        !matches!(self, Self::Get | Self::Head)
    }

    /// Returns the method as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::List => "LIST",
            Self::Retr => "RETR",
            Self::Stor => "STOR",
            Self::MongoQuery => "MONGO_QUERY",
            Self::SqlQuery => "SQL_QUERY",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let upper = s.trim().to_uppercase();
        Self::all()
            .iter()
            .copied()
            .find(|m| m.as_str() == upper)
            .ok_or(DomainError::UnsupportedMethod(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_method_from_str() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("POST".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert_eq!("retr".parse::<HttpMethod>().unwrap(), HttpMethod::Retr);
        assert_eq!(
            "mongo_query".parse::<HttpMethod>().unwrap(),
            HttpMethod::MongoQuery
        );
    }

    #[test]
    fn test_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::SqlQuery.to_string(), "SQL_QUERY");
    }

    #[test]
    fn test_invalid_method() {
        let result = "INVALID".parse::<HttpMethod>();
        assert_eq!(
            result,
            Err(DomainError::UnsupportedMethod("INVALID".to_string()))
        );
    }

    #[test]
    fn test_carries_body() {
        assert!(!HttpMethod::Get.carries_body());
        assert!(!HttpMethod::Head.carries_body());
        assert!(HttpMethod::Post.carries_body());
        assert!(HttpMethod::Delete.carries_body());
        assert!(HttpMethod::Stor.carries_body());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&HttpMethod::MongoQuery).unwrap();
        assert_eq!(json, "\"MONGO_QUERY\"");
        let parsed: HttpMethod = serde_json::from_str("\"OPTIONS\"").unwrap();
        assert_eq!(parsed, HttpMethod::Options);
    }
}
