//! Tabular projection model.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Where filtering and sorting happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableMode {
    /// Filter and sort in memory.
    #[default]
    Client,
    /// Hand the filter/sort state to the request body and let the server apply it.
    Server,
}

impl FromStr for TableMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "server" => Ok(Self::Server),
            other => Err(format!("unknown table mode: {other}")),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// Single-column sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Column name (a flattened key).
    pub column: String,
    /// Direction.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Creates a sort spec.
    #[must_use]
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

/// Filter and sort state handed to the server in server mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerQuery {
    /// Column text filters.
    pub filters: BTreeMap<String, String>,
    /// Active sort, if any.
    pub sort: Option<SortSpec>,
}

impl ServerQuery {
    /// Merges the query into an outgoing request body.
    ///
    /// A JSON object body gains `filters` and `sort` keys (replacing any
    /// existing ones); any other body is replaced by the query object.
    #[must_use]
    pub fn merge_into_body(&self, body: &str) -> String {
        let query = serde_json::to_value(self).unwrap_or(Value::Null);
        let Value::Object(fields) = query else {
            return body.to_string();
        };

        let mut target = match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(existing)) => existing,
            _ => Map::new(),
        };
        target.extend(fields);

        serde_json::to_string_pretty(&Value::Object(target)).unwrap_or_else(|_| body.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> ServerQuery {
        let mut filters = BTreeMap::new();
        filters.insert("status".to_string(), "act".to_string());
        ServerQuery {
            filters,
            sort: Some(SortSpec::new("id", SortDirection::Desc)),
        }
    }

    #[test]
    fn test_merge_into_object_body() {
        let merged = sample().merge_into_body(r#"{"page": 2, "sort": "old"}"#);
        let value: Value = serde_json::from_str(&merged).unwrap_or_default();
        assert_eq!(
            value,
            json!({
                "page": 2,
                "filters": {"status": "act"},
                "sort": {"column": "id", "direction": "desc"}
            })
        );
    }

    #[test]
    fn test_merge_replaces_non_object_body() {
        let merged = ServerQuery::default().merge_into_body("plain text");
        let value: Value = serde_json::from_str(&merged).unwrap_or_default();
        assert_eq!(value, json!({"filters": {}, "sort": null}));
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("SERVER".parse::<TableMode>(), Ok(TableMode::Server));
    }
}
