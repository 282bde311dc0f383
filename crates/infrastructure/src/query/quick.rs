//! Quick search box and structural quick operations.

use serde_json::Value;

use courier_domain::query::{Criterion, Operator, QuickOp};

use super::filter::{CompiledQuery, retain};
use super::value::{display, flatten};

/// A parsed quick-search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickSearch {
    /// `field=value`, `field>n`, `field<n` or `field~text`.
    Field(Criterion),
    /// `field!=value`.
    NotEquals(Criterion),
    /// Free text matched against every leaf of the row.
    Text(String),
    /// Blank input: matches everything.
    All,
}

impl QuickSearch {
    /// Parses the search box input.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Self::All;
        }

        let Some(index) = input.find(['=', '<', '>', '~', '!']) else {
            return Self::Text(input.to_lowercase());
        };
        let field = input[..index].trim();
        let rest = &input[index..];

        let (operator, negated, width) = if rest.starts_with("!=") {
            (Operator::Equals, true, 2)
        } else if rest.starts_with('=') {
            (Operator::Equals, false, 1)
        } else if rest.starts_with('>') {
            (Operator::Gt, false, 1)
        } else if rest.starts_with('<') {
            (Operator::Lt, false, 1)
        } else if rest.starts_with('~') {
            (Operator::Contains, false, 1)
        } else {
            return Self::Text(input.to_lowercase());
        };

        if field.is_empty() {
            return Self::Text(input.to_lowercase());
        }

        let criterion = Criterion::new(field, operator, rest[width..].trim());
        if negated {
            Self::NotEquals(criterion)
        } else {
            Self::Field(criterion)
        }
    }

    /// Filters a value: arrays keep matching rows, other values become
    /// themselves or `null`.
    #[must_use]
    pub fn apply(&self, value: &Value) -> Value {
        match self {
            Self::All => value.clone(),
            Self::Field(criterion) => CompiledQuery::single(criterion).apply(value),
            Self::NotEquals(criterion) => CompiledQuery::single(criterion).negated().apply(value),
            Self::Text(needle) => retain(value, |row| text_matches(row, needle)),
        }
    }
}

/// Filters `value` with a quick-search expression.
#[must_use]
pub fn quick_search(value: &Value, input: &str) -> Value {
    QuickSearch::parse(input).apply(value)
}

fn text_matches(row: &Value, needle: &str) -> bool {
    match flatten(row) {
        Value::Object(map) => map
            .values()
            .any(|leaf| display(leaf).to_lowercase().contains(needle)),
        scalar => display(&scalar).to_lowercase().contains(needle),
    }
}

/// Applies a structural quick operation, mapped over arrays.
#[must_use]
pub fn apply_quick_op(value: &Value, op: QuickOp) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(|item| apply_one(item, op)).collect()),
        other => apply_one(other, op),
    }
}

fn apply_one(value: &Value, op: QuickOp) -> Value {
    match (op, value) {
        (QuickOp::Keys, Value::Object(map)) => {
            Value::Array(map.keys().cloned().map(Value::String).collect())
        }
        (QuickOp::Values, Value::Object(map)) => Value::Array(map.values().cloned().collect()),
        (QuickOp::Flatten, other) => flatten(other),
        (_, other) => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_field_equals_scenario() {
        let data = json!([{"status": "active", "id": 1}, {"status": "idle", "id": 2}]);
        assert_eq!(
            quick_search(&data, "status=active"),
            json!([{"status": "active", "id": 1}])
        );
    }

    #[test]
    fn test_parse_forms() {
        assert!(matches!(QuickSearch::parse("  "), QuickSearch::All));
        assert!(matches!(
            QuickSearch::parse("id > 3"),
            QuickSearch::Field(Criterion { operator: Operator::Gt, .. })
        ));
        assert!(matches!(QuickSearch::parse("a!=b"), QuickSearch::NotEquals(_)));
        assert_eq!(QuickSearch::parse("Hello!"), QuickSearch::Text("hello!".to_string()));
        assert_eq!(QuickSearch::parse("=x"), QuickSearch::Text("=x".to_string()));
    }

    #[test]
    fn test_operators_in_quick_search() {
        let data = json!([
            {"id": 1, "name": "Alpha", "tags": ["x"]},
            {"id": 5, "name": "beta"},
            {"id": 9, "name": "Gamma"}
        ]);
        assert_eq!(quick_search(&data, "id>4"), json!([{"id": 5, "name": "beta"}, {"id": 9, "name": "Gamma"}]));
        assert_eq!(quick_search(&data, "id<2").as_array().map(Vec::len), Some(1));
        assert_eq!(quick_search(&data, "name~AMM"), json!([{"id": 9, "name": "Gamma"}]));
        assert_eq!(quick_search(&data, "name!=beta").as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_free_text_searches_nested_leaves() {
        let data = json!([
            {"id": 1, "user": {"city": "Lima"}},
            {"id": 2, "user": {"city": "Quito"}}
        ]);
        assert_eq!(
            quick_search(&data, "LIM"),
            json!([{"id": 1, "user": {"city": "Lima"}}])
        );
        assert_eq!(quick_search(&data, ""), data);
    }

    #[test]
    fn test_quick_ops_map_over_arrays() {
        let data = json!([{"a": 1, "b": {"c": 2}}, "scalar"]);
        assert_eq!(apply_quick_op(&data, QuickOp::Keys), json!([["a", "b"], "scalar"]));
        assert_eq!(
            apply_quick_op(&data, QuickOp::Values),
            json!([[1, {"c": 2}], "scalar"])
        );
        assert_eq!(
            apply_quick_op(&data, QuickOp::Flatten),
            json!([{"a": 1, "b.c": 2}, "scalar"])
        );
        assert_eq!(apply_quick_op(&json!({"x": 1}), QuickOp::Keys), json!(["x"]));
    }
}
