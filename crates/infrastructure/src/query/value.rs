//! Path resolution and value coercion shared by the query engine.

use std::borrow::Cow;

use serde_json::{Map, Value};

/// Walks a dotted path into a value.
///
/// Object segments look up keys and numeric segments index into arrays.
/// The empty path resolves to the value itself. A missing intermediate
/// segment short-circuits to `None`.
#[must_use]
pub fn resolve_path<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Coerces a value to the string operators compare against.
///
/// Strings are taken as-is, scalars use their JSON display and composite
/// values are rendered as compact JSON.
#[must_use]
pub fn display(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed("null"),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::Number(n) => Cow::Owned(n.to_string()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Coerces a value to a number, yielding NaN when it is not numeric.
#[must_use]
pub fn numeric(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_number(s),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => f64::NAN,
    }
}

/// Parses trimmed, non-empty numeric text; anything else is NaN.
#[must_use]
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Returns true for a missing value, null or the empty string.
#[must_use]
pub fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Inlines nested objects into dot-joined keys.
///
/// Arrays and empty objects stay as opaque leaf values, so flattening an
/// already flat object returns it unchanged. Non-object values are
/// returned as they are.
#[must_use]
pub fn flatten(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut flat = Map::new();
            flatten_into(&mut flat, "", map);
            Value::Object(flat)
        }
        other => other.clone(),
    }
}

fn flatten_into(flat: &mut Map<String, Value>, prefix: &str, map: &Map<String, Value>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(nested) if !nested.is_empty() => flatten_into(flat, &path, nested),
            leaf => {
                flat.insert(path, leaf.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_resolve_path() {
        let value = json!({"a": {"b": [10, {"c": "x"}]}});
        assert_eq!(resolve_path(&value, "a.b.0"), Some(&json!(10)));
        assert_eq!(resolve_path(&value, "a.b.1.c"), Some(&json!("x")));
        assert_eq!(resolve_path(&value, "a.missing.c"), None);
        assert_eq!(resolve_path(&value, "a.b.x"), None);
        assert_eq!(resolve_path(&value, ""), Some(&value));
    }

    #[test]
    fn test_display_coercion() {
        assert_eq!(display(&json!("s")), "s");
        assert_eq!(display(&json!(1.5)), "1.5");
        assert_eq!(display(&json!(true)), "true");
        assert_eq!(display(&json!(null)), "null");
        assert_eq!(display(&json!({"a": [1]})), "{\"a\":[1]}");
    }

    #[test]
    fn test_numeric_coercion() {
        assert!((numeric(&json!(" 42 ")) - 42.0).abs() < f64::EPSILON);
        assert!((numeric(&json!(true)) - 1.0).abs() < f64::EPSILON);
        assert!(numeric(&json!("")).is_nan());
        assert!(numeric(&json!("abc")).is_nan());
        assert!(numeric(&json!(null)).is_nan());
        assert!(numeric(&json!([1])).is_nan());
    }

    #[test]
    fn test_flatten_nested_object() {
        let value = json!({"a": {"b": 1, "c": {"d": 2}}});
        assert_eq!(flatten(&value), json!({"a.b": 1, "a.c.d": 2}));
    }

    #[test]
    fn test_flatten_keeps_arrays_and_empty_objects() {
        let value = json!({"tags": ["x", {"y": 1}], "meta": {}, "n": null});
        assert_eq!(flatten(&value), value);
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let samples = [
            json!({"a": {"b": {"c": {"d": 1}}}, "e": [1, 2], "f": {}}),
            json!({"x.y": 1, "x": {"z": true}}),
            json!([1, 2]),
            json!("scalar"),
        ];
        for sample in samples {
            let once = flatten(&sample);
            assert_eq!(flatten(&once), once);
        }
    }
}
