//! Pipeline executor for parsed transform scripts.

use serde_json::{Map, Value};

use courier_application::ports::ResponseTransformer;

use super::parser::{TransformError, TransformScript, TransformStep, parse_transform};
use crate::query::{CompiledQuery, apply_quick_op, quick_search, resolve_path};
use crate::table::compare_cells;

impl TransformScript {
    /// Runs every step in order against the value.
    ///
    /// # Errors
    ///
    /// Returns an error if a step cannot handle the value it receives.
    pub fn apply(&self, value: &Value) -> Result<Value, TransformError> {
        let mut current = value.clone();
        for step in &self.steps {
            current = apply_step(step, current)?;
        }
        Ok(current)
    }
}

fn apply_step(step: &TransformStep, value: Value) -> Result<Value, TransformError> {
    let result = match step {
        TransformStep::Get(path) => resolve_path(&value, path).cloned().unwrap_or(Value::Null),
        TransformStep::Filter { criterion, negated } => {
            let query = CompiledQuery::single(criterion);
            if *negated {
                query.negated().apply(&value)
            } else {
                query.apply(&value)
            }
        }
        TransformStep::Where(state) => CompiledQuery::new(state).apply(&value),
        TransformStep::Search(input) => quick_search(&value, input),
        TransformStep::Pick(fields) => match value {
            Value::Array(items) => Value::Array(items.iter().map(|row| pick(row, fields)).collect()),
            other => pick(&other, fields),
        },
        TransformStep::Sort { field, direction } => {
            let mut items = expect_array(step, value)?;
            items.sort_by(|a, b| {
                compare_cells(resolve_path(a, field), resolve_path(b, field), *direction)
            });
            Value::Array(items)
        }
        TransformStep::Limit(count) => {
            let mut items = expect_array(step, value)?;
            items.truncate(*count);
            Value::Array(items)
        }
        TransformStep::Quick(op) => apply_quick_op(&value, *op),
        TransformStep::Count => match value {
            Value::Array(items) => Value::from(items.len()),
            Value::Object(map) => Value::from(map.len()),
            other => {
                return Err(TransformError::UnsupportedInput {
                    step: step.name(),
                    found: type_name(&other),
                });
            }
        },
    };
    Ok(result)
}

fn pick(row: &Value, fields: &[String]) -> Value {
    if !row.is_object() {
        return row.clone();
    }
    let picked: Map<String, Value> = fields
        .iter()
        .map(|field| {
            let value = resolve_path(row, field).cloned().unwrap_or(Value::Null);
            (field.clone(), value)
        })
        .collect();
    Value::Object(picked)
}

fn expect_array(step: &TransformStep, value: Value) -> Result<Vec<Value>, TransformError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(TransformError::UnsupportedInput {
            step: step.name(),
            found: type_name(&other),
        }),
    }
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// [`ResponseTransformer`] backed by the transform language.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransformEngine;

impl TransformEngine {
    /// Create a new transform engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parses and runs a script.
    ///
    /// # Errors
    ///
    /// Returns an error if the script fails to parse or a step fails.
    pub fn run(&self, script: &str, value: &Value) -> Result<Value, TransformError> {
        let parsed = parse_transform(script)?;
        tracing::debug!(steps = parsed.steps.len(), "running transform");
        parsed.apply(value)
    }
}

impl ResponseTransformer for TransformEngine {
    fn transform(&self, script: &str, value: &Value) -> Result<Value, String> {
        self.run(script, value).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::query::{filter, to_transform_script};
    use courier_domain::query::{Criterion, MatchType, Operator, QueryState};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn users() -> Value {
        json!({
            "data": {
                "users": [
                    {"id": 1, "name": "Ann", "age": 31, "team": {"name": "core"}},
                    {"id": 2, "name": "Ben", "age": null, "team": {"name": "web"}},
                    {"id": 3, "name": "Cid", "age": 25, "team": {"name": "core"}},
                    {"id": 4, "name": "Dee", "age": 40}
                ]
            }
        })
    }

    fn run(script: &str) -> Value {
        TransformEngine::new().run(script, &users()).expect("should run")
    }

    #[test]
    fn test_pipeline() {
        let script = "
            get data.users
            filter team.name == core
            sort age desc
            pick id, name
        ";
        assert_eq!(
            run(script),
            json!([{"id": 1, "name": "Ann"}, {"id": 3, "name": "Cid"}])
        );
    }

    #[test]
    fn test_sort_keeps_nulls_last_and_limit() {
        assert_eq!(
            run("get data.users\nsort age\npick id"),
            json!([{"id": 3}, {"id": 1}, {"id": 4}, {"id": 2}])
        );
        assert_eq!(
            run("get data.users\nsort age desc\nlimit 2\npick id"),
            json!([{"id": 4}, {"id": 1}])
        );
    }

    #[test]
    fn test_negated_filter_and_count() {
        assert_eq!(run("get data.users\nfilter team.name != core\ncount"), json!(2));
        assert_eq!(run("get data\ncount"), json!(1));
    }

    #[test]
    fn test_search_and_quick_ops() {
        assert_eq!(
            run("get data.users\nsearch web\nflatten"),
            json!([{"id": 2, "name": "Ben", "age": null, "team.name": "web"}])
        );
        assert_eq!(run("get data.users.0\nkeys"), json!(["id", "name", "age", "team"]));
    }

    #[test]
    fn test_missing_path_is_null() {
        assert_eq!(run("get data.nothing"), Value::Null);
    }

    #[test]
    fn test_step_errors() {
        let engine = TransformEngine::new();
        assert_eq!(
            engine.run("sort id", &json!({"id": 1})),
            Err(TransformError::UnsupportedInput {
                step: "sort",
                found: "an object"
            })
        );
        assert_eq!(
            engine.run("count", &json!("text")),
            Err(TransformError::UnsupportedInput {
                step: "count",
                found: "a string"
            })
        );
    }

    #[test]
    fn test_rendered_query_state_matches_filter() {
        let data = users()["data"]["users"].clone();
        for match_type in [MatchType::And, MatchType::Or] {
            let mut state = QueryState::new(match_type);
            state.push(Criterion::new("team.name", Operator::Equals, "core"));
            state.push(Criterion::new("age", Operator::Gt, "30"));
            state.push(Criterion::new("name", Operator::Contains, "e; x"));

            let script = to_transform_script(&state);
            let engine = TransformEngine::new();
            assert_eq!(engine.run(&script, &data).expect("should run"), filter(&data, &state));
        }
    }

    #[test]
    fn test_engine_as_port_reports_errors_as_text() {
        let transformer: &dyn ResponseTransformer = &TransformEngine::new();
        let error = transformer.transform("bogus", &json!([])).unwrap_err();
        assert_eq!(error, "Unknown step at line 1: bogus");
    }
}
