//! Filtering and reshaping a JSON document.

use clap::{Args, ValueEnum};
use serde_json::Value;

use courier_domain::query::{MatchType, QueryState, QuickOp};
use courier_infrastructure::query::{
    apply_quick_op, discover_fields, filter, quick_search, to_js_snippet, to_transform_script,
};
use courier_infrastructure::scripting::{TransformEngine, TransformStep, parse_transform};

use super::CommandResult;
use super::shared::InputArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    /// The criteria as a transform `where` line
    Script,
    /// The criteria as a JavaScript filter
    Js,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Criterion as FIELD OPERATOR [VALUE], e.g. "status equals active"
    #[arg(short = 'w', long = "where", value_name = "CRITERION")]
    pub criteria: Vec<String>,

    /// How criteria combine
    #[arg(short = 'm', long = "match", value_name = "and|or", default_value = "and", value_parser = parse_match_type)]
    pub match_type: MatchType,

    /// Quick search: free text or FIELD=VALUE / FIELD!=VALUE
    #[arg(short = 's', long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Structural operation: keys, values or flatten
    #[arg(long = "op", value_name = "OP", value_parser = parse_quick_op)]
    pub op: Option<QuickOp>,

    /// Transform script run last
    #[arg(short = 't', long = "transform", value_name = "SCRIPT")]
    pub transform: Option<String>,

    /// List the field paths found in the input and exit
    #[arg(long = "fields")]
    pub fields: bool,

    /// Print the criteria in another form instead of applying them
    #[arg(long = "show", value_enum, value_name = "FORMAT")]
    pub show: Option<ShowFormat>,
}

impl QueryArgs {
    /// Parses each `--where` through the transform language's `where` step.
    fn query_state(&self) -> CommandResult<QueryState> {
        let mut state = QueryState::new(self.match_type);
        for clause in &self.criteria {
            let script = parse_transform(&format!("where and {clause}"))?;
            for step in script.steps {
                if let TransformStep::Where(parsed) = step {
                    state.criteria.extend(parsed.criteria);
                }
            }
        }
        Ok(state)
    }
}

pub fn execute(args: &QueryArgs) -> CommandResult {
    let state = args.query_state()?;

    match args.show {
        Some(ShowFormat::Script) => {
            println!("{}", to_transform_script(&state));
            return Ok(());
        }
        Some(ShowFormat::Js) => {
            println!("{}", to_js_snippet(&state));
            return Ok(());
        }
        None => {}
    }

    let input = args.input.read_json()?;

    if args.fields {
        for field in discover_fields(&input) {
            println!("{field}");
        }
        return Ok(());
    }

    let result = run_pipeline(args, &state, input)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run_pipeline(args: &QueryArgs, state: &QueryState, input: Value) -> CommandResult<Value> {
    let mut value = if state.is_empty() {
        input
    } else {
        filter(&input, state)
    };
    if let Some(search) = &args.search {
        value = quick_search(&value, search);
    }
    if let Some(op) = args.op {
        value = apply_quick_op(&value, op);
    }
    if let Some(script) = &args.transform {
        value = TransformEngine::new().run(script, &value)?;
    }
    Ok(value)
}

fn parse_match_type(value: &str) -> Result<MatchType, String> {
    value
        .parse()
        .map_err(|_| format!("expected 'and' or 'or', got '{value}'"))
}

fn parse_quick_op(value: &str) -> Result<QuickOp, String> {
    value
        .parse()
        .map_err(|_| format!("expected keys, values or flatten, got '{value}'"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use courier_domain::query::Operator;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn args(criteria: &[&str], match_type: MatchType) -> QueryArgs {
        QueryArgs {
            input: InputArgs { input: None },
            criteria: criteria.iter().map(ToString::to_string).collect(),
            match_type,
            search: None,
            op: None,
            transform: None,
            fields: false,
            show: None,
        }
    }

    #[test]
    fn test_criteria_parse_through_where() {
        let state = args(&["status equals active", "email isEmpty"], MatchType::Or)
            .query_state()
            .unwrap();
        assert_eq!(state.match_type, MatchType::Or);
        let parsed: Vec<_> = state
            .criteria
            .iter()
            .map(|c| (c.field.as_str(), c.operator, c.value.as_str()))
            .collect();
        assert_eq!(
            parsed,
            vec![
                ("status", Operator::Equals, "active"),
                ("email", Operator::IsEmpty, "")
            ]
        );
    }

    #[test]
    fn test_bad_criterion_is_rejected() {
        assert!(args(&["status"], MatchType::And).query_state().is_err());
    }

    #[test]
    fn test_pipeline_order() {
        let mut query = args(&["age gt 20"], MatchType::And);
        query.search = Some("team=core".to_string());
        query.transform = Some("pick name".to_string());
        let state = query.query_state().unwrap();

        let input = json!([
            {"name": "Ann", "age": 31, "team": "core"},
            {"name": "Ben", "age": 19, "team": "core"},
            {"name": "Cid", "age": 44, "team": "web"}
        ]);
        assert_eq!(
            run_pipeline(&query, &state, input).unwrap(),
            json!([{"name": "Ann"}])
        );
    }
}
