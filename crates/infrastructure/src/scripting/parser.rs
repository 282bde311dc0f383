//! Parser for the response transform language.
//!
//! A script is a pipeline with one step per line:
//! - `get <path>` - Replace the value with the value at a path
//! - `filter <field> <op> <value>` - Keep matching array elements
//! - `where <and|or> <field> <op> <value>; ...` - Compound filter
//! - `search <text>` - Quick search
//! - `pick <f1>,<f2>` - Project rows to the listed paths
//! - `sort <field> [asc|desc]` - Stable sort with nulls last
//! - `limit <n>` - Keep the first n elements
//! - `keys`, `values`, `flatten` - Quick operations
//! - `count` - Replace with the element count
//!
//! Blank lines and lines starting with `#` or `//` are ignored.

use thiserror::Error;

use courier_domain::query::{Criterion, MatchType, Operator, QueryState, QuickOp};
use courier_domain::table::SortDirection;

/// Error type for transform parsing and evaluation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Unknown step name.
    #[error("Unknown step at line {line}: {step}")]
    UnknownStep {
        /// The line number where the error occurred.
        line: usize,
        /// The step name.
        step: String,
    },
    /// Invalid syntax.
    #[error("Invalid syntax at line {line}: {message}")]
    InvalidSyntax {
        /// The line number where the error occurred.
        line: usize,
        /// The error message.
        message: String,
    },
    /// Missing argument.
    #[error("Missing argument for {step} at line {line}: expected {expected}")]
    MissingArgument {
        /// The line number where the error occurred.
        line: usize,
        /// The step name.
        step: String,
        /// The expected argument description.
        expected: String,
    },
    /// Step applied to a value it cannot handle.
    #[error("{step} cannot be applied to {found}")]
    UnsupportedInput {
        /// The step name.
        step: &'static str,
        /// JSON type of the input.
        found: &'static str,
    },
}

/// One pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformStep {
    /// Replace the value with the value at a path.
    Get(String),
    /// Keep elements matching one criterion, or not matching it when negated.
    Filter {
        /// The criterion.
        criterion: Criterion,
        /// Invert the match.
        negated: bool,
    },
    /// Keep elements matching a compound query.
    Where(QueryState),
    /// Quick search input.
    Search(String),
    /// Project rows to these paths.
    Pick(Vec<String>),
    /// Sort by a field.
    Sort {
        /// Field path.
        field: String,
        /// Direction.
        direction: SortDirection,
    },
    /// Keep the first n elements.
    Limit(usize),
    /// Structural quick operation.
    Quick(QuickOp),
    /// Replace with the element count.
    Count,
}

impl TransformStep {
    /// Returns the step keyword.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Get(_) => "get",
            Self::Filter { .. } => "filter",
            Self::Where(_) => "where",
            Self::Search(_) => "search",
            Self::Pick(_) => "pick",
            Self::Sort { .. } => "sort",
            Self::Limit(_) => "limit",
            Self::Quick(QuickOp::Keys) => "keys",
            Self::Quick(QuickOp::Values) => "values",
            Self::Quick(QuickOp::Flatten) => "flatten",
            Self::Count => "count",
        }
    }
}

/// A parsed transform pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformScript {
    /// Steps in order.
    pub steps: Vec<TransformStep>,
}

impl TransformScript {
    /// Returns true if the script has no steps.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Parse a script into a pipeline.
///
/// # Errors
///
/// Returns an error if any line is not a valid step.
pub fn parse_transform(script: &str) -> Result<TransformScript, TransformError> {
    let mut steps = Vec::new();

    for (line_num, line) in script.lines().enumerate() {
        let line = line.trim();

        if line.is_empty() || line.starts_with("//") || line.starts_with('#') {
            continue;
        }

        steps.push(parse_line(line, line_num + 1)?);
    }

    Ok(TransformScript { steps })
}

fn parse_line(line: &str, line_num: usize) -> Result<TransformStep, TransformError> {
    let (name, args) = split_word(line);
    let missing = |expected: &str| TransformError::MissingArgument {
        line: line_num,
        step: name.to_string(),
        expected: expected.to_string(),
    };

    match name {
        "get" => {
            if args.is_empty() {
                return Err(missing("a path"));
            }
            Ok(TransformStep::Get(field_path(args)))
        }
        "filter" => {
            let (criterion, negated) = parse_condition(args, line_num)?;
            Ok(TransformStep::Filter { criterion, negated })
        }
        "where" => parse_where(args, line_num),
        "search" => {
            if args.is_empty() {
                return Err(missing("search text"));
            }
            Ok(TransformStep::Search(args.to_string()))
        }
        "pick" => {
            let fields: Vec<String> = args
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(field_path)
                .collect();
            if fields.is_empty() {
                return Err(missing("a comma-separated field list"));
            }
            Ok(TransformStep::Pick(fields))
        }
        "sort" => {
            let (field, rest) = split_word(args);
            if field.is_empty() {
                return Err(missing("a field"));
            }
            let direction = match rest.to_ascii_lowercase().as_str() {
                "" | "asc" => SortDirection::Asc,
                "desc" => SortDirection::Desc,
                other => {
                    return Err(TransformError::InvalidSyntax {
                        line: line_num,
                        message: format!("sort direction must be asc or desc, got '{other}'"),
                    });
                }
            };
            Ok(TransformStep::Sort {
                field: field_path(field),
                direction,
            })
        }
        "limit" => {
            if args.is_empty() {
                return Err(missing("a count"));
            }
            let count = args.parse().map_err(|_| TransformError::InvalidSyntax {
                line: line_num,
                message: format!("'{args}' is not a valid count"),
            })?;
            Ok(TransformStep::Limit(count))
        }
        "keys" | "values" | "flatten" | "count" => {
            if !args.is_empty() {
                return Err(TransformError::InvalidSyntax {
                    line: line_num,
                    message: format!("{name} takes no arguments"),
                });
            }
            Ok(match name {
                "keys" => TransformStep::Quick(QuickOp::Keys),
                "values" => TransformStep::Quick(QuickOp::Values),
                "flatten" => TransformStep::Quick(QuickOp::Flatten),
                _ => TransformStep::Count,
            })
        }
        _ => Err(TransformError::UnknownStep {
            line: line_num,
            step: name.to_string(),
        }),
    }
}

fn parse_where(args: &str, line_num: usize) -> Result<TransformStep, TransformError> {
    let (joiner, clauses) = split_word(args);
    let match_type = match joiner.to_ascii_lowercase().as_str() {
        "and" => MatchType::And,
        "or" => MatchType::Or,
        _ => {
            return Err(TransformError::InvalidSyntax {
                line: line_num,
                message: "where expects 'and' or 'or' first".to_string(),
            });
        }
    };

    let mut state = QueryState::new(match_type);
    for clause in split_clauses(clauses) {
        let (criterion, negated) = parse_condition(&clause, line_num)?;
        if negated {
            return Err(TransformError::InvalidSyntax {
                line: line_num,
                message: "'!=' is not supported inside where".to_string(),
            });
        }
        state.push(criterion);
    }
    Ok(TransformStep::Where(state))
}

/// Parses `<field> <op> [value]`.
fn parse_condition(text: &str, line_num: usize) -> Result<(Criterion, bool), TransformError> {
    let (field, rest) = split_word(text);
    let (op, value) = split_word(rest);
    if field.is_empty() || op.is_empty() {
        return Err(TransformError::MissingArgument {
            line: line_num,
            step: "condition".to_string(),
            expected: "<field> <op> <value>".to_string(),
        });
    }

    let (operator, negated) = parse_operator(op).ok_or_else(|| TransformError::InvalidSyntax {
        line: line_num,
        message: format!("unknown operator '{op}'"),
    })?;

    let value = if operator.is_unary() {
        String::new()
    } else {
        unquote(value, line_num)?
    };

    Ok((Criterion::new(field_path(field), operator, value), negated))
}

fn parse_operator(op: &str) -> Option<(Operator, bool)> {
    let parsed = match op {
        "==" | "=" => (Operator::Equals, false),
        "!=" => (Operator::Equals, true),
        ">" => (Operator::Gt, false),
        "<" => (Operator::Lt, false),
        "matches" => (Operator::Regex, false),
        "empty" => (Operator::IsEmpty, false),
        "notEmpty" => (Operator::IsNotEmpty, false),
        other => (other.parse().ok()?, false),
    };
    Some(parsed)
}

fn unquote(value: &str, line_num: usize) -> Result<String, TransformError> {
    if value.starts_with('"') {
        serde_json::from_str(value).map_err(|e| TransformError::InvalidSyntax {
            line: line_num,
            message: format!("invalid quoted value: {e}"),
        })
    } else {
        Ok(value.to_string())
    }
}

/// Splits `where` clauses on `;` outside double-quoted strings.
fn split_clauses(text: &str) -> Vec<String> {
    let mut clauses = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut escape_next = false;

    for ch in text.chars() {
        if escape_next {
            current.push(ch);
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => {
                current.push(ch);
                escape_next = true;
            }
            '"' => {
                in_string = !in_string;
                current.push(ch);
            }
            ';' if !in_string => {
                let clause = current.trim().to_string();
                if !clause.is_empty() {
                    clauses.push(clause);
                }
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    let clause = current.trim().to_string();
    if !clause.is_empty() {
        clauses.push(clause);
    }

    clauses
}

/// `.` stands for the whole value.
fn field_path(field: &str) -> String {
    if field == "." {
        String::new()
    } else {
        field.to_string()
    }
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim();
    text.split_once(char::is_whitespace)
        .map_or((text, ""), |(word, rest)| (word, rest.trim()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn only_step(script: &str) -> TransformStep {
        let parsed = parse_transform(script).expect("should parse");
        assert_eq!(parsed.steps.len(), 1);
        parsed.steps.into_iter().next().expect("one step")
    }

    #[test]
    fn test_parse_simple_steps() {
        assert_eq!(only_step("get data.items"), TransformStep::Get("data.items".to_string()));
        assert_eq!(only_step("limit 5"), TransformStep::Limit(5));
        assert_eq!(only_step("keys"), TransformStep::Quick(QuickOp::Keys));
        assert_eq!(only_step("count"), TransformStep::Count);
        assert_eq!(
            only_step("pick id, user.name ,"),
            TransformStep::Pick(vec!["id".to_string(), "user.name".to_string()])
        );
        assert_eq!(
            only_step("sort age desc"),
            TransformStep::Sort {
                field: "age".to_string(),
                direction: SortDirection::Desc
            }
        );
        assert_eq!(
            only_step("search status=active"),
            TransformStep::Search("status=active".to_string())
        );
    }

    #[test]
    fn test_parse_filter() {
        let TransformStep::Filter { criterion, negated } = only_step(r#"filter name != "a b""#)
        else {
            panic!("Expected filter step");
        };
        assert!(negated);
        assert_eq!(criterion.field, "name");
        assert_eq!(criterion.operator, Operator::Equals);
        assert_eq!(criterion.value, "a b");

        let TransformStep::Filter { criterion, .. } = only_step("filter email empty") else {
            panic!("Expected filter step");
        };
        assert_eq!(criterion.operator, Operator::IsEmpty);
        assert_eq!(criterion.value, "");

        let TransformStep::Filter { criterion, .. } = only_step("filter name startsWith Al")
        else {
            panic!("Expected filter step");
        };
        assert_eq!(criterion.operator, Operator::StartsWith);
        assert_eq!(criterion.value, "Al");
    }

    #[test]
    fn test_parse_where_splits_outside_quotes() {
        let TransformStep::Where(state) =
            only_step(r#"where or status equals "a;b"; age gt 3; email isEmpty"#)
        else {
            panic!("Expected where step");
        };
        assert_eq!(state.match_type, MatchType::Or);
        let clauses: Vec<_> = state
            .criteria
            .iter()
            .map(|c| (c.field.as_str(), c.operator, c.value.as_str()))
            .collect();
        assert_eq!(
            clauses,
            vec![
                ("status", Operator::Equals, "a;b"),
                ("age", Operator::Gt, "3"),
                ("email", Operator::IsEmpty, "")
            ]
        );
    }

    #[test]
    fn test_skip_comments_and_blank_lines() {
        let script = "
            // take the payload
            # then trim it
            get data

            limit 2
        ";
        assert_eq!(parse_transform(script).expect("should parse").steps.len(), 2);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        assert_eq!(
            parse_transform("get a\nexplode"),
            Err(TransformError::UnknownStep {
                line: 2,
                step: "explode".to_string()
            })
        );
        assert!(matches!(
            parse_transform("limit many"),
            Err(TransformError::InvalidSyntax { line: 1, .. })
        ));
        assert!(matches!(
            parse_transform("filter name"),
            Err(TransformError::MissingArgument { .. })
        ));
        assert!(matches!(
            parse_transform("filter a between 1"),
            Err(TransformError::InvalidSyntax { .. })
        ));
        assert!(matches!(
            parse_transform("where xor a == 1"),
            Err(TransformError::InvalidSyntax { .. })
        ));
        assert!(matches!(
            parse_transform("keys now"),
            Err(TransformError::InvalidSyntax { .. })
        ));
    }

    #[test]
    fn test_dot_means_whole_value() {
        let TransformStep::Filter { criterion, .. } = only_step("filter . contains x") else {
            panic!("Expected filter step");
        };
        assert_eq!(criterion.field, "");
    }
}
