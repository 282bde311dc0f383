//! Criteria evaluation.

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use courier_domain::query::{Criterion, MatchType, Operator, QueryState};

use super::value::{display, is_empty, numeric, parse_number, resolve_path};

/// A criterion with its literal pre-processed for repeated evaluation.
#[derive(Debug, Clone)]
struct CompiledCriterion {
    field: String,
    operator: Operator,
    literal: String,
    lowered: String,
    number: f64,
    /// `None` when the pattern is malformed; such a criterion never matches.
    pattern: Option<Regex>,
}

impl CompiledCriterion {
    fn new(criterion: &Criterion) -> Self {
        let pattern = if criterion.operator == Operator::Regex {
            RegexBuilder::new(&criterion.value)
                .case_insensitive(true)
                .build()
                .map_err(|e| {
                    tracing::debug!(pattern = %criterion.value, error = %e, "ignoring malformed regex");
                })
                .ok()
        } else {
            None
        };

        Self {
            field: criterion.field.clone(),
            operator: criterion.operator,
            literal: criterion.value.clone(),
            lowered: criterion.value.to_lowercase(),
            number: parse_number(&criterion.value),
            pattern,
        }
    }

    fn matches(&self, row: &Value) -> bool {
        let value = resolve_path(row, &self.field);

        match self.operator {
            Operator::IsEmpty => return is_empty(value),
            Operator::IsNotEmpty => return !is_empty(value),
            _ => {}
        }

        let Some(value) = value else {
            return false;
        };

        match self.operator {
            Operator::Equals => display(value) == self.literal,
            Operator::Contains => display(value).to_lowercase().contains(&self.lowered),
            Operator::StartsWith => display(value).to_lowercase().starts_with(&self.lowered),
            Operator::EndsWith => display(value).to_lowercase().ends_with(&self.lowered),
            // NaN compares false on both sides
            Operator::Gt => numeric(value) > self.number,
            Operator::Lt => numeric(value) < self.number,
            Operator::Regex => self
                .pattern
                .as_ref()
                .is_some_and(|pattern| pattern.is_match(&display(value))),
            Operator::IsEmpty | Operator::IsNotEmpty => false,
        }
    }
}

/// A query state compiled for evaluation against many rows.
///
/// An empty criteria list matches every row.
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    criteria: Vec<CompiledCriterion>,
    match_type: MatchType,
    negated: bool,
}

impl CompiledQuery {
    /// Compiles every criterion of the state.
    #[must_use]
    pub fn new(state: &QueryState) -> Self {
        Self {
            criteria: state.criteria.iter().map(CompiledCriterion::new).collect(),
            match_type: state.match_type,
            negated: false,
        }
    }

    /// Compiles a single criterion.
    #[must_use]
    pub fn single(criterion: &Criterion) -> Self {
        Self {
            criteria: vec![CompiledCriterion::new(criterion)],
            match_type: MatchType::And,
            negated: false,
        }
    }

    /// Inverts the predicate.
    #[must_use]
    pub const fn negated(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Returns true if the row satisfies the combined predicate.
    #[must_use]
    pub fn matches(&self, row: &Value) -> bool {
        let matched = self.criteria.is_empty()
            || match self.match_type {
                MatchType::And => self.criteria.iter().all(|c| c.matches(row)),
                MatchType::Or => self.criteria.iter().any(|c| c.matches(row)),
            };
        matched != self.negated
    }

    /// Applies the predicate to a value: arrays keep matching elements and
    /// any other value becomes itself or `null`.
    #[must_use]
    pub fn apply(&self, value: &Value) -> Value {
        retain(value, |row| self.matches(row))
    }
}

/// Filters a value with the criteria of `state`.
#[must_use]
pub fn filter(value: &Value, state: &QueryState) -> Value {
    CompiledQuery::new(state).apply(value)
}

pub(super) fn retain(value: &Value, predicate: impl Fn(&Value) -> bool) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .filter(|item| predicate(item))
                .cloned()
                .collect(),
        ),
        other if predicate(other) => other.clone(),
        _ => Value::Null,
    }
}
