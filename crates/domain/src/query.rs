//! JSON query model: filter criteria and quick operations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Comparison applied by a single criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    /// String-coerced value equals the literal.
    Equals,
    /// Case-insensitive substring match.
    #[default]
    Contains,
    /// Numeric greater-than.
    Gt,
    /// Numeric less-than.
    Lt,
    /// Case-insensitive prefix match.
    StartsWith,
    /// Case-insensitive suffix match.
    EndsWith,
    /// Case-insensitive regular expression.
    Regex,
    /// Value is missing, null or the empty string.
    IsEmpty,
    /// Negation of `IsEmpty`.
    IsNotEmpty,
}

impl Operator {
    /// Returns every operator.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Equals,
            Self::Contains,
            Self::Gt,
            Self::Lt,
            Self::StartsWith,
            Self::EndsWith,
            Self::Regex,
            Self::IsEmpty,
            Self::IsNotEmpty,
        ]
    }

    /// Returns the serialized operator name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::Contains => "contains",
            Self::Gt => "gt",
            Self::Lt => "lt",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::Regex => "regex",
            Self::IsEmpty => "isEmpty",
            Self::IsNotEmpty => "isNotEmpty",
        }
    }

    /// Returns true if the operator ignores the criterion value.
    #[must_use]
    pub const fn is_unary(self) -> bool {
        matches!(self, Self::IsEmpty | Self::IsNotEmpty)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::UnknownOperator(s.to_string()))
    }
}

/// How per-criterion results combine into the row predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchType {
    /// Every criterion must match.
    #[default]
    And,
    /// At least one criterion must match.
    Or,
}

impl FromStr for MatchType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            _ => Err(DomainError::UnknownOperator(s.to_string())),
        }
    }
}

/// One field/operator/value filter condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    /// Identifier used for in-place edits.
    pub id: String,
    /// Dotted field path.
    pub field: String,
    /// Comparison operator.
    pub operator: Operator,
    /// Literal compared against.
    #[serde(default)]
    pub value: String,
}

impl Criterion {
    /// Creates a criterion with a fresh id.
    #[must_use]
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            id: crate::generate_id(),
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Partial update applied to a criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriterionPatch {
    /// New field path.
    pub field: Option<String>,
    /// New operator.
    pub operator: Option<Operator>,
    /// New value.
    pub value: Option<String>,
}

/// The full filter state: ordered criteria under one match type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    /// Criteria in insertion order.
    #[serde(default)]
    pub criteria: Vec<Criterion>,
    /// How criteria combine.
    #[serde(default)]
    pub match_type: MatchType,
}

impl QueryState {
    /// Creates an empty query state.
    #[must_use]
    pub fn new(match_type: MatchType) -> Self {
        Self {
            criteria: Vec::new(),
            match_type,
        }
    }

    /// Adds a criterion on the first discovered field with the default
    /// operator and returns its id.
    pub fn add(&mut self, fields: &[String]) -> String {
        let field = fields.first().cloned().unwrap_or_default();
        let criterion = Criterion::new(field, Operator::default(), "");
        let id = criterion.id.clone();
        self.criteria.push(criterion);
        id
    }

    /// Appends a fully specified criterion.
    pub fn push(&mut self, criterion: Criterion) {
        self.criteria.push(criterion);
    }

    /// Applies a patch to the criterion with this id. Returns false if absent.
    pub fn update(&mut self, id: &str, patch: CriterionPatch) -> bool {
        let Some(criterion) = self.criteria.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        if let Some(field) = patch.field {
            criterion.field = field;
        }
        if let Some(operator) = patch.operator {
            criterion.operator = operator;
        }
        if let Some(value) = patch.value {
            criterion.value = value;
        }
        true
    }

    /// Removes the criterion with this id. Returns false if absent.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.criteria.len();
        self.criteria.retain(|c| c.id != id);
        before != self.criteria.len()
    }

    /// Removes every criterion.
    pub fn clear(&mut self) {
        self.criteria.clear();
    }

    /// Returns true if no criteria are set.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

/// Structural quick operations on JSON values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickOp {
    /// Replace each object with its key list.
    Keys,
    /// Replace each object with its value list.
    Values,
    /// Inline nested objects into dot-joined keys.
    Flatten,
}

impl FromStr for QuickOp {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keys" => Ok(Self::Keys),
            "values" => Ok(Self::Values),
            "flatten" => Ok(Self::Flatten),
            _ => Err(DomainError::UnknownOperator(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_uses_first_field_and_default_operator() {
        let mut state = QueryState::default();
        let id = state.add(&["status".to_string(), "id".to_string()]);

        assert_eq!(state.criteria.len(), 1);
        assert_eq!(state.criteria[0].id, id);
        assert_eq!(state.criteria[0].field, "status");
        assert_eq!(state.criteria[0].operator, Operator::Contains);

        state.add(&[]);
        assert_eq!(state.criteria[1].field, "");
    }

    #[test]
    fn test_update_and_remove_by_id() {
        let mut state = QueryState::default();
        let id = state.add(&["name".to_string()]);

        let patch = CriterionPatch {
            operator: Some(Operator::Equals),
            value: Some("alice".to_string()),
            ..CriterionPatch::default()
        };
        assert!(state.update(&id, patch));
        assert_eq!(state.criteria[0].operator, Operator::Equals);
        assert_eq!(state.criteria[0].value, "alice");
        assert_eq!(state.criteria[0].field, "name");

        assert!(!state.update("missing", CriterionPatch::default()));
        assert!(state.remove(&id));
        assert!(state.is_empty());
    }

    #[test]
    fn test_operator_names() {
        assert_eq!("startsWith".parse::<Operator>(), Ok(Operator::StartsWith));
        assert_eq!("ISEMPTY".parse::<Operator>(), Ok(Operator::IsEmpty));
        assert!("between".parse::<Operator>().is_err());
        let json = serde_json::to_string(&Operator::IsNotEmpty).unwrap_or_default();
        assert_eq!(json, "\"isNotEmpty\"");
    }

    #[test]
    fn test_match_type_serde() {
        let json = serde_json::to_string(&MatchType::Or).unwrap_or_default();
        assert_eq!(json, "\"OR\"");
        assert_eq!("and".parse::<MatchType>(), Ok(MatchType::And));
    }
}
