//! Renders a query state as a transform line or a JavaScript filter.

use courier_domain::query::{Criterion, MatchType, Operator, QueryState};

/// Renders the state as a `where` step of the transform language.
///
/// An empty state renders as an empty script, which transforms nothing.
#[must_use]
pub fn to_transform_script(state: &QueryState) -> String {
    if state.criteria.is_empty() {
        return String::new();
    }

    let joiner = match state.match_type {
        MatchType::And => "and",
        MatchType::Or => "or",
    };
    let clauses: Vec<String> = state.criteria.iter().map(transform_clause).collect();
    format!("where {joiner} {}", clauses.join("; "))
}

fn transform_clause(criterion: &Criterion) -> String {
    let field = if criterion.field.is_empty() {
        "."
    } else {
        criterion.field.as_str()
    };
    if criterion.operator.is_unary() {
        format!("{field} {}", criterion.operator)
    } else {
        format!("{field} {} {}", criterion.operator, quote(&criterion.value))
    }
}

/// Renders the state as a JavaScript `filter` call over `data`.
#[must_use]
pub fn to_js_snippet(state: &QueryState) -> String {
    if state.criteria.is_empty() {
        return "data.filter(() => true)".to_string();
    }

    let joiner = match state.match_type {
        MatchType::And => " && ",
        MatchType::Or => " || ",
    };
    let conditions: Vec<String> = state.criteria.iter().map(js_condition).collect();
    format!("data.filter((item) => {})", conditions.join(joiner))
}

fn js_condition(criterion: &Criterion) -> String {
    let access = js_access(&criterion.field);
    let literal = quote(&criterion.value);
    let lowered = quote(&criterion.value.to_lowercase());
    let text = format!("String({access} ?? '').toLowerCase()");

    match criterion.operator {
        Operator::Equals => format!("String({access}) === {literal}"),
        Operator::Contains => format!("{text}.includes({lowered})"),
        Operator::StartsWith => format!("{text}.startsWith({lowered})"),
        Operator::EndsWith => format!("{text}.endsWith({lowered})"),
        Operator::Gt => format!("Number({access}) > Number({literal})"),
        Operator::Lt => format!("Number({access}) < Number({literal})"),
        Operator::Regex => format!("new RegExp({literal}, 'i').test(String({access}))"),
        Operator::IsEmpty => format!("({access} == null || {access} === '')"),
        Operator::IsNotEmpty => format!("!({access} == null || {access} === '')"),
    }
}

fn js_access(field: &str) -> String {
    let mut access = String::from("item");
    if field.is_empty() {
        return access;
    }
    for segment in field.split('.') {
        if is_identifier(segment) {
            access.push_str("?.");
            access.push_str(segment);
        } else {
            access.push_str("?.[");
            access.push_str(&quote(segment));
            access.push(']');
        }
    }
    access
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// A double-quoted literal valid in both JSON and JavaScript.
fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state(match_type: MatchType) -> QueryState {
        let mut state = QueryState::new(match_type);
        state.push(Criterion::new("status", Operator::Equals, "active"));
        state.push(Criterion::new("user.first-name", Operator::Contains, "Ann; x"));
        state.push(Criterion::new("email", Operator::IsEmpty, ""));
        state
    }

    #[test]
    fn test_transform_script() {
        assert_eq!(
            to_transform_script(&state(MatchType::Or)),
            "where or status equals \"active\"; user.first-name contains \"Ann; x\"; email isEmpty"
        );
        assert_eq!(to_transform_script(&QueryState::default()), "");
    }

    #[test]
    fn test_js_snippet() {
        assert_eq!(
            to_js_snippet(&state(MatchType::And)),
            "data.filter((item) => String(item?.status) === \"active\" && \
             String(item?.user?.[\"first-name\"] ?? '').toLowerCase().includes(\"ann; x\") && \
             (item?.email == null || item?.email === ''))"
        );
        assert_eq!(to_js_snippet(&QueryState::default()), "data.filter(() => true)");
    }
}
