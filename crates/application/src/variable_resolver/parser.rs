//! Placeholder parser for `{{key}}` syntax
//!
//! Parses strings to extract placeholder references with their positions.

use std::ops::Range;

/// A placeholder found in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    /// The variable key, trimmed, without the braces.
    pub name: String,

    /// Byte range of the whole `{{...}}` in the original string.
    pub span: Range<usize>,
}

impl VariableReference {
    /// Creates a new reference.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Parses a string and extracts all placeholder references in order.
///
/// Whitespace inside the braces is ignored. Empty placeholders and an
/// unterminated `{{` are not references.
///
/// # Examples
///
/// ```
/// use courier_application::variable_resolver::parse_variables;
///
/// let refs = parse_variables("{{base_url}}/users/{{ id }}");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[1].name, "id");
/// ```
#[must_use]
pub fn parse_variables(input: &str) -> Vec<VariableReference> {
    let mut references = Vec::new();
    let mut rest = 0;

    while let Some(open) = input[rest..].find("{{") {
        let start = rest + open;
        let inner_start = start + 2;
        let Some(close) = input[inner_start..].find("}}") else {
            break;
        };
        let end = inner_start + close + 2;
        let name = input[inner_start..inner_start + close].trim();

        if name.is_empty() || name.contains('{') {
            // Resume right after the first brace so `{{{{a}}` still finds `{{a}}`
            rest = start + 1;
            continue;
        }

        references.push(VariableReference::new(name, start..end));
        rest = end;
    }

    references
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_variable() {
        let refs = parse_variables("{{name}}");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "name");
        assert_eq!(refs[0].span, 0..8);
    }

    #[test]
    fn test_parse_multiple_variables() {
        let refs = parse_variables("{{base_url}}/api/{{version}}/users");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].name, "base_url");
        assert_eq!(refs[1].name, "version");
    }

    #[test]
    fn test_parse_with_whitespace() {
        let refs = parse_variables("{{ name }}");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "name");
    }

    #[test]
    fn test_unclosed_variable() {
        assert!(parse_variables("{{name").is_empty());
    }

    #[test]
    fn test_empty_variable() {
        assert!(parse_variables("{{}}").is_empty());
        assert!(parse_variables("{{   }}").is_empty());
    }

    #[test]
    fn test_adjacent_variables() {
        let names: Vec<String> = parse_variables("{{a}}{{b}}{{c}}")
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_extra_opening_braces() {
        let input = "{{{{a}}";
        let refs = parse_variables(input);
        assert_eq!(refs.len(), 1);
        assert_eq!(&input[refs[0].span.clone()], "{{a}}");
    }

    #[test]
    fn test_variable_in_json() {
        let refs = parse_variables(r#"{"name": "{{user_name}}", "id": 1}"#);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "user_name");
    }

    #[test]
    fn test_unbalanced_braces() {
        assert!(parse_variables("Hello World!").is_empty());
        assert!(parse_variables("incomplete}}").is_empty());
    }

    #[test]
    fn test_span_positions() {
        let input = "Hello {{name}}, welcome!";
        let refs = parse_variables(input);
        assert_eq!(&input[refs[0].span.clone()], "{{name}}");
    }
}
