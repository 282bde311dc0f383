//! Variable resolution engine

use courier_domain::{
    environment::Environment,
    request::{Header, RequestSpec},
};

use super::parser::parse_variables;

/// Result of resolving one string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// The string with every resolvable placeholder substituted.
    pub resolved: String,

    /// Keys that had no enabled value.
    pub unresolved: Vec<String>,
}

/// Resolves `{{key}}` placeholders against an optional active environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableResolver<'a> {
    environment: Option<&'a Environment>,
}

impl<'a> VariableResolver<'a> {
    /// Creates a resolver. With no environment nothing resolves.
    #[must_use]
    pub const fn new(environment: Option<&'a Environment>) -> Self {
        Self { environment }
    }

    /// Resolves all placeholders in the input string.
    #[must_use]
    pub fn resolve(&self, input: &str) -> ResolutionResult {
        let references = parse_variables(input);
        if references.is_empty() {
            return ResolutionResult {
                resolved: input.to_string(),
                unresolved: Vec::new(),
            };
        }

        let mut unresolved = Vec::new();
        let mut result = String::with_capacity(input.len());
        let mut last_end = 0;

        for var_ref in &references {
            result.push_str(&input[last_end..var_ref.span.start]);

            match self.environment.and_then(|env| env.resolve(&var_ref.name)) {
                Some(value) => result.push_str(value),
                None => {
                    result.push_str(&input[var_ref.span.clone()]);
                    unresolved.push(var_ref.name.clone());
                }
            }

            last_end = var_ref.span.end;
        }

        result.push_str(&input[last_end..]);

        ResolutionResult {
            resolved: result,
            unresolved,
        }
    }

    /// Returns a copy of the request with url, header keys and values,
    /// and body interpolated.
    #[must_use]
    pub fn resolve_request(&self, request: &RequestSpec) -> RequestSpec {
        let mut resolved = request.clone();
        resolved.url = self.resolve(&request.url).resolved;
        resolved.body = self.resolve(&request.body).resolved;
        for header in resolved.headers.all_mut() {
            *header = Header {
                key: self.resolve(&header.key).resolved,
                value: self.resolve(&header.value).resolved,
                enabled: header.enabled,
            };
        }
        resolved
    }

    /// Returns every unresolved key across the request, deduplicated in
    /// order of first appearance.
    #[must_use]
    pub fn unresolved_in(&self, request: &RequestSpec) -> Vec<String> {
        let mut texts = vec![request.url.as_str(), request.body.as_str()];
        for header in request.headers.all() {
            texts.push(&header.key);
            texts.push(&header.value);
        }

        let mut keys: Vec<String> = Vec::new();
        for text in texts {
            for key in self.resolve(text).unresolved {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }
}

/// Interpolates one string against an optional environment.
#[must_use]
pub fn interpolate(input: &str, environment: Option<&Environment>) -> String {
    VariableResolver::new(environment).resolve(input).resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_domain::request::BodyType;
    use pretty_assertions::assert_eq;

    fn env() -> Environment {
        let mut env = Environment::new("dev");
        env.set("host", "api.test");
        env.set("token", "secret");
        env
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        let env = env();
        let result = VariableResolver::new(Some(&env)).resolve("https://{{host}}/{{path}}");
        assert_eq!(result.resolved, "https://api.test/{{path}}");
        assert_eq!(result.unresolved, vec!["path".to_string()]);
    }

    #[test]
    fn test_resolve_without_environment_is_identity() {
        let result = VariableResolver::default().resolve("{{a}} and {{ b }}");
        assert_eq!(result.resolved, "{{a}} and {{ b }}");
        assert_eq!(result.unresolved.len(), 2);
    }

    #[test]
    fn test_disabled_variable_is_unresolved() {
        let mut env = Environment::new("dev");
        env.variables.push(courier_domain::environment::Variable::disabled("host", "x"));
        assert_eq!(interpolate("{{host}}", Some(&env)), "{{host}}");
    }

    #[test]
    fn test_resolve_request_touches_url_headers_and_body() {
        let env = env();
        let request = RequestSpec::post("https://{{host}}/users")
            .with_header("Authorization", "Bearer {{token}}")
            .with_header("X-{{missing}}", "1")
            .with_body(r#"{"host":"{{host}}"}"#, BodyType::Json);

        let resolver = VariableResolver::new(Some(&env));
        let resolved = resolver.resolve_request(&request);

        assert_eq!(resolved.url, "https://api.test/users");
        assert_eq!(resolved.headers.all()[0].value, "Bearer secret");
        assert_eq!(resolved.headers.all()[1].key, "X-{{missing}}");
        assert_eq!(resolved.body, r#"{"host":"api.test"}"#);
        assert_eq!(resolver.unresolved_in(&request), vec!["missing".to_string()]);
    }
}
