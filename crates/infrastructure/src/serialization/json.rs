//! JSON serialization helpers for deterministic output.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to stable, pretty JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
/// - Object keys in the order the value holds them
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize + ?Sized>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Deserializes JSON from a string, pretty or minified.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use courier_domain::environment::Environment;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    #[test]
    fn test_stable_output_format() {
        let json = to_json_stable(&json!({"b": 1, "a": [true]})).expect("serialization should work");
        assert_eq!(json, "{\n  \"b\": 1,\n  \"a\": [\n    true\n  ]\n}\n");
    }

    #[test]
    fn test_reformatting_is_stable() {
        let compact = r#"{"z":{"y":null},"x":"v"}"#;
        let once = to_json_stable(&from_json::<Value>(compact).expect("valid json"))
            .expect("serialization should work");
        let twice = to_json_stable(&from_json::<Value>(&once).expect("valid json"))
            .expect("serialization should work");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_roundtrip_domain_type() {
        let mut env = Environment::new("staging");
        env.set("host", "api.staging.test");

        let json = to_json_stable(&env).expect("serialization should work");
        let restored: Environment = from_json(&json).expect("deserialization should work");
        assert_eq!(restored, env);
    }

    #[test]
    fn test_from_json_reports_errors() {
        let result = from_json::<Value>(r#"{"invalid": }"#);
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
