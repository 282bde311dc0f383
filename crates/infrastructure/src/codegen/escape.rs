//! Literal escaping for each target syntax.
//!
//! Every value spliced into a snippet goes through one of these helpers,
//! so a quote in a header or body can never terminate the surrounding
//! literal.

use std::fmt::Write as _;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Quotes a value for a POSIX shell: single quotes, with `'` written as `'\''`.
#[must_use]
pub fn shell_single(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Quotes a value as a JavaScript/TypeScript single-quoted string.
#[must_use]
pub fn js_single(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Quotes a value as a JavaScript template literal. Newlines are kept.
#[must_use]
pub fn js_template(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${");
    format!("`{escaped}`")
}

/// Quotes a value as a double-quoted string valid in Go, Java and Python.
#[must_use]
pub fn double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Pretty-prints a value as JSON with the given indent unit.
#[must_use]
pub fn pretty_json<T: Serialize>(value: &T, indent: &str) -> String {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    if value.serialize(&mut serializer).is_err() {
        return "{}".to_string();
    }
    String::from_utf8(buffer).unwrap_or_else(|_| "{}".to_string())
}

/// Renders a JSON value as a Python literal (`None`, `True`, `False`).
#[must_use]
pub fn python_literal(value: &Value, indent: &str) -> String {
    let mut out = String::new();
    write_python(&mut out, value, indent, 0);
    out
}

fn write_python(out: &mut String, value: &Value, indent: &str, depth: usize) {
    match value {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(&double_quoted(s)),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Array(items) => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                out.push_str(&indent.repeat(depth + 1));
                write_python(out, item, indent, depth + 1);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            out.push_str(&indent.repeat(depth));
            out.push(']');
        }
        Value::Object(map) => {
            out.push_str("{\n");
            for (i, (key, item)) in map.iter().enumerate() {
                out.push_str(&indent.repeat(depth + 1));
                out.push_str(&double_quoted(key));
                out.push_str(": ");
                write_python(out, item, indent, depth + 1);
                if i + 1 < map.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            out.push_str(&indent.repeat(depth));
            out.push('}');
        }
    }
}

/// Indents every line after the first by `prefix`.
#[must_use]
pub fn indent_tail(text: &str, prefix: &str) -> String {
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || line.is_empty() {
                line.to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_shell_single_only_escapes_quotes() {
        assert_eq!(shell_single("it's $HOME"), "'it'\\''s $HOME'");
    }

    #[test]
    fn test_js_single() {
        assert_eq!(js_single("a'b\\c\nd"), "'a\\'b\\\\c\\nd'");
    }

    #[test]
    fn test_js_template() {
        assert_eq!(js_template("`${x}`\\"), "`\\`\\${x}\\`\\\\`");
    }

    #[test]
    fn test_double_quoted() {
        assert_eq!(double_quoted("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
        assert_eq!(double_quoted("\u{1}"), "\"\\u0001\"");
    }

    #[test]
    fn test_python_literal() {
        let value = json!({"a": [true, null], "b": "x"});
        assert_eq!(
            python_literal(&value, "    "),
            "{\n    \"a\": [\n        True,\n        None\n    ],\n    \"b\": \"x\"\n}"
        );
    }

    #[test]
    fn test_indent_tail() {
        assert_eq!(indent_tail("{\n  \"a\": 1\n}", "  "), "{\n    \"a\": 1\n  }");
    }
}
