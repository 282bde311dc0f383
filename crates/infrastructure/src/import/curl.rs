//! curl command line parsing.

use courier_domain::request::{BodyType, Header, HttpMethod};

use super::{ImportError, RequestDraft};

/// Flags whose value is consumed and dropped.
const IGNORED_WITH_VALUE: &[&str] = &[
    "-u",
    "--user",
    "-o",
    "--output",
    "-e",
    "--referer",
    "-m",
    "--max-time",
    "--connect-timeout",
    "--retry",
    "-x",
    "--proxy",
    "-w",
    "--write-out",
    "--cert",
    "--key",
    "--cacert",
    "-c",
    "--cookie-jar",
];

const DATA_FLAGS: &[&str] = &[
    "-d",
    "--data",
    "--data-raw",
    "--data-binary",
    "--data-ascii",
    "--data-urlencode",
];

/// Splits a command line into words the way a POSIX shell would.
///
/// Single quotes keep everything literally, double quotes honour
/// backslash escapes of `"`, `\`, `$` and backticks, and a backslash
/// before a newline joins lines.
///
/// # Errors
///
/// Returns an error if a quote is never closed.
pub fn tokenize(input: &str) -> Result<Vec<String>, ImportError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => return Err(ImportError::UnterminatedQuote('\'')),
                    }
                }
            }
            '"' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(c @ ('"' | '\\' | '$' | '`')) => current.push(c),
                            Some('\n') => {}
                            Some(c) => {
                                current.push('\\');
                                current.push(c);
                            }
                            None => return Err(ImportError::UnterminatedQuote('"')),
                        },
                        Some(c) => current.push(c),
                        None => return Err(ImportError::UnterminatedQuote('"')),
                    }
                }
            }
            '\\' => match chars.next() {
                Some('\n') => {}
                Some('\r') if chars.peek() == Some(&'\n') => {
                    chars.next();
                }
                Some(c) => {
                    in_token = true;
                    current.push(c);
                }
                None => {}
            },
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                in_token = true;
                current.push(c);
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

/// Parses a curl command into a request draft.
///
/// # Errors
///
/// Returns an error if the command cannot be tokenized, a flag lacks its
/// value, the method is unknown or no URL is given.
pub fn parse_curl(command: &str) -> Result<RequestDraft, ImportError> {
    let tokens = tokenize(command)?;
    let mut args = tokens.into_iter().skip_while(|t| t != "curl").skip(1);

    let mut method: Option<String> = None;
    let mut url: Option<String> = None;
    let mut headers = Vec::new();
    let mut data: Vec<String> = Vec::new();
    let mut head = false;
    let mut get = false;

    while let Some(token) = args.next() {
        let (flag, inline) = split_flag(&token);
        let mut value = |name: &str| -> Result<String, ImportError> {
            match &inline {
                Some(v) => Ok(v.clone()),
                None => args
                    .next()
                    .ok_or_else(|| ImportError::MissingValue(name.to_string())),
            }
        };

        match flag.as_str() {
            "-X" | "--request" => method = Some(value(&flag)?),
            "-H" | "--header" => headers.push(parse_header(&value(&flag)?)),
            "-A" | "--user-agent" => headers.push(Header::new("User-Agent", value(&flag)?)),
            "-b" | "--cookie" => headers.push(Header::new("Cookie", value(&flag)?)),
            "--url" => url = Some(value(&flag)?),
            "-I" | "--head" => head = true,
            "-G" | "--get" => get = true,
            f if DATA_FLAGS.contains(&f) => data.push(value(&flag)?),
            f if IGNORED_WITH_VALUE.contains(&f) => {
                value(&flag)?;
            }
            f if f.starts_with('-') && f.len() > 1 => {
                tracing::debug!(flag = f, "ignoring curl flag");
            }
            _ => {
                if url.is_none() {
                    url = Some(token);
                }
            }
        }
    }

    let Some(mut url) = url else {
        return Err(ImportError::MissingUrl);
    };

    let mut body = (!data.is_empty()).then(|| data.join("&"));
    if get {
        if let Some(query) = body.take() {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&query);
        }
    }

    let method = match method {
        Some(name) => name
            .parse::<HttpMethod>()
            .map_err(|_| ImportError::UnsupportedMethod(name))?,
        None if head => HttpMethod::Head,
        None if body.is_some() => HttpMethod::Post,
        None => HttpMethod::Get,
    };

    let body_type = body.as_deref().map(|b| {
        if serde_json::from_str::<serde_json::Value>(b).is_ok() {
            BodyType::Json
        } else {
            BodyType::Text
        }
    });

    Ok(RequestDraft {
        method: Some(method),
        url: Some(url),
        headers,
        body,
        body_type,
    })
}

/// Splits attached values: `--request=POST`, `-XPOST`, `-HAccept: x`.
fn split_flag(token: &str) -> (String, Option<String>) {
    if let Some(long) = token.strip_prefix("--") {
        if let Some((name, value)) = long.split_once('=') {
            return (format!("--{name}"), Some(value.to_string()));
        }
        return (token.to_string(), None);
    }

    if token.len() > 2 && token.starts_with('-') && token.is_char_boundary(2) {
        let (flag, rest) = token.split_at(2);
        if matches!(flag, "-X" | "-H" | "-d" | "-A" | "-b") {
            return (flag.to_string(), Some(rest.to_string()));
        }
    }

    (token.to_string(), None)
}

fn parse_header(raw: &str) -> Header {
    match raw.split_once(':') {
        Some((key, value)) => Header::new(key.trim(), value.trim()),
        None => Header::new(raw.trim().trim_end_matches(';'), ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tokenize_quotes_and_continuations() {
        let tokens = tokenize("curl 'a b' \"c \\\"d\\\" $\" e\\ f \\\n  -s");
        assert_eq!(
            tokens,
            Ok(vec![
                "curl".to_string(),
                "a b".to_string(),
                "c \"d\" $".to_string(),
                "e f".to_string(),
                "-s".to_string()
            ])
        );
    }

    #[test]
    fn test_tokenize_keeps_empty_quoted_word() {
        assert_eq!(
            tokenize("curl -d '' x"),
            Ok(vec![
                "curl".to_string(),
                "-d".to_string(),
                String::new(),
                "x".to_string()
            ])
        );
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(tokenize("curl 'oops"), Err(ImportError::UnterminatedQuote('\'')));
        assert_eq!(tokenize("curl \"oops"), Err(ImportError::UnterminatedQuote('"')));
    }

    #[test]
    fn test_multiline_command() {
        let command = "curl -X PUT \\\n  -H 'Content-Type: application/json' \\\n  -H 'X-Tag: 1' \\\n  -H 'X-Tag: 2' \\\n  -d 'plain' \\\n  https://api.test/items/1";
        let draft = parse_curl(command).unwrap_or_default();
        assert_eq!(draft.method, Some(HttpMethod::Put));
        assert_eq!(draft.url.as_deref(), Some("https://api.test/items/1"));
        assert_eq!(draft.headers.len(), 3);
        assert_eq!(draft.body.as_deref(), Some("plain"));
        assert_eq!(draft.body_type, Some(BodyType::Text));
    }

    #[test]
    fn test_attached_values_and_url_flag() {
        let draft = parse_curl("curl -XDELETE --url=https://a.test -HAccept:x").unwrap_or_default();
        assert_eq!(draft.method, Some(HttpMethod::Delete));
        assert_eq!(draft.url.as_deref(), Some("https://a.test"));
        assert_eq!(draft.headers, vec![Header::new("Accept", "x")]);
    }

    #[test]
    fn test_data_implies_post_and_joins() {
        let draft = parse_curl("curl https://a.test -d a=1 --data-urlencode b=2").unwrap_or_default();
        assert_eq!(draft.method, Some(HttpMethod::Post));
        assert_eq!(draft.body.as_deref(), Some("a=1&b=2"));
    }

    #[test]
    fn test_get_flag_moves_data_to_query() {
        let draft = parse_curl("curl -G https://a.test/s?x=1 -d q=rust").unwrap_or_default();
        assert_eq!(draft.method, Some(HttpMethod::Get));
        assert_eq!(draft.url.as_deref(), Some("https://a.test/s?x=1&q=rust"));
        assert_eq!(draft.body, None);
    }

    #[test]
    fn test_head_agent_and_ignored_flags() {
        let draft = parse_curl("curl -sSL -k --compressed -I -u me:pw -A bot https://a.test")
            .unwrap_or_default();
        assert_eq!(draft.method, Some(HttpMethod::Head));
        assert_eq!(draft.url.as_deref(), Some("https://a.test"));
        assert_eq!(draft.headers, vec![Header::new("User-Agent", "bot")]);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_curl("curl -s -H 'A: b'"), Err(ImportError::MissingUrl));
        assert_eq!(
            parse_curl("curl https://a.test -H"),
            Err(ImportError::MissingValue("-H".to_string()))
        );
        assert_eq!(
            parse_curl("curl -X BREW https://a.test"),
            Err(ImportError::UnsupportedMethod("BREW".to_string()))
        );
    }
}
