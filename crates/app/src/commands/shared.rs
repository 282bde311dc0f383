//! Arguments shared by several commands.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use serde_json::Value;

use courier_application::{AppState, ApplicationError};
use courier_domain::request::{BodyType, Header, HttpMethod, RequestSpec};
use courier_infrastructure::{RequestDraft, from_json};

use super::CommandResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    #[arg(
        short = 'o',
        long = "output",
        help = "Output format: text or json",
        default_value_t = OutputFormat::Text,
        value_enum,
        ignore_case = true
    )]
    pub output: OutputFormat,
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// JSON file to read; stdin when omitted or '-'
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,
}

impl InputArgs {
    /// Reads the whole input as text.
    pub fn read_text(&self) -> CommandResult<String> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
            _ => Ok(std::io::read_to_string(std::io::stdin())?),
        }
    }

    /// Reads and parses the input as JSON.
    pub fn read_json(&self) -> CommandResult<Value> {
        Ok(from_json(&self.read_text()?)?)
    }
}

/// Request composition flags. Anything left unset comes from the base
/// request: a saved one (`--from`), a fresh one when a URL is given, or
/// the last used request.
#[derive(Debug, Args, Default)]
pub struct RequestArgs {
    /// Target URL
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Request method (GET, POST, ..., LIST, RETR, STOR, MONGO_QUERY, SQL_QUERY)
    #[arg(short = 'X', long = "request", value_name = "METHOD", value_parser = parse_method)]
    pub method: Option<HttpMethod>,

    /// Header to add; replaces existing headers with the same name
    #[arg(short = 'H', long = "header", value_name = "NAME: VALUE", value_parser = parse_header)]
    pub headers: Vec<Header>,

    /// Request body
    #[arg(short = 'd', long = "data", value_name = "BODY", conflicts_with = "data_file")]
    pub data: Option<String>,

    /// Read the request body from a file
    #[arg(long = "data-file", value_name = "FILE")]
    pub data_file: Option<PathBuf>,

    /// Body type: json, text, xml, query or form
    #[arg(long = "body-type", value_name = "TYPE", value_parser = parse_body_type)]
    pub body_type: Option<BodyType>,

    /// Start from a saved request
    #[arg(long = "from", value_name = "COLLECTION/REQUEST", conflicts_with = "url")]
    pub from: Option<String>,
}

impl RequestArgs {
    /// Builds the request described by the flags.
    pub fn resolve(&self, state: &AppState) -> CommandResult<RequestSpec> {
        let mut request = if let Some(path) = &self.from {
            saved_request(state, path)?
        } else if let Some(url) = &self.url {
            RequestSpec::get(url.trim()).with_name(url.trim())
        } else if state.config.url.trim().is_empty() {
            return Err(ApplicationError::Invalid(
                "no request to use; pass a URL or --from COLLECTION/REQUEST".to_string(),
            )
            .into());
        } else {
            state.config.clone()
        };

        let body = match (&self.data, &self.data_file) {
            (Some(data), _) => Some(data.clone()),
            (None, Some(path)) => Some(std::fs::read_to_string(path)?),
            (None, None) => None,
        };

        // A body without an explicit method on a fresh request means POST, as with curl.
        let method = self.method.or_else(|| {
            (body.is_some() && self.url.is_some() && request.method == HttpMethod::Get)
                .then_some(HttpMethod::Post)
        });

        RequestDraft {
            method,
            url: None,
            headers: self.headers.clone(),
            body,
            body_type: self.body_type,
        }
        .apply_to(&mut request);

        Ok(request)
    }
}

fn saved_request(state: &AppState, path: &str) -> CommandResult<RequestSpec> {
    let (collection, name) = path.split_once('/').ok_or_else(|| {
        ApplicationError::Invalid(format!("expected COLLECTION/REQUEST, got '{path}'"))
    })?;
    state
        .collection(collection)
        .ok_or_else(|| ApplicationError::NotFound(format!("collection '{collection}'")))?
        .find(name)
        .cloned()
        .ok_or_else(|| ApplicationError::NotFound(format!("request '{name}'")).into())
}

pub fn parse_method(value: &str) -> Result<HttpMethod, String> {
    value.parse().map_err(|e| format!("{e}"))
}

pub fn parse_body_type(value: &str) -> Result<BodyType, String> {
    value.parse()
}

pub fn parse_header(value: &str) -> Result<Header, String> {
    let (key, value) = value
        .split_once(':')
        .ok_or_else(|| "header must be in format NAME: VALUE".to_string())?;
    let key = key.trim();
    if key.is_empty() {
        return Err("header name must not be empty".to_string());
    }
    Ok(Header::new(key, value.trim()))
}
