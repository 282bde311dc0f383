//! Canned transport for FTP and database requests.
//!
//! Nothing here opens a socket. FTP, MongoDB and SQL requests are answered
//! with deterministic responses built from the request itself, so the rest
//! of the pipeline (classification, transforms, history, tables) behaves
//! the same as for HTTP.

use std::time::Instant;

use serde_json::{Map, Value, json};

use courier_application::ports::{ExecuteFuture, HttpClient, HttpClientError};
use courier_domain::{
    codegen::RequestMode,
    request::{HttpMethod, RequestSpec},
    response::ResponseSpec,
};

use crate::codegen::{FtpTarget, mongo_namespace};

const SIMULATED_HEADER: &str = "x-courier-simulated";

/// Simulated transport for the non-HTTP request modes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedProtocolClient;

impl SimulatedProtocolClient {
    /// Create a new simulated client.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the canned response for a request.
    ///
    /// # Errors
    ///
    /// Returns an error if a Mongo filter is not valid JSON.
    pub fn respond(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        let start = Instant::now();
        let mode = RequestMode::of(request);
        let (content_type, body) = match mode {
            RequestMode::Ftp => ("text/plain", ftp_reply(request)),
            RequestMode::MongoQuery => ("application/json", mongo_reply(request)?.to_string()),
            RequestMode::SqlQuery => ("application/json", sql_reply(request).to_string()),
            RequestMode::Rest => {
                return Err(HttpClientError::Other(
                    "simulated transport cannot send HTTP requests".to_string(),
                ));
            }
        };

        tracing::info!(mode = %mode, url = %request.url, "simulated protocol response");

        let headers = vec![
            ("content-type".to_string(), content_type.to_string()),
            (SIMULATED_HEADER.to_string(), "true".to_string()),
        ];
        Ok(ResponseSpec::new(200, headers, body.into_bytes(), start.elapsed()))
    }
}

impl HttpClient for SimulatedProtocolClient {
    fn execute<'a>(&'a self, request: &'a RequestSpec) -> ExecuteFuture<'a> {
        Box::pin(async move { self.respond(request) })
    }
}

/// FTP command implied by the method. GET reads, POST and PUT upload,
/// anything else lists.
const fn ftp_command(method: HttpMethod) -> HttpMethod {
    match method {
        HttpMethod::Retr | HttpMethod::Get => HttpMethod::Retr,
        HttpMethod::Stor | HttpMethod::Post | HttpMethod::Put => HttpMethod::Stor,
        _ => HttpMethod::List,
    }
}

fn ftp_reply(request: &RequestSpec) -> String {
    let target = FtpTarget::parse(&request.url);
    let session = format!(
        "220 {host}:{port} ready\n331 User {user} OK\n230 Logged in\n",
        host = target.host,
        port = target.port,
        user = target.user
    );

    let transfer = match ftp_command(request.method) {
        HttpMethod::Retr => {
            let name = target.path.rsplit('/').next().unwrap_or_default();
            format!(
                "150 Opening data connection for {path}\nSimulated contents of {name}\n",
                path = target.path
            )
        }
        HttpMethod::Stor => format!(
            "150 Ok to send data\nStored {bytes} bytes to {path}\n",
            bytes = request.body.len(),
            path = target.path
        ),
        _ => format!(
            "150 Here comes the directory listing\n\
             drwxr-xr-x 2 {user} ftp 4096 Jan 01 00:00 incoming\n\
             -rw-r--r-- 1 {user} ftp 1024 Jan 01 00:00 readme.txt\n\
             -rw-r--r-- 1 {user} ftp 2048 Jan 01 00:00 report.csv\n",
            user = target.user
        ),
    };

    format!("{session}{transfer}226 Transfer complete\n")
}

fn mongo_reply(request: &RequestSpec) -> Result<Value, HttpClientError> {
    let (db, collection) = mongo_namespace(&request.url);
    let raw = request.body.trim();
    let filter: Value = if raw.is_empty() {
        json!({})
    } else {
        serde_json::from_str(raw)
            .map_err(|e| HttpClientError::InvalidBody(format!("Invalid Mongo filter: {e}")))?
    };

    let fields: Map<String, Value> = filter
        .as_object()
        .map(|map| {
            map.iter()
                .filter(|(key, value)| !key.starts_with('$') && !value.is_object())
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default();

    let documents = (1..=2)
        .map(|n| {
            let mut doc = Map::new();
            doc.insert("_id".to_string(), json!(format!("{collection}-{n}")));
            doc.insert("db".to_string(), json!(db));
            doc.insert("collection".to_string(), json!(collection));
            doc.extend(fields.clone());
            Value::Object(doc)
        })
        .collect();

    Ok(Value::Array(documents))
}

fn sql_reply(request: &RequestSpec) -> Value {
    let query = request.body.trim();
    let query = if query.is_empty() { "SELECT 1" } else { query };
    let is_select = query
        .split_whitespace()
        .next()
        .is_some_and(|word| word.eq_ignore_ascii_case("select") || word.eq_ignore_ascii_case("with"));

    let rows = if is_select {
        json!([
            {"id": 1, "name": "alpha", "active": true},
            {"id": 2, "name": "beta", "active": false}
        ])
    } else {
        json!([])
    };
    let row_count = rows.as_array().map_or(0, Vec::len);

    json!({
        "query": query,
        "rows": rows,
        "rowCount": row_count,
    })
}
