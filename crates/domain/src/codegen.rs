//! Code snippet types.
//!
//! A snippet is generated for a `(mode, target)` pair: the mode is the
//! protocol family derived from the request, the target the language and
//! client library the code is written for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::request::{HttpMethod, RequestSpec};

/// Protocol family of a request, selecting the available templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestMode {
    /// Plain HTTP(S), including SOAP over HTTP.
    Rest,
    /// FTP commands against an `ftp://` URL.
    Ftp,
    /// MongoDB query.
    MongoQuery,
    /// SQL query.
    SqlQuery,
}

impl RequestMode {
    /// Derives the mode from the request URL scheme and method.
    #[must_use]
    pub fn of(request: &RequestSpec) -> Self {
        let url = request.url.trim_start();
        if url.get(..6).is_some_and(|scheme| scheme.eq_ignore_ascii_case("ftp://")) {
            return Self::Ftp;
        }
        match request.method {
            HttpMethod::MongoQuery => Self::MongoQuery,
            HttpMethod::SqlQuery => Self::SqlQuery,
            _ => Self::Rest,
        }
    }

    /// Returns the mode name used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Ftp => "ftp",
            Self::MongoQuery => "mongo-query",
            Self::SqlQuery => "sql-query",
        }
    }
}

impl fmt::Display for RequestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported snippet targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeTarget {
    /// cURL command line
    #[serde(rename = "curl")]
    Curl,
    /// JavaScript with fetch API
    #[serde(rename = "js-fetch")]
    JsFetch,
    /// TypeScript with fetch API
    #[serde(rename = "ts-fetch")]
    TsFetch,
    /// JavaScript with axios (browser)
    #[serde(rename = "js-axios")]
    JsAxios,
    /// TypeScript with axios
    #[serde(rename = "ts-axios")]
    TsAxios,
    /// Node.js with axios
    #[serde(rename = "node-axios")]
    NodeAxios,
    /// Node.js with the built-in https module
    #[serde(rename = "node-https")]
    NodeHttps,
    /// Python with requests
    #[serde(rename = "python-requests")]
    PythonRequests,
    /// Go with net/http
    #[serde(rename = "go-native")]
    GoNative,
    /// Java with OkHttp
    #[serde(rename = "java-okhttp")]
    JavaOkHttp,
    /// Node.js with the ftp package
    #[serde(rename = "node-ftp")]
    NodeFtp,
    /// Node.js with the official MongoDB driver
    #[serde(rename = "node-mongodb")]
    NodeMongodb,
    /// Python with pymongo
    #[serde(rename = "python-pymongo")]
    PythonPymongo,
    /// Node.js with pg
    #[serde(rename = "node-pg")]
    NodePg,
    /// Python with psycopg2
    #[serde(rename = "python-psycopg2")]
    PythonPsycopg2,
}

impl CodeTarget {
    /// Returns every target.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Curl,
            Self::JsFetch,
            Self::TsFetch,
            Self::JsAxios,
            Self::TsAxios,
            Self::NodeAxios,
            Self::NodeHttps,
            Self::PythonRequests,
            Self::GoNative,
            Self::JavaOkHttp,
            Self::NodeFtp,
            Self::NodeMongodb,
            Self::PythonPymongo,
            Self::NodePg,
            Self::PythonPsycopg2,
        ]
    }

    /// Returns the targets available for a mode.
    #[must_use]
    pub fn for_mode(mode: RequestMode) -> Vec<Self> {
        Self::all()
            .iter()
            .copied()
            .filter(|t| t.mode() == mode)
            .collect()
    }

    /// Returns the identifier used to select this target.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Curl => "curl",
            Self::JsFetch => "js-fetch",
            Self::TsFetch => "ts-fetch",
            Self::JsAxios => "js-axios",
            Self::TsAxios => "ts-axios",
            Self::NodeAxios => "node-axios",
            Self::NodeHttps => "node-https",
            Self::PythonRequests => "python-requests",
            Self::GoNative => "go-native",
            Self::JavaOkHttp => "java-okhttp",
            Self::NodeFtp => "node-ftp",
            Self::NodeMongodb => "node-mongodb",
            Self::PythonPymongo => "python-pymongo",
            Self::NodePg => "node-pg",
            Self::PythonPsycopg2 => "python-psycopg2",
        }
    }

    /// Returns the mode this target generates code for.
    #[must_use]
    pub const fn mode(self) -> RequestMode {
        match self {
            Self::NodeFtp => RequestMode::Ftp,
            Self::NodeMongodb | Self::PythonPymongo => RequestMode::MongoQuery,
            Self::NodePg | Self::PythonPsycopg2 => RequestMode::SqlQuery,
            _ => RequestMode::Rest,
        }
    }

    /// Get display name for the target.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Curl => "cURL",
            Self::JsFetch => "JavaScript (fetch)",
            Self::TsFetch => "TypeScript (fetch)",
            Self::JsAxios => "JavaScript (axios)",
            Self::TsAxios => "TypeScript (axios)",
            Self::NodeAxios => "Node.js (axios)",
            Self::NodeHttps => "Node.js (https)",
            Self::PythonRequests => "Python (requests)",
            Self::GoNative => "Go (net/http)",
            Self::JavaOkHttp => "Java (OkHttp)",
            Self::NodeFtp => "Node.js (ftp)",
            Self::NodeMongodb => "Node.js (mongodb)",
            Self::PythonPymongo => "Python (pymongo)",
            Self::NodePg => "Node.js (pg)",
            Self::PythonPsycopg2 => "Python (psycopg2)",
        }
    }

    /// Get file extension for the target language.
    #[must_use]
    pub const fn file_extension(self) -> &'static str {
        match self {
            Self::Curl => "sh",
            Self::TsFetch | Self::TsAxios => "ts",
            Self::PythonRequests | Self::PythonPymongo | Self::PythonPsycopg2 => "py",
            Self::GoNative => "go",
            Self::JavaOkHttp => "java",
            _ => "js",
        }
    }
}

impl fmt::Display for CodeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CodeTarget {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.id() == s)
            .ok_or_else(|| DomainError::UnknownTarget(s.to_string()))
    }
}

/// Generated code snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnippet {
    /// The generated code.
    pub code: String,
    /// Target of the generated code.
    pub target: CodeTarget,
    /// Imports/requires needed by the code.
    pub imports: Vec<String>,
}

impl CodeSnippet {
    /// Create a new code snippet.
    #[must_use]
    pub fn new(code: impl Into<String>, target: CodeTarget) -> Self {
        Self {
            code: code.into(),
            target,
            imports: Vec::new(),
        }
    }

    /// Add an import.
    #[must_use]
    pub fn with_import(mut self, import: impl Into<String>) -> Self {
        self.imports.push(import.into());
        self
    }

    /// Add multiple imports.
    #[must_use]
    pub fn with_imports(mut self, imports: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.imports.extend(imports.into_iter().map(Into::into));
        self
    }

    /// Get the complete code including imports.
    #[must_use]
    pub fn full_code(&self) -> String {
        if self.imports.is_empty() {
            return self.code.clone();
        }
        format!("{}\n\n{}", self.imports.join("\n"), self.code)
    }
}
