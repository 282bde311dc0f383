//! Snippet templates for every supported `(mode, target)` pair.

use indexmap::IndexMap;
use serde_json::Value;

use courier_domain::codegen::{CodeSnippet, CodeTarget, RequestMode};
use courier_domain::request::{BodyType, HttpMethod, RequestSpec};

use super::escape::{
    double_quoted, indent_tail, js_single, js_template, pretty_json, python_literal, shell_single,
};

const INDENT: &str = "  ";
const PY_INDENT: &str = "    ";
const GO_INDENT: &str = "\t";

/// Generates a snippet for `target_id`, or a one-line comment when the id
/// is unknown or belongs to another mode. Never fails.
#[must_use]
pub fn generate(request: &RequestSpec, target_id: &str) -> String {
    match target_id.parse::<CodeTarget>() {
        Ok(target) => generate_snippet(request, target).full_code(),
        Err(_) => no_template(target_id, RequestMode::of(request)),
    }
}

/// Generates a typed snippet for a known target.
#[must_use]
pub fn generate_snippet(request: &RequestSpec, target: CodeTarget) -> CodeSnippet {
    CodeGenerator::new(request).generate(target)
}

fn no_template(target_id: &str, mode: RequestMode) -> String {
    format!("// No template available for target '{target_id}' in {mode} mode")
}

/// Code generator that produces snippets from one request.
pub struct CodeGenerator<'a> {
    request: &'a RequestSpec,
    mode: RequestMode,
}

impl<'a> CodeGenerator<'a> {
    /// Create a new code generator for the given request.
    #[must_use]
    pub fn new(request: &'a RequestSpec) -> Self {
        Self {
            request,
            mode: RequestMode::of(request),
        }
    }

    /// Returns the mode derived from the request.
    #[must_use]
    pub const fn mode(&self) -> RequestMode {
        self.mode
    }

    /// Generate code for the given target.
    #[must_use]
    pub fn generate(&self, target: CodeTarget) -> CodeSnippet {
        if target.mode() != self.mode {
            return CodeSnippet::new(no_template(target.id(), self.mode), target);
        }

        match target {
            CodeTarget::Curl => self.generate_curl(),
            CodeTarget::JsFetch => self.generate_fetch(false),
            CodeTarget::TsFetch => self.generate_fetch(true),
            CodeTarget::JsAxios => self.generate_axios(AxiosFlavor::Browser),
            CodeTarget::TsAxios => self.generate_axios(AxiosFlavor::TypeScript),
            CodeTarget::NodeAxios => self.generate_axios(AxiosFlavor::Node),
            CodeTarget::NodeHttps => self.generate_node_https(),
            CodeTarget::PythonRequests => self.generate_python_requests(),
            CodeTarget::GoNative => self.generate_go(),
            CodeTarget::JavaOkHttp => self.generate_java_okhttp(),
            CodeTarget::NodeFtp => self.generate_node_ftp(),
            CodeTarget::NodeMongodb => self.generate_node_mongodb(),
            CodeTarget::PythonPymongo => self.generate_python_pymongo(),
            CodeTarget::NodePg => self.generate_node_pg(),
            CodeTarget::PythonPsycopg2 => self.generate_python_psycopg2(),
        }
    }

    /// Every materialized header in order, duplicates included, plus the
    /// content type implied by the body type.
    fn header_list(&self) -> Vec<(&'a str, &'a str)> {
        let mut headers: Vec<(&str, &str)> = self
            .request
            .headers
            .materialized()
            .map(|h| (h.key.as_str(), h.value.as_str()))
            .collect();
        if let Some(content_type) = self.request.implied_content_type() {
            headers.push(("Content-Type", content_type));
        }
        headers
    }

    /// Headers collapsed into an object; later duplicates overwrite.
    fn header_map(&self) -> IndexMap<&'a str, &'a str> {
        self.header_list().into_iter().collect()
    }

    fn body(&self) -> Option<&'a str> {
        self.request.effective_body()
    }

    /// Body parsed as JSON when the body type says JSON and it parses.
    fn json_body(&self) -> Option<Value> {
        let body = self.body()?;
        if self.request.body_type != BodyType::Json {
            return None;
        }
        serde_json::from_str(body).ok()
    }

    fn method(&self) -> &'static str {
        self.request.method.as_str()
    }

    fn generate_curl(&self) -> CodeSnippet {
        let mut parts = vec!["curl".to_string()];

        match self.request.method {
            HttpMethod::Get => {}
            HttpMethod::Head => parts.push("--head".to_string()),
            method => parts.push(format!("-X {}", method.as_str())),
        }

        parts.push(shell_single(&self.request.url));

        for (key, value) in self.header_list() {
            parts.push(format!("-H {}", shell_single(&format!("{key}: {value}"))));
        }

        if let Some(body) = self.body() {
            parts.push(format!("--data-raw {}", shell_single(body)));
        }

        CodeSnippet::new(parts.join(" \\\n  "), CodeTarget::Curl)
    }

    fn generate_fetch(&self, typed: bool) -> CodeSnippet {
        let mut code = String::new();

        if typed {
            code.push_str("const response: Response = await fetch(");
        } else {
            code.push_str("const response = await fetch(");
        }
        code.push_str(&js_single(&self.request.url));
        code.push_str(", {\n");
        code.push_str(&format!("{INDENT}method: {},\n", js_single(self.method())));

        let headers = self.header_map();
        if !headers.is_empty() {
            let literal = indent_tail(&pretty_json(&headers, INDENT), INDENT);
            code.push_str(&format!("{INDENT}headers: {literal},\n"));
        }

        if let Some(body) = self.body() {
            code.push_str(&format!("{INDENT}body: {},\n", js_template(body)));
        }

        code.push_str("});\n\n");
        if typed {
            code.push_str("const data: string = await response.text();\n");
        } else {
            code.push_str("const data = await response.text();\n");
        }
        code.push_str("console.log(response.status, data);");

        let target = if typed {
            CodeTarget::TsFetch
        } else {
            CodeTarget::JsFetch
        };
        CodeSnippet::new(code, target)
    }

    /// Body as a JavaScript expression: the raw JSON text when it parses,
    /// otherwise a string literal.
    fn js_body_expression(&self) -> Option<String> {
        let body = self.body()?;
        Some(if self.json_body().is_some() {
            body.trim().to_string()
        } else {
            js_single(body)
        })
    }

    fn generate_axios(&self, flavor: AxiosFlavor) -> CodeSnippet {
        let mut config = String::from("{\n");
        config.push_str(&format!(
            "{INDENT}method: {},\n",
            js_single(&self.method().to_ascii_lowercase())
        ));
        config.push_str(&format!("{INDENT}url: {},\n", js_single(&self.request.url)));

        let headers = self.header_map();
        if !headers.is_empty() {
            let literal = indent_tail(&pretty_json(&headers, INDENT), INDENT);
            config.push_str(&format!("{INDENT}headers: {literal},\n"));
        }

        if let Some(body) = self.js_body_expression() {
            config.push_str(&format!("{INDENT}data: {},\n", indent_tail(&body, INDENT)));
        }
        config.push('}');

        let mut code = String::new();
        match flavor {
            AxiosFlavor::Browser => {
                code.push_str(&format!("const response = await axios({config});\n\n"));
                code.push_str("console.log(response.data);");
            }
            AxiosFlavor::TypeScript => {
                code.push_str(&format!(
                    "const response: AxiosResponse = await axios({config});\n\n"
                ));
                code.push_str("console.log(response.data);");
            }
            AxiosFlavor::Node => {
                code.push_str(&format!("axios({config})\n"));
                code.push_str(&format!(
                    "{INDENT}.then((response) => {{\n{INDENT}{INDENT}console.log(response.data);\n{INDENT}}})\n"
                ));
                code.push_str(&format!(
                    "{INDENT}.catch((error) => {{\n{INDENT}{INDENT}console.error(error);\n{INDENT}}});"
                ));
            }
        }

        match flavor {
            AxiosFlavor::Browser => {
                CodeSnippet::new(code, CodeTarget::JsAxios).with_import("import axios from 'axios';")
            }
            AxiosFlavor::TypeScript => CodeSnippet::new(code, CodeTarget::TsAxios)
                .with_import("import axios, { AxiosResponse } from 'axios';"),
            AxiosFlavor::Node => CodeSnippet::new(code, CodeTarget::NodeAxios)
                .with_import("const axios = require('axios');"),
        }
    }

    fn generate_node_https(&self) -> CodeSnippet {
        let module = if self
            .request
            .url
            .trim_start()
            .to_ascii_lowercase()
            .starts_with("http://")
        {
            "http"
        } else {
            "https"
        };

        let mut code = String::from("const options = {\n");
        code.push_str(&format!("{INDENT}method: {},\n", js_single(self.method())));
        let headers = self.header_map();
        if !headers.is_empty() {
            let literal = indent_tail(&pretty_json(&headers, INDENT), INDENT);
            code.push_str(&format!("{INDENT}headers: {literal},\n"));
        }
        code.push_str("};\n\n");

        code.push_str(&format!(
            "const req = {module}.request({}, options, (res) => {{\n",
            js_single(&self.request.url)
        ));
        code.push_str(&format!("{INDENT}let data = '';\n"));
        code.push_str(&format!("{INDENT}res.on('data', (chunk) => {{\n"));
        code.push_str(&format!("{INDENT}{INDENT}data += chunk;\n"));
        code.push_str(&format!("{INDENT}}});\n"));
        code.push_str(&format!("{INDENT}res.on('end', () => {{\n"));
        code.push_str(&format!("{INDENT}{INDENT}console.log(res.statusCode, data);\n"));
        code.push_str(&format!("{INDENT}}});\n"));
        code.push_str("});\n\n");

        code.push_str("req.on('error', (error) => {\n");
        code.push_str(&format!("{INDENT}console.error(error);\n"));
        code.push_str("});\n");
        if let Some(body) = self.body() {
            code.push_str(&format!("req.write({});\n", js_single(body)));
        }
        code.push_str("req.end();");

        CodeSnippet::new(code, CodeTarget::NodeHttps)
            .with_import(format!("const {module} = require('{module}');"))
    }

    fn generate_python_requests(&self) -> CodeSnippet {
        let mut code = format!("url = {}\n", double_quoted(&self.request.url));

        let headers = self.header_map();
        let has_headers = !headers.is_empty();
        if has_headers {
            code.push_str(&format!("headers = {}\n", pretty_json(&headers, PY_INDENT)));
        }

        let mut args = vec![double_quoted(self.method()), "url".to_string()];
        if has_headers {
            args.push("headers=headers".to_string());
        }

        if let Some(body) = self.body() {
            if let Some(json) = self.json_body() {
                code.push_str(&format!("payload = {}\n", python_literal(&json, PY_INDENT)));
                args.push("json=payload".to_string());
            } else {
                code.push_str(&format!("payload = {}\n", double_quoted(body)));
                args.push("data=payload".to_string());
            }
        }

        code.push_str(&format!(
            "\nresponse = requests.request({})\n\n",
            args.join(", ")
        ));
        code.push_str("print(response.status_code)\nprint(response.text)");

        CodeSnippet::new(code, CodeTarget::PythonRequests).with_import("import requests")
    }

    fn generate_go(&self) -> CodeSnippet {
        let body = self.body();
        let mut code = String::from("func main() {\n");

        let reader = if let Some(body) = body {
            code.push_str(&format!(
                "{GO_INDENT}body := strings.NewReader({})\n",
                double_quoted(body)
            ));
            "body"
        } else {
            "nil"
        };
        code.push_str(&format!(
            "{GO_INDENT}req, err := http.NewRequest({}, {}, {reader})\n",
            double_quoted(self.method()),
            double_quoted(&self.request.url)
        ));
        code.push_str(&format!("{GO_INDENT}if err != nil {{\n{GO_INDENT}{GO_INDENT}panic(err)\n{GO_INDENT}}}\n"));

        for (key, value) in self.header_list() {
            code.push_str(&format!(
                "{GO_INDENT}req.Header.Add({}, {})\n",
                double_quoted(key),
                double_quoted(value)
            ));
        }

        code.push_str(&format!("\n{GO_INDENT}res, err := http.DefaultClient.Do(req)\n"));
        code.push_str(&format!("{GO_INDENT}if err != nil {{\n{GO_INDENT}{GO_INDENT}panic(err)\n{GO_INDENT}}}\n"));
        code.push_str(&format!("{GO_INDENT}defer res.Body.Close()\n\n"));
        code.push_str(&format!("{GO_INDENT}data, _ := io.ReadAll(res.Body)\n"));
        code.push_str(&format!("{GO_INDENT}fmt.Println(res.Status)\n"));
        code.push_str(&format!("{GO_INDENT}fmt.Println(string(data))\n"));
        code.push('}');

        let mut imports = vec![
            "package main".to_string(),
            String::new(),
            "import (".to_string(),
            format!("{GO_INDENT}\"fmt\""),
            format!("{GO_INDENT}\"io\""),
            format!("{GO_INDENT}\"net/http\""),
        ];
        if body.is_some() {
            imports.push(format!("{GO_INDENT}\"strings\""));
        }
        imports.push(")".to_string());

        CodeSnippet::new(code, CodeTarget::GoNative).with_imports(imports)
    }

    fn generate_java_okhttp(&self) -> CodeSnippet {
        const J: &str = "    ";
        let headers = self.header_list();
        let mut code = String::from("OkHttpClient client = new OkHttpClient();\n\n");

        let body_ref = if let Some(body) = self.body() {
            let media_type = headers
                .iter()
                .rev()
                .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
                .map_or_else(|| "null".to_string(), |(_, v)| {
                    format!("MediaType.parse({})", double_quoted(v))
                });
            code.push_str(&format!("MediaType mediaType = {media_type};\n"));
            code.push_str(&format!(
                "RequestBody body = RequestBody.create({}, mediaType);\n",
                double_quoted(body)
            ));
            "body"
        } else if self.request.method.carries_body() {
            code.push_str("RequestBody body = RequestBody.create(\"\", null);\n");
            "body"
        } else {
            "null"
        };

        code.push_str("Request request = new Request.Builder()\n");
        code.push_str(&format!("{J}.url({})\n", double_quoted(&self.request.url)));
        code.push_str(&format!(
            "{J}.method({}, {body_ref})\n",
            double_quoted(self.method())
        ));
        for (key, value) in headers {
            code.push_str(&format!(
                "{J}.addHeader({}, {})\n",
                double_quoted(key),
                double_quoted(value)
            ));
        }
        code.push_str(&format!("{J}.build();\n\n"));

        code.push_str("try (Response response = client.newCall(request).execute()) {\n");
        code.push_str(&format!("{J}System.out.println(response.code());\n"));
        code.push_str(&format!("{J}System.out.println(response.body().string());\n"));
        code.push('}');

        CodeSnippet::new(code, CodeTarget::JavaOkHttp).with_imports([
            "import okhttp3.MediaType;",
            "import okhttp3.OkHttpClient;",
            "import okhttp3.Request;",
            "import okhttp3.RequestBody;",
            "import okhttp3.Response;",
        ])
    }

    fn generate_node_ftp(&self) -> CodeSnippet {
        let target = FtpTarget::parse(&self.request.url);
        let path = js_single(&target.path);

        let mut code = format!("// {} {}\n", self.method(), self.request.url);
        code.push_str("const client = new Client();\n\n");
        code.push_str("client.on('ready', () => {\n");

        match self.request.method {
            HttpMethod::Retr => {
                code.push_str(&format!("{INDENT}client.get({path}, (err, stream) => {{\n"));
                code.push_str(&format!("{INDENT}{INDENT}if (err) throw err;\n"));
                code.push_str(&format!("{INDENT}{INDENT}stream.once('close', () => client.end());\n"));
                code.push_str(&format!("{INDENT}{INDENT}stream.pipe(process.stdout);\n"));
            }
            HttpMethod::Stor => {
                let data = self
                    .body()
                    .map_or_else(|| "Buffer.alloc(0)".to_string(), js_single);
                code.push_str(&format!("{INDENT}client.put({data}, {path}, (err) => {{\n"));
                code.push_str(&format!("{INDENT}{INDENT}if (err) throw err;\n"));
                code.push_str(&format!("{INDENT}{INDENT}client.end();\n"));
            }
            _ => {
                code.push_str(&format!("{INDENT}client.list({path}, (err, list) => {{\n"));
                code.push_str(&format!("{INDENT}{INDENT}if (err) throw err;\n"));
                code.push_str(&format!("{INDENT}{INDENT}console.dir(list);\n"));
                code.push_str(&format!("{INDENT}{INDENT}client.end();\n"));
            }
        }
        code.push_str(&format!("{INDENT}}});\n"));
        code.push_str("});\n\n");

        code.push_str("client.connect({\n");
        code.push_str(&format!("{INDENT}host: {},\n", js_single(&target.host)));
        code.push_str(&format!("{INDENT}port: {},\n", target.port));
        code.push_str(&format!("{INDENT}user: {},\n", js_single(&target.user)));
        code.push_str(&format!("{INDENT}password: {},\n", js_single(&target.password)));
        code.push_str("});");

        CodeSnippet::new(code, CodeTarget::NodeFtp).with_import("const Client = require('ftp');")
    }

    fn mongo_filter(&self) -> (Option<Value>, &'a str) {
        let raw = self.body().unwrap_or("{}");
        (serde_json::from_str(raw).ok(), raw)
    }

    fn generate_node_mongodb(&self) -> CodeSnippet {
        let (db, collection) = mongo_namespace(&self.request.url);
        let (parsed, raw) = self.mongo_filter();
        let filter = if parsed.is_some() {
            indent_tail(raw.trim(), &INDENT.repeat(2))
        } else {
            format!("JSON.parse({})", js_single(raw))
        };

        let mut code = String::from("async function run() {\n");
        code.push_str(&format!(
            "{INDENT}const client = new MongoClient({});\n",
            js_single(&self.request.url)
        ));
        code.push_str(&format!("{INDENT}try {{\n"));
        code.push_str(&format!("{INDENT}{INDENT}await client.connect();\n"));
        code.push_str(&format!(
            "{INDENT}{INDENT}const collection = client.db({}).collection({});\n",
            js_single(&db),
            js_single(&collection)
        ));
        code.push_str(&format!("{INDENT}{INDENT}const filter = {filter};\n"));
        code.push_str(&format!(
            "{INDENT}{INDENT}const documents = await collection.find(filter).toArray();\n"
        ));
        code.push_str(&format!("{INDENT}{INDENT}console.log(documents);\n"));
        code.push_str(&format!("{INDENT}}} finally {{\n"));
        code.push_str(&format!("{INDENT}{INDENT}await client.close();\n"));
        code.push_str(&format!("{INDENT}}}\n"));
        code.push_str("}\n\n");
        code.push_str("run().catch(console.error);");

        CodeSnippet::new(code, CodeTarget::NodeMongodb)
            .with_import("const { MongoClient } = require('mongodb');")
    }

    fn generate_python_pymongo(&self) -> CodeSnippet {
        let (db, collection) = mongo_namespace(&self.request.url);
        let (parsed, raw) = self.mongo_filter();

        let mut imports = vec!["from pymongo import MongoClient".to_string()];
        let query = match parsed {
            Some(value) => python_literal(&value, PY_INDENT),
            None => {
                imports.insert(0, "import json".to_string());
                format!("json.loads({})", double_quoted(raw))
            }
        };

        let mut code = format!("client = MongoClient({})\n", double_quoted(&self.request.url));
        code.push_str(&format!(
            "collection = client[{}][{}]\n\n",
            double_quoted(&db),
            double_quoted(&collection)
        ));
        code.push_str(&format!("query = {query}\n"));
        code.push_str("for document in collection.find(query):\n");
        code.push_str(&format!("{PY_INDENT}print(document)\n\n"));
        code.push_str("client.close()");

        CodeSnippet::new(code, CodeTarget::PythonPymongo).with_imports(imports)
    }

    fn sql_text(&self) -> &'a str {
        self.body().map_or("SELECT 1", str::trim)
    }

    fn generate_node_pg(&self) -> CodeSnippet {
        let mut code = String::from("async function run() {\n");
        code.push_str(&format!(
            "{INDENT}const client = new Client({{ connectionString: {} }});\n",
            js_single(&self.request.url)
        ));
        code.push_str(&format!("{INDENT}await client.connect();\n"));
        code.push_str(&format!("{INDENT}try {{\n"));
        code.push_str(&format!(
            "{INDENT}{INDENT}const result = await client.query({});\n",
            js_template(self.sql_text())
        ));
        code.push_str(&format!("{INDENT}{INDENT}console.log(result.rows);\n"));
        code.push_str(&format!("{INDENT}}} finally {{\n"));
        code.push_str(&format!("{INDENT}{INDENT}await client.end();\n"));
        code.push_str(&format!("{INDENT}}}\n"));
        code.push_str("}\n\n");
        code.push_str("run().catch(console.error);");

        CodeSnippet::new(code, CodeTarget::NodePg).with_import("const { Client } = require('pg');")
    }

    fn generate_python_psycopg2(&self) -> CodeSnippet {
        let mut code = format!("conn = psycopg2.connect({})\n", double_quoted(&self.request.url));
        code.push_str("try:\n");
        code.push_str(&format!("{PY_INDENT}with conn.cursor() as cur:\n"));
        code.push_str(&format!(
            "{PY_INDENT}{PY_INDENT}cur.execute({})\n",
            double_quoted(self.sql_text())
        ));
        code.push_str(&format!("{PY_INDENT}{PY_INDENT}for row in cur.fetchall():\n"));
        code.push_str(&format!("{PY_INDENT}{PY_INDENT}{PY_INDENT}print(row)\n"));
        code.push_str("finally:\n");
        code.push_str(&format!("{PY_INDENT}conn.close()"));

        CodeSnippet::new(code, CodeTarget::PythonPsycopg2).with_import("import psycopg2")
    }
}

#[derive(Debug, Clone, Copy)]
enum AxiosFlavor {
    Browser,
    TypeScript,
    Node,
}

/// Connection details extracted from an `ftp://` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FtpTarget {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) user: String,
    pub(crate) password: String,
    pub(crate) path: String,
}

impl FtpTarget {
    pub(crate) fn parse(raw: &str) -> Self {
        match url::Url::parse(raw.trim()) {
            Ok(url) => Self {
                host: url.host_str().unwrap_or("localhost").to_string(),
                port: url.port_or_known_default().unwrap_or(21),
                user: if url.username().is_empty() {
                    "anonymous".to_string()
                } else {
                    url.username().to_string()
                },
                password: url.password().unwrap_or_default().to_string(),
                path: if url.path().is_empty() {
                    "/".to_string()
                } else {
                    url.path().to_string()
                },
            },
            Err(_) => Self {
                host: raw.trim().trim_start_matches("ftp://").to_string(),
                port: 21,
                user: "anonymous".to_string(),
                password: String::new(),
                path: "/".to_string(),
            },
        }
    }
}

/// Database and collection from the first two path segments of a
/// connection string, defaulting to `test` and `items`.
pub(crate) fn mongo_namespace(url: &str) -> (String, String) {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = rest.split_once('/').map_or("", |(_, path)| path);
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let db = segments.next().unwrap_or("test").to_string();
    let collection = segments.next().unwrap_or("items").to_string();
    (db, collection)
}
