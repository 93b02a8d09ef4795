//! Wire types exchanged with the front end.
//!
//! Inbound messages arrive as a `type` string plus a string `content`. Request payloads are
//! parsed in two stages: first as a JSON object, and when that fails the raw content is
//! taken as the query itself.
//!
//! Outbound results are JSON documents handed to a named `window` callback. [js_callback]
//! builds the guarded JavaScript snippet and [escape_js] makes the payload safe to embed in
//! a single-quoted JavaScript string literal.
//!
//! # Caution:
//! The field names here are the front-end contract. Renaming one silently breaks the web view.

use crate::core::FileEntry;
use crate::error::BridgeResult;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Callback receiving `{ "files": [...] }`.
pub const FILE_LIST_CALLBACK: &str = "onFileListResult";
/// Callback receiving `{ "commands": [...] }`.
pub const COMMAND_LIST_CALLBACK: &str = "onCommandListResult";
/// Callback receiving a user-visible error string.
pub const ERROR_MESSAGE_CALLBACK: &str = "addErrorMessage";
/// Callback invoked without arguments once the browser holds input focus.
pub const FOCUS_RESTORED_CALLBACK: &str = "__onFocusRestored";

/// Envelope of a single message coming from the web view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: String,
}

/// Payload of a `list_files` request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilesRequest {
    pub query: String,
    pub current_path: String,
}

impl ListFilesRequest {
    /// Parses the payload, falling back to treating the raw content as the query.
    pub fn parse(content: &str) -> Self {
        if content.is_empty() {
            return Self::default();
        }
        Self::from_object(content).unwrap_or_else(|| Self {
            query: content.to_string(),
            current_path: String::new(),
        })
    }

    fn from_object(content: &str) -> Option<Self> {
        let object = parse_object(content)?;
        Some(Self {
            query: scalar_field(&object, "query")?,
            current_path: scalar_field(&object, "currentPath")?,
        })
    }
}

/// Payload of a `get_commands` request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandQuery {
    pub query: String,
}

impl CommandQuery {
    /// Parses the payload, falling back to treating the raw content as the query.
    pub fn parse(content: &str) -> Self {
        if content.is_empty() {
            return Self::default();
        }
        parse_object(content)
            .and_then(|object| scalar_field(&object, "query"))
            .map(|query| Self { query })
            .unwrap_or_else(|| Self {
                query: content.to_string(),
            })
    }
}

fn parse_object(content: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}

/// Reads a field as text. Numbers and booleans are rendered, a missing field is empty.
/// `null`, arrays and objects yield `None`, which sends the caller to the raw fallback.
fn scalar_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key) {
        None => Some(String::new()),
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(_) => None,
    }
}

/// Response body for `list_files`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileListResponse {
    pub files: Vec<FileEntry>,
}

/// A slash command as shown in the front end. `label` always starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandItem {
    pub label: String,
    pub description: String,
}

/// Response body for `get_commands`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandListResponse {
    pub commands: Vec<CommandItem>,
}

/// Escapes `raw` for embedding inside a single-quoted JavaScript string literal.
pub fn escape_js(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 8);
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}

/// Builds a guarded call of `window.<function>`, passing `arg` as an escaped string.
///
/// A missing callback on the page is a no-op rather than a script error.
pub fn js_callback(function: &str, arg: Option<&str>) -> String {
    match arg {
        Some(arg) => format!(
            "if (window.{function}) {{ window.{function}('{}'); }}",
            escape_js(arg)
        ),
        None => format!("if (window.{function}) {{ window.{function}(); }}"),
    }
}

/// Serializes `body` and wraps it in a guarded call of `window.<function>`.
pub fn json_callback<T: Serialize>(function: &str, body: &T) -> BridgeResult<String> {
    let json = serde_json::to_string(body)?;
    Ok(js_callback(function, Some(&json)))
}
