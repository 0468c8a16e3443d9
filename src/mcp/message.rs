//! JSON-RPC message envelopes.
//!
//! Requests are read leniently from an already-decoded JSON value: only the
//! top level has to be an object. Responses always carry `"jsonrpc": "2.0"`
//! and exactly one of `result` or `error`.

use crate::error::{DbError, DbResult};
use rmcp::ErrorData;
use serde::Serialize;
use serde_json::Value as JsonValue;

pub const JSONRPC_VERSION: &str = "2.0";

/// One incoming message.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Correlation id, echoed verbatim. `Null` when absent.
    pub id: JsonValue,
    pub method: String,
    /// Method payload. `Null` when absent.
    pub params: JsonValue,
}

impl Request {
    /// Read a request out of a decoded line.
    ///
    /// A method that is missing or not a string is kept as its JSON text so
    /// that the dispatcher can still name it in a method-not-found error.
    pub fn from_value(value: JsonValue) -> DbResult<Self> {
        let mut object = match value {
            JsonValue::Object(object) => object,
            other => {
                return Err(DbError::malformed(format!(
                    "expected a JSON object, got {}",
                    json_type_name(&other)
                )));
            }
        };

        let id = object.remove("id").unwrap_or(JsonValue::Null);
        let method = match object.remove("method") {
            Some(JsonValue::String(method)) => method,
            Some(other) => other.to_string(),
            None => JsonValue::Null.to_string(),
        };
        let params = object.remove("params").unwrap_or(JsonValue::Null);

        Ok(Self { id, method, params })
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Body of a response: a result value or an error object.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Result(JsonValue),
    Error(ErrorData),
}

/// One outgoing message.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub jsonrpc: &'static str,
    pub id: JsonValue,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Response {
    pub fn success(id: JsonValue, result: JsonValue) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            outcome: Outcome::Result(result),
        }
    }

    pub fn failure(id: JsonValue, error: ErrorData) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            outcome: Outcome::Error(error),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }

    /// Encode as a single compact line, without the trailing newline.
    pub fn to_line(&self) -> DbResult<String> {
        serde_json::to_string(self)
            .map_err(|e| DbError::internal(format!("Failed to encode response: {}", e)))
    }
}
