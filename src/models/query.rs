//! Query-related data models.
//!
//! This module defines parameter values and result rows for read queries.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Row limit used by `db_sample_rows` when the caller sends none.
pub const DEFAULT_SAMPLE_LIMIT: i64 = 5;

/// Smallest row limit advertised for `db_sample_rows`.
pub const MIN_SAMPLE_LIMIT: i64 = 1;

/// Largest row limit advertised for `db_sample_rows`.
pub const MAX_SAMPLE_LIMIT: i64 = 50;

/// A result row: column name to value, in the column order of the statement.
pub type ResultRow = serde_json::Map<String, JsonValue>;

/// A parameter value for parameterized queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryParam {
    /// NULL value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (stored as i64 for maximum range)
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Arrays and objects, bound as their JSON text
    Json(JsonValue),
}

impl QueryParam {
    /// Check if this parameter is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the type name of this parameter for debugging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Json(_) => "json",
        }
    }
}

impl From<JsonValue> for QueryParam {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(v) => Self::Bool(v),
            JsonValue::Number(n) => match n.as_i64() {
                Some(v) => Self::Int(v),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(v) => Self::String(v),
            other => Self::Json(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_param_from_json() {
        assert_eq!(QueryParam::from(json!(null)), QueryParam::Null);
        assert_eq!(QueryParam::from(json!(true)), QueryParam::Bool(true));
        assert_eq!(QueryParam::from(json!(42)), QueryParam::Int(42));
        assert_eq!(QueryParam::from(json!(1.5)), QueryParam::Float(1.5));
        assert_eq!(
            QueryParam::from(json!("Pending")),
            QueryParam::String("Pending".to_string())
        );
        assert_eq!(QueryParam::from(json!([1, 2])).type_name(), "json");
    }

    #[test]
    fn test_query_param_is_null() {
        assert!(QueryParam::Null.is_null());
        assert!(!QueryParam::Int(0).is_null());
    }
}
