//! SQLite value to JSON mapping.
//!
//! Result rows have no declared shape: a statement can return any columns,
//! and SQLite lets any column hold any storage class. Values are therefore
//! decoded by the storage class of each individual value rather than by the
//! declared column type.

use crate::error::{DbError, DbResult};
use crate::models::ResultRow;
use serde_json::Value as JsonValue;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

/// SQLite storage class of a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageClass {
    Null,
    Integer,
    Real,
    Text,
    Blob,
}

impl StorageClass {
    /// Classify the type name sqlx reports for a runtime value.
    pub fn from_type_name(type_name: &str) -> Self {
        match type_name.to_ascii_uppercase().as_str() {
            "NULL" => Self::Null,
            "INTEGER" | "INT" | "BIGINT" | "BOOLEAN" => Self::Integer,
            "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => Self::Real,
            "BLOB" => Self::Blob,
            _ => Self::Text,
        }
    }
}

/// Encode binary data for JSON output.
pub fn encode_blob(bytes: &[u8]) -> JsonValue {
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    JsonValue::String(STANDARD.encode(bytes))
}

/// Trait for converting database rows to JSON maps.
pub trait RowToJson {
    fn to_json_map(&self) -> DbResult<ResultRow>;
}

impl RowToJson for SqliteRow {
    fn to_json_map(&self) -> DbResult<ResultRow> {
        self.columns()
            .iter()
            .map(|col| {
                let value = decode_column(self, col.ordinal()).map_err(|e| {
                    DbError::database(
                        format!("Could not decode column '{}': {}", col.name(), e),
                        None,
                    )
                })?;
                Ok((col.name().to_string(), value))
            })
            .collect()
    }
}

fn storage_class(row: &SqliteRow, idx: usize) -> Result<StorageClass, sqlx::Error> {
    let value = row.try_get_raw(idx)?;
    if value.is_null() {
        Ok(StorageClass::Null)
    } else {
        Ok(StorageClass::from_type_name(value.type_info().name()))
    }
}

fn decode_column(row: &SqliteRow, idx: usize) -> Result<JsonValue, sqlx::Error> {
    match storage_class(row, idx)? {
        StorageClass::Null => Ok(JsonValue::Null),
        StorageClass::Integer => decode_integer(row, idx),
        StorageClass::Real => decode_real(row, idx),
        StorageClass::Text => decode_text(row, idx),
        StorageClass::Blob => decode_blob(row, idx),
    }
}

fn decode_integer(row: &SqliteRow, idx: usize) -> Result<JsonValue, sqlx::Error> {
    let v = row.try_get_unchecked::<i64, _>(idx)?;
    Ok(JsonValue::Number(v.into()))
}

fn decode_real(row: &SqliteRow, idx: usize) -> Result<JsonValue, sqlx::Error> {
    let v = row.try_get_unchecked::<f64, _>(idx)?;
    Ok(serde_json::Number::from_f64(v)
        .map(JsonValue::Number)
        .unwrap_or_else(|| JsonValue::String(v.to_string())))
}

fn decode_text(row: &SqliteRow, idx: usize) -> Result<JsonValue, sqlx::Error> {
    let v = row.try_get_unchecked::<String, _>(idx)?;
    Ok(JsonValue::String(v))
}

fn decode_blob(row: &SqliteRow, idx: usize) -> Result<JsonValue, sqlx::Error> {
    let v = row.try_get_unchecked::<Vec<u8>, _>(idx)?;
    Ok(encode_blob(&v))
}
