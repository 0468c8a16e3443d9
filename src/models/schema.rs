//! Schema-related data models.
//!
//! This module defines types for table introspection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One column of a table, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnInfo {
    pub name: String,
    /// Declared type as written in the table definition (may be empty)
    #[serde(rename = "type")]
    pub data_type: String,
    pub notnull: bool,
    pub pk: bool,
}

impl ColumnInfo {
    /// Create a new column description.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>, notnull: bool, pk: bool) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            notnull,
            pk,
        }
    }
}
