//! Tool registry.
//!
//! The fixed, ordered catalog of tools returned by `tools/list`, and the
//! lookup `tools/call` uses to pick a handler. Input schemas are generated
//! from the handlers' input types.
//!
//! Schemas describe arguments for callers. The dispatcher does not validate
//! against them; each handler checks the arguments it depends on.

use crate::tools::query::QueryInput;
use crate::tools::schema::{DescribeTableInput, ListTablesInput, SampleRowsInput};
use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// The invocable tools, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    ListTables,
    DescribeTable,
    SampleRows,
    QueryReadonly,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        Self::ListTables,
        Self::DescribeTable,
        Self::SampleRows,
        Self::QueryReadonly,
    ];

    /// Name used in `tools/list` and `tools/call`.
    pub fn name(self) -> &'static str {
        match self {
            Self::ListTables => "db_list_tables",
            Self::DescribeTable => "db_describe_table",
            Self::SampleRows => "db_sample_rows",
            Self::QueryReadonly => "db_query_readonly",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    fn description(self) -> &'static str {
        match self {
            Self::ListTables => "List tables in the SQLite database.",
            Self::DescribeTable => {
                "Describe columns for a given table (name, type, nullability, PK)."
            }
            Self::SampleRows => "Return up to N sample rows from a table.",
            Self::QueryReadonly => "Run a read-only SQL query (SELECT only).",
        }
    }

    fn input_schema(self) -> Arc<JsonObject> {
        match self {
            Self::ListTables => input_schema::<ListTablesInput>(),
            Self::DescribeTable => input_schema::<DescribeTableInput>(),
            Self::SampleRows => input_schema::<SampleRowsInput>(),
            Self::QueryReadonly => input_schema::<QueryInput>(),
        }
    }

    /// Build the catalog entry for this tool.
    pub fn descriptor(self) -> Tool {
        Tool::new(self.name(), self.description(), self.input_schema())
    }
}

/// Generate the object schema advertised for a tool's arguments.
fn input_schema<T: JsonSchema>() -> Arc<JsonObject> {
    let schema = schemars::schema_for!(T);
    let mut object = match serde_json::to_value(schema) {
        Ok(JsonValue::Object(object)) => object,
        _ => JsonObject::new(),
    };
    object.remove("$schema");
    object.remove("title");
    object.insert("type".to_string(), JsonValue::String("object".to_string()));
    object
        .entry("properties")
        .or_insert_with(|| JsonValue::Object(JsonObject::new()));
    object.insert("additionalProperties".to_string(), JsonValue::Bool(false));
    Arc::new(object)
}

/// Ordered tool catalog, built once per server.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: ToolKind::ALL.into_iter().map(ToolKind::descriptor).collect(),
        }
    }

    /// All descriptors, in catalog order.
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Find the tool registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<ToolKind> {
        ToolKind::from_name(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_of(kind: ToolKind) -> JsonValue {
        JsonValue::Object((*kind.descriptor().input_schema).clone())
    }

    #[test]
    fn test_registry_order() {
        let registry = ToolRegistry::new();
        let names: Vec<&str> = registry.tools().iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(
            names,
            vec![
                "db_list_tables",
                "db_describe_table",
                "db_sample_rows",
                "db_query_readonly"
            ]
        );
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_lookup() {
        let registry = ToolRegistry::new();
        assert_eq!(registry.lookup("db_sample_rows"), Some(ToolKind::SampleRows));
        assert_eq!(registry.lookup("db_drop_table"), None);
        assert_eq!(registry.lookup("DB_LIST_TABLES"), None);
    }

    #[test]
    fn test_list_tables_schema_has_no_arguments() {
        let schema = schema_of(ToolKind::ListTables);
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["additionalProperties"], false);
        assert!(schema["properties"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_describe_table_requires_table() {
        let schema = schema_of(ToolKind::DescribeTable);
        assert_eq!(schema["required"], serde_json::json!(["table"]));
        assert!(schema["properties"]["table"].is_object());
    }

    #[test]
    fn test_sample_rows_declares_limit_bounds() {
        let schema = schema_of(ToolKind::SampleRows);
        assert_eq!(schema["required"], serde_json::json!(["table"]));
        let limit = &schema["properties"]["limit"];
        assert_eq!(limit["minimum"].as_f64(), Some(1.0));
        assert_eq!(limit["maximum"].as_f64(), Some(50.0));
    }

    #[test]
    fn test_query_requires_sql_only() {
        let schema = schema_of(ToolKind::QueryReadonly);
        assert_eq!(schema["required"], serde_json::json!(["sql"]));
        assert!(schema["properties"]["params"].is_object());
    }

    #[test]
    fn test_descriptors_are_stable() {
        let first = serde_json::to_string(ToolRegistry::new().tools()).unwrap();
        let second = serde_json::to_string(ToolRegistry::new().tools()).unwrap();
        assert_eq!(first, second);
    }
}
