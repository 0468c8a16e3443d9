//! Schema introspection tools.
//!
//! This module implements `db_list_tables`, `db_describe_table` and
//! `db_sample_rows`.

use crate::db::{Database, SchemaInspector};
use crate::error::{DbError, DbResult};
use crate::models::{
    ColumnInfo, DEFAULT_SAMPLE_LIMIT, MAX_SAMPLE_LIMIT, MIN_SAMPLE_LIMIT, ResultRow,
    SampleLimitPolicy,
};
use crate::tools::guard::TableName;
use schemars::JsonSchema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use tracing::info;

/// Input for the db_list_tables tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListTablesInput {}

/// Output from the db_list_tables tool.
#[derive(Debug, Clone, Serialize)]
pub struct ListTablesOutput {
    pub tables: Vec<String>,
    #[serde(rename = "dbPath")]
    pub db_path: String,
}

/// Input for the db_describe_table tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DescribeTableInput {
    /// Table name (letters, digits and underscores; must not start with a digit)
    pub table: String,
}

/// Output from the db_describe_table tool.
#[derive(Debug, Clone, Serialize)]
pub struct DescribeTableOutput {
    pub table: String,
    pub columns: Vec<ColumnInfo>,
}

/// Input for the db_sample_rows tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SampleRowsInput {
    /// Table name (letters, digits and underscores; must not start with a digit)
    pub table: String,
    /// Maximum rows to return. Default: 5
    #[serde(default, deserialize_with = "deserialize_lenient_limit")]
    #[schemars(with = "Option<i64>", range(min = 1, max = 50))]
    pub limit: Option<i64>,
}

/// Accept a limit written as an integer, an integral float (`3.0`) or a
/// numeric string (`"3"`). Fractions and other types are rejected.
fn deserialize_lenient_limit<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<JsonValue>::deserialize(deserializer)? {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(f))
                    .map(|f| f as i64)
            })
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("limit must be an integer, got {}", n))),
        Some(JsonValue::String(text)) => text
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("limit must be an integer, got {:?}", text))),
        Some(other) => Err(D::Error::custom(format!(
            "limit must be an integer, got {}",
            other
        ))),
    }
}

/// Output from the db_sample_rows tool.
#[derive(Debug, Clone, Serialize)]
pub struct SampleRowsOutput {
    pub table: String,
    pub rows: Vec<ResultRow>,
}

/// Handler for schema-related tools.
#[derive(Debug, Clone)]
pub struct SchemaToolHandler {
    database: Database,
    limit_policy: SampleLimitPolicy,
}

impl SchemaToolHandler {
    /// Create a new schema tool handler.
    pub fn new(database: Database, limit_policy: SampleLimitPolicy) -> Self {
        Self {
            database,
            limit_policy,
        }
    }

    /// List all tables in the database.
    pub async fn list_tables(&self, _input: ListTablesInput) -> DbResult<ListTablesOutput> {
        let tables = self
            .database
            .with_connection(|conn| Box::pin(SchemaInspector::list_tables(conn)))
            .await?;

        info!(count = tables.len(), "Listed tables");

        Ok(ListTablesOutput {
            tables,
            db_path: self.database.config().display_path(),
        })
    }

    /// Describe the columns of one table.
    pub async fn describe_table(&self, input: DescribeTableInput) -> DbResult<DescribeTableOutput> {
        let table = TableName::parse(&input.table)?;

        let columns = self
            .database
            .with_connection(move |conn| Box::pin(SchemaInspector::table_columns(conn, table)))
            .await?;

        if columns.is_empty() {
            return Err(DbError::table_not_found(input.table));
        }

        info!(table = %input.table, columns = columns.len(), "Described table");

        Ok(DescribeTableOutput {
            table: input.table,
            columns,
        })
    }

    /// Return up to `limit` rows from one table.
    pub async fn sample_rows(&self, input: SampleRowsInput) -> DbResult<SampleRowsOutput> {
        let table = TableName::parse(&input.table)?;
        let limit = self.resolve_limit(input.limit)?;

        let rows = self
            .database
            .with_connection(move |conn| {
                Box::pin(SchemaInspector::sample_rows(conn, table, limit))
            })
            .await?;

        info!(table = %input.table, limit, rows = rows.len(), "Sampled table");

        Ok(SampleRowsOutput {
            table: input.table,
            rows,
        })
    }

    /// Apply the default and, unless lenient, the advertised bounds.
    fn resolve_limit(&self, limit: Option<i64>) -> DbResult<i64> {
        let limit = limit.unwrap_or(DEFAULT_SAMPLE_LIMIT);
        match self.limit_policy {
            SampleLimitPolicy::Enforced
                if !(MIN_SAMPLE_LIMIT..=MAX_SAMPLE_LIMIT).contains(&limit) =>
            {
                Err(DbError::invalid_input(format!(
                    "limit must be between {} and {}, got {}",
                    MIN_SAMPLE_LIMIT, MAX_SAMPLE_LIMIT, limit
                )))
            }
            _ => Ok(limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DatabaseConfig;
    use std::time::Duration;

    fn handler(policy: SampleLimitPolicy) -> SchemaToolHandler {
        let config = DatabaseConfig::new("/nonexistent/taskdemo.db", Duration::from_secs(1));
        SchemaToolHandler::new(Database::new(config), policy)
    }

    fn parse_limit(value: serde_json::Value) -> Result<Option<i64>, serde_json::Error> {
        serde_json::from_value::<SampleRowsInput>(value).map(|input| input.limit)
    }

    #[test]
    fn test_limit_accepts_numeric_forms() {
        use serde_json::json;
        assert_eq!(parse_limit(json!({"table": "t"})).unwrap(), None);
        assert_eq!(parse_limit(json!({"table": "t", "limit": null})).unwrap(), None);
        assert_eq!(parse_limit(json!({"table": "t", "limit": 3})).unwrap(), Some(3));
        assert_eq!(parse_limit(json!({"table": "t", "limit": 3.0})).unwrap(), Some(3));
        assert_eq!(parse_limit(json!({"table": "t", "limit": "3"})).unwrap(), Some(3));
        assert_eq!(parse_limit(json!({"table": "t", "limit": " -2 "})).unwrap(), Some(-2));
    }

    #[test]
    fn test_limit_rejects_non_integers() {
        use serde_json::json;
        for limit in [json!(2.5), json!("ten"), json!("3.0"), json!(true), json!([3])] {
            let err = parse_limit(json!({"table": "t", "limit": limit})).unwrap_err();
            assert!(err.to_string().contains("limit must be an integer"), "{err}");
        }
    }

    #[test]
    fn test_resolve_limit_default() {
        let h = handler(SampleLimitPolicy::Enforced);
        assert_eq!(h.resolve_limit(None).unwrap(), DEFAULT_SAMPLE_LIMIT);
    }

    #[test]
    fn test_resolve_limit_enforced_bounds() {
        let h = handler(SampleLimitPolicy::Enforced);
        assert_eq!(h.resolve_limit(Some(1)).unwrap(), 1);
        assert_eq!(h.resolve_limit(Some(50)).unwrap(), 50);
        for bad in [0, -1, 51, i64::MAX] {
            let err = h.resolve_limit(Some(bad)).unwrap_err();
            assert!(matches!(err, DbError::InvalidInput { .. }), "{bad} should fail");
        }
    }

    #[test]
    fn test_resolve_limit_unchecked() {
        let h = handler(SampleLimitPolicy::Unchecked);
        assert_eq!(h.resolve_limit(Some(500)).unwrap(), 500);
        assert_eq!(h.resolve_limit(Some(-1)).unwrap(), -1);
    }

    #[tokio::test]
    async fn test_invalid_table_rejected_before_connecting() {
        // The database file does not exist, so reaching SQL would surface
        // DatabaseMissing instead of the guard error.
        let h = handler(SampleLimitPolicy::Enforced);
        let err = h
            .sample_rows(SampleRowsInput {
                table: "tasks; DROP TABLE tasks".to_string(),
                limit: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::InvalidTableName { .. }));

        let err = h
            .describe_table(DescribeTableInput {
                table: "1tasks".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::InvalidTableName { .. }));
    }

    #[tokio::test]
    async fn test_missing_database_reported() {
        let h = handler(SampleLimitPolicy::Enforced);
        let err = h.list_tables(ListTablesInput::default()).await.unwrap_err();
        assert!(matches!(err, DbError::DatabaseMissing { .. }));
    }
}
