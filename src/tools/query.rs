//! Read-only query tool.
//!
//! This module implements the `db_query_readonly` MCP tool. The statement
//! must start with `SELECT`; anything else is rejected before a connection
//! is opened.

use crate::db::{Database, QueryExecutor};
use crate::error::DbResult;
use crate::models::ResultRow;
use crate::tools::guard::ReadStatement;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tracing::info;

/// Input for the db_query_readonly tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueryInput {
    /// SQL SELECT statement to execute
    pub sql: String,
    /// Named parameters, referenced in SQL as :name, @name or $name
    #[serde(default)]
    pub params: Option<Map<String, JsonValue>>,
}

/// Output from the db_query_readonly tool.
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutput {
    pub rows: Vec<ResultRow>,
}

/// Handler for the read-only query tool.
#[derive(Debug, Clone)]
pub struct QueryToolHandler {
    database: Database,
}

impl QueryToolHandler {
    /// Create a new query tool handler.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Execute a read-only query.
    pub async fn query(&self, input: QueryInput) -> DbResult<QueryOutput> {
        let statement = ReadStatement::parse(&input.sql)?;
        let params = input.params.unwrap_or_default();

        let rows = self
            .database
            .with_connection(move |conn| {
                Box::pin(QueryExecutor::fetch_rows(conn, statement, params))
            })
            .await?;

        info!(row_count = rows.len(), "Query executed");

        Ok(QueryOutput { rows })
    }
}
