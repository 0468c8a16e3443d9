//! Read query execution.
//!
//! Runs a guarded [`ReadStatement`] with its named parameters and collects
//! every resulting row. There is no row cap and no timeout: a slow statement
//! holds the server until SQLite returns.

use crate::db::params::{bind_named, bind_sqlite_param};
use crate::db::types::RowToJson;
use crate::error::{DbError, DbResult};
use crate::models::{QueryParam, ResultRow};
use crate::tools::guard::ReadStatement;
use futures_util::{TryStreamExt, future};
use serde_json::{Map, Value as JsonValue};
use sqlparser::dialect::SQLiteDialect;
use sqlparser::tokenizer::{Token, Tokenizer};
use sqlx::sqlite::SqliteConnection;
use std::time::Instant;
use tracing::debug;

/// Query executor that handles read statement execution.
pub struct QueryExecutor;

impl QueryExecutor {
    /// Execute a read statement and return all rows.
    pub async fn fetch_rows(
        conn: &mut SqliteConnection,
        statement: ReadStatement,
        params: Map<String, JsonValue>,
    ) -> DbResult<Vec<ResultRow>> {
        let start = Instant::now();
        ensure_single_statement(statement.as_str())?;
        let bound = bind_named(statement.as_str(), &params)?;

        debug!(
            sql = %bound.sql,
            param_types = ?bound.values.iter().map(QueryParam::type_name).collect::<Vec<_>>(),
            "Executing query"
        );

        let mut query = sqlx::query(&bound.sql);
        for value in &bound.values {
            query = bind_sqlite_param(query, value);
        }

        let rows = query
            .fetch(&mut *conn)
            .map_err(DbError::from)
            .and_then(|row| future::ready(row.to_json_map()))
            .try_collect::<Vec<_>>()
            .await?;

        debug!(
            row_count = rows.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Query completed"
        );
        Ok(rows)
    }
}

/// Reject input holding more than one statement.
///
/// sqlx steps through every `;`-separated statement and merges their rows, so
/// anything after the first terminator other than whitespace, comments or
/// further terminators is refused. Semicolons inside literals, quoted
/// identifiers and comments do not count.
pub fn ensure_single_statement(sql: &str) -> DbResult<()> {
    if !sql.contains(';') {
        return Ok(());
    }

    let dialect = SQLiteDialect {};
    let tokens = Tokenizer::new(&dialect, sql)
        .with_unescape(false)
        .tokenize()
        .map_err(|e| {
            DbError::invalid_input(format!("Could not find statement boundaries: {}", e))
        })?;

    let trailing = tokens.iter().skip_while(|token| **token != Token::SemiColon);
    for token in trailing {
        match token {
            Token::SemiColon | Token::Whitespace(_) | Token::EOF => {}
            _ => return Err(DbError::MultipleStatements),
        }
    }
    Ok(())
}
