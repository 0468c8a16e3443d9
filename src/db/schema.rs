//! Catalog introspection and table sampling.
//!
//! Statements here interpolate table names, so every function takes a
//! [`TableName`] that has already passed the identifier guard.

use crate::db::types::RowToJson;
use crate::error::{DbError, DbResult};
use crate::models::{ColumnInfo, ResultRow};
use crate::tools::guard::TableName;
use futures_util::{TryStreamExt, future};
use sqlx::Row;
use sqlx::sqlite::SqliteConnection;
use tracing::debug;

mod queries {
    pub const LIST_TABLES: &str = "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name";
}

/// Schema inspector for the served SQLite database.
pub struct SchemaInspector;

impl SchemaInspector {
    /// All table names in ascending order.
    pub async fn list_tables(conn: &mut SqliteConnection) -> DbResult<Vec<String>> {
        let tables = sqlx::query_scalar::<_, String>(queries::LIST_TABLES)
            .fetch_all(&mut *conn)
            .await?;
        debug!(count = tables.len(), "Listed tables");
        Ok(tables)
    }

    /// Columns of `table` in catalog order. Empty when the table does not exist.
    pub async fn table_columns(
        conn: &mut SqliteConnection,
        table: TableName,
    ) -> DbResult<Vec<ColumnInfo>> {
        let pragma_query = format!("PRAGMA table_info({})", table);
        let rows = sqlx::query(&pragma_query).fetch_all(&mut *conn).await?;

        rows.iter()
            .map(|row| -> DbResult<ColumnInfo> {
                let name: String = row.try_get("name")?;
                let data_type: String = row.try_get("type")?;
                let notnull: i64 = row.try_get("notnull")?;
                let pk: i64 = row.try_get("pk")?;
                Ok(ColumnInfo::new(name, data_type, notnull != 0, pk > 0))
            })
            .collect()
    }

    /// Up to `limit` rows of `table` in the order SQLite returns them.
    pub async fn sample_rows(
        conn: &mut SqliteConnection,
        table: TableName,
        limit: i64,
    ) -> DbResult<Vec<ResultRow>> {
        let sample_query = format!("SELECT * FROM {} LIMIT ?", table);
        let rows = sqlx::query(&sample_query)
            .bind(limit)
            .fetch(&mut *conn)
            .map_err(DbError::from)
            .and_then(|row| future::ready(row.to_json_map()))
            .try_collect::<Vec<_>>()
            .await?;
        debug!(table = %table, count = rows.len(), "Sampled rows");
        Ok(rows)
    }
}
