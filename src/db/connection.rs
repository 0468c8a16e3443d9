//! Per-call SQLite connections.
//!
//! Nothing holds a connection between tool calls. Each call opens the file
//! read-only, runs its work, and closes the connection on every exit path.

use crate::error::{DbError, DbResult};
use crate::models::DatabaseConfig;
use futures_util::future::BoxFuture;
use sqlx::Connection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use std::sync::Arc;
use tracing::{debug, warn};

/// Handle to the configured database file.
#[derive(Debug, Clone)]
pub struct Database {
    config: Arc<DatabaseConfig>,
}

impl Database {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Open a fresh read-only connection.
    ///
    /// The file is never created: a missing file fails with
    /// [`DbError::DatabaseMissing`].
    pub async fn connect(&self) -> DbResult<SqliteConnection> {
        let path = &self.config.path;
        if !path.is_file() {
            return Err(DbError::database_missing(self.config.display_path()));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false)
            .busy_timeout(self.config.busy_timeout);

        let conn = SqliteConnection::connect_with(&options).await?;
        debug!(path = %path.display(), "Opened database connection");
        Ok(conn)
    }

    /// Run `f` on a fresh connection and close it afterwards.
    ///
    /// The connection is closed whether `f` succeeds or fails. A failure to
    /// close is logged and does not replace the result of `f`.
    pub async fn with_connection<T, F>(&self, f: F) -> DbResult<T>
    where
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, DbResult<T>>,
    {
        let mut conn = self.connect().await?;
        let result = f(&mut conn).await;
        if let Err(e) = conn.close().await {
            warn!(error = %e, "Failed to close database connection");
        }
        result
    }
}
