//! Connection-related data models.
//!
//! This module defines the immutable database settings resolved at startup.

use std::path::PathBuf;
use std::time::Duration;

/// Location and open options for the database served by this process.
///
/// Built once from [`Config`](crate::config::Config) and shared by every tool
/// handler. Each tool call opens its own connection from these settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    /// How long SQLite waits on a locked file before reporting `SQLITE_BUSY`
    pub busy_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(path: impl Into<PathBuf>, busy_timeout: Duration) -> Self {
        Self {
            path: path.into(),
            busy_timeout,
        }
    }

    /// Database path as it is reported to callers.
    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

/// How `db_sample_rows` treats a limit outside the advertised 1-50 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleLimitPolicy {
    /// Reject out-of-range limits before touching the database
    #[default]
    Enforced,
    /// Bind whatever integer the caller sent
    Unchecked,
}
