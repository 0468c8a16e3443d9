//! Configuration handling for the SQLite read-only MCP server.
//!
//! This module provides configuration management via CLI arguments and environment variables.

use crate::models::{DatabaseConfig, SampleLimitPolicy};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Database file used when `DB_PATH` is not set.
pub const DEFAULT_DB_PATH: &str = "data/taskdemo.db";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Server configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "sqlite-readonly-mcp")]
#[command(about = "MCP server exposing read-only SQLite tools over stdio")]
#[command(version)]
pub struct Config {
    /// Path of the SQLite database file to serve
    #[arg(long, default_value = DEFAULT_DB_PATH, env = "DB_PATH")]
    pub db_path: PathBuf,

    /// Seconds to wait on a locked database file before failing
    #[arg(
        long,
        default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS,
        env = "MCP_CONNECT_TIMEOUT"
    )]
    pub connect_timeout: u64,

    /// Bind any integer limit for db_sample_rows instead of enforcing 1-50
    #[arg(long, env = "MCP_LENIENT_SAMPLE_LIMIT")]
    pub lenient_sample_limit: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = DEFAULT_LOG_LEVEL, env = "MCP_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "MCP_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    /// Parse configuration from command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create a default configuration (useful for testing).
    pub fn default_config() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT_SECS,
            lenient_sample_limit: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            json_logs: false,
        }
    }

    /// Get the connection timeout as a Duration.
    pub fn connect_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    /// Resolve the immutable database settings handed to the tool handlers.
    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.db_path.clone(), self.connect_timeout_duration())
    }

    pub fn sample_limit_policy(&self) -> SampleLimitPolicy {
        if self.lenient_sample_limit {
            SampleLimitPolicy::Unchecked
        } else {
            SampleLimitPolicy::Enforced
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
