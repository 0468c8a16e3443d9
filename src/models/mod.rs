//! Data models for the SQLite read-only MCP server.
//!
//! This module re-exports all model types used throughout the application.

pub mod connection;
pub mod query;
pub mod schema;

// Re-export commonly used types
pub use connection::{DatabaseConfig, SampleLimitPolicy};
pub use query::{
    DEFAULT_SAMPLE_LIMIT, MAX_SAMPLE_LIMIT, MIN_SAMPLE_LIMIT, QueryParam, ResultRow,
};
pub use schema::ColumnInfo;
