//! Database access layer.
//!
//! This module provides database access functionality:
//! - Per-call read-only connections
//! - Catalog introspection and table sampling
//! - Read query execution with named parameters
//! - Value mapping from SQLite storage classes to JSON

pub mod connection;
pub mod executor;
pub mod params;
pub mod schema;
pub mod types;

pub use connection::Database;
pub use executor::QueryExecutor;
pub use params::{BoundQuery, bind_named};
pub use schema::SchemaInspector;
pub use types::RowToJson;
