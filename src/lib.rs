//! SQLite Read-only MCP Server Library
//!
//! This library provides MCP (Model Context Protocol) tools that let AI
//! assistants inspect and query a single SQLite database without being able
//! to modify it.

pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod tools;
pub mod transport;

pub use config::Config;
pub use error::DbError;
pub use mcp::DbService;
