//! Error types for the SQLite read-only MCP server.
//!
//! Every failure below the dispatcher is a `DbError`. Variants are grouped into
//! the [`ErrorKind`] classes callers reason about, and a single conversion into
//! `rmcp::ErrorData` decides the wire code for each of them.

use rmcp::model::ErrorCode;
use thiserror::Error;

/// Wire code for application failures (the catch-all JSON-RPC server error).
pub const SERVER_ERROR: ErrorCode = ErrorCode(-32000);

/// Message carried by every `SERVER_ERROR` envelope; the detail goes in `data`.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

#[derive(Error, Debug)]
pub enum DbError {
    #[error("{message}")]
    Malformed { message: String },

    #[error("Method not found: {method}")]
    MethodNotFound { method: String },

    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Invalid table name: {name}")]
    InvalidTableName { name: String },

    #[error("Only SELECT queries are allowed.")]
    NotReadOnly,

    #[error("You can only execute one statement at a time.")]
    MultipleStatements,

    #[error("Table '{table}' not found.")]
    TableNotFound { table: String },

    #[error("Database not found at {path}")]
    DatabaseMissing { path: String },

    #[error("Database error: {message}")]
    Database {
        message: String,
        /// SQLite extended result code, when the driver reports one
        code: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Semantic class of a failure, independent of its wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input line was not decodable structured data
    Transport,
    /// Unrecognized method or tool name
    Protocol,
    /// Caller-supplied arguments broke a tool's contract or a guard
    ContractViolation,
    /// The referenced table is absent
    Data,
    /// The database failed while executing
    Engine,
}

impl DbError {
    /// Create a malformed-message error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Create a method not found error.
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::MethodNotFound {
            method: method.into(),
        }
    }

    /// Create an unknown tool error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool { name: name.into() }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn invalid_table_name(name: impl Into<String>) -> Self {
        Self::InvalidTableName { name: name.into() }
    }

    pub fn table_not_found(table: impl Into<String>) -> Self {
        Self::TableNotFound {
            table: table.into(),
        }
    }

    pub fn database_missing(path: impl Into<String>) -> Self {
        Self::DatabaseMissing { path: path.into() }
    }

    /// Create a database error with an optional driver code.
    pub fn database(message: impl Into<String>, code: Option<String>) -> Self {
        Self::Database {
            message: message.into(),
            code,
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Malformed { .. } => ErrorKind::Transport,
            Self::MethodNotFound { .. } | Self::UnknownTool { .. } => ErrorKind::Protocol,
            Self::InvalidInput { .. }
            | Self::InvalidTableName { .. }
            | Self::NotReadOnly
            | Self::MultipleStatements => ErrorKind::ContractViolation,
            Self::TableNotFound { .. } => ErrorKind::Data,
            Self::DatabaseMissing { .. } | Self::Database { .. } | Self::Internal { .. } => {
                ErrorKind::Engine
            }
        }
    }
}

/// Convert sqlx errors to DbError.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                DbError::database(db_err.message(), code)
            }
            sqlx::Error::Configuration(msg) => {
                DbError::database(format!("Invalid configuration: {}", msg), None)
            }
            sqlx::Error::Io(io_err) => DbError::database(format!("I/O error: {}", io_err), None),
            sqlx::Error::Protocol(msg) => DbError::database(msg, None),
            sqlx::Error::ColumnNotFound(col) => {
                DbError::internal(format!("Column not found: {}", col))
            }
            sqlx::Error::ColumnDecode { index, source } => {
                DbError::internal(format!("Failed to decode column {}: {}", index, source))
            }
            sqlx::Error::Decode(source) => DbError::internal(format!("Decode error: {}", source)),
            sqlx::Error::WorkerCrashed => DbError::internal("Database worker crashed"),
            _ => DbError::internal(format!("Unknown database error: {}", err)),
        }
    }
}

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;

/// Convert DbError to MCP ErrorData.
///
/// Only an unrecognized method has its own code. Everything else collapses to
/// `SERVER_ERROR` with the error text as `data`, so callers tell failures apart
/// by message.
impl From<DbError> for rmcp::ErrorData {
    fn from(err: DbError) -> Self {
        match err.kind() {
            ErrorKind::Protocol if matches!(err, DbError::MethodNotFound { .. }) => {
                rmcp::ErrorData::new(ErrorCode::METHOD_NOT_FOUND, err.to_string(), None)
            }
            ErrorKind::Transport
            | ErrorKind::Protocol
            | ErrorKind::ContractViolation
            | ErrorKind::Data
            | ErrorKind::Engine => rmcp::ErrorData::new(
                SERVER_ERROR,
                SERVER_ERROR_MESSAGE,
                Some(serde_json::Value::String(err.to_string())),
            ),
        }
    }
}
