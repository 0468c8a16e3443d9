//! Input guards for caller-controlled SQL fragments.
//!
//! Two values reach SQL text without being bound as parameters: table names
//! (SQLite cannot bind identifiers) and the free-form statement of
//! `db_query_readonly`. Both are wrapped in types that can only be built by
//! passing the matching guard, and the SQL builders in [`crate::db`] accept
//! only those types.
//!
//! [`ReadStatement`] checks the leading keyword and nothing else. A statement
//! that starts with `SELECT` is passed to SQLite verbatim, so identifiers it
//! builds internally are not covered by this guard.

use crate::error::{DbError, DbResult};
use std::fmt;

/// A table name accepted as a bare SQL identifier (`^[A-Za-z_][A-Za-z0-9_]*$`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    /// Validate a caller-supplied table name.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlite_readonly_mcp::tools::guard::TableName;
    ///
    /// assert!(TableName::parse("tasks").is_ok());
    /// assert!(TableName::parse("tasks; DROP TABLE tasks").is_err());
    /// ```
    pub fn parse(name: &str) -> DbResult<Self> {
        if is_bare_identifier(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(DbError::invalid_table_name(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check that `name` is a letter or underscore followed by letters, digits or underscores.
pub fn is_bare_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A statement whose first token is `SELECT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadStatement(String);

impl ReadStatement {
    /// Validate a caller-supplied statement.
    ///
    /// Leading whitespace is skipped and the keyword is matched without regard
    /// to case. The keyword must end at a non-word character or at the end of
    /// the input, so `selectx` is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlite_readonly_mcp::tools::guard::ReadStatement;
    ///
    /// assert!(ReadStatement::parse("  SeLeCt 1").is_ok());
    /// assert!(ReadStatement::parse("DELETE FROM tasks").is_err());
    /// ```
    pub fn parse(sql: &str) -> DbResult<Self> {
        if starts_with_select(sql) {
            Ok(Self(sql.to_string()))
        } else {
            Err(DbError::NotReadOnly)
        }
    }

    /// The statement exactly as the caller sent it.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

const SELECT_KEYWORD: &str = "select";

fn starts_with_select(sql: &str) -> bool {
    let rest = sql.trim_start();
    let Some(head) = rest.get(..SELECT_KEYWORD.len()) else {
        return false;
    };
    if !head.eq_ignore_ascii_case(SELECT_KEYWORD) {
        return false;
    }
    match rest[SELECT_KEYWORD.len()..].chars().next() {
        None => true,
        Some(c) => !(c.is_alphanumeric() || c == '_'),
    }
}
