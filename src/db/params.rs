//! Named parameter binding for read queries.
//!
//! Callers reference values with SQLite's named forms (`:name`, `@name`,
//! `$name`) and pass them as a JSON object. sqlx binds SQLite arguments by
//! position, so each distinct name is rewritten to a numbered `?NNN`
//! placeholder and its value is bound in that slot. Everything else in the
//! statement is emitted unchanged.

use crate::error::{DbError, DbResult};
use crate::models::QueryParam;
use serde_json::{Map, Value as JsonValue};
use sqlparser::dialect::SQLiteDialect;
use sqlparser::tokenizer::{Token, Tokenizer};
use sqlx::sqlite::SqliteArguments;
use sqlx::Sqlite;

const NAMED_PREFIXES: [char; 3] = [':', '@', '$'];

/// A statement ready for execution together with its positional values.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundQuery {
    pub sql: String,
    pub values: Vec<QueryParam>,
}

impl BoundQuery {
    /// A statement with nothing to bind.
    pub fn verbatim(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            values: Vec::new(),
        }
    }
}

/// Resolve named placeholders in `sql` against `params`.
///
/// Keys in `params` may be written with or without their prefix. A name the
/// statement references but `params` lacks is an input error. Keys the
/// statement never references are ignored.
pub fn bind_named(sql: &str, params: &Map<String, JsonValue>) -> DbResult<BoundQuery> {
    if !sql.contains(NAMED_PREFIXES) {
        return Ok(BoundQuery::verbatim(sql));
    }

    let dialect = SQLiteDialect {};
    let tokens = match Tokenizer::new(&dialect, sql).with_unescape(false).tokenize() {
        Ok(tokens) => tokens,
        // Nothing can be bound without tokens; let SQLite report on the raw text.
        Err(_) if params.is_empty() => return Ok(BoundQuery::verbatim(sql)),
        Err(e) => {
            return Err(DbError::invalid_input(format!(
                "Could not locate query parameters: {}",
                e
            )));
        }
    };

    let mut names: Vec<String> = Vec::new();
    let mut out = String::with_capacity(sql.len());
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        let name = match token {
            Token::Colon | Token::AtSign => match iter.peek() {
                Some(Token::Word(word)) if word.quote_style.is_none() => {
                    let name = word.value.clone();
                    iter.next();
                    Some(name)
                }
                _ => None,
            },
            Token::Placeholder(p) => strip_prefix(p),
            Token::Word(word) if word.quote_style.is_none() => strip_prefix(&word.value),
            _ => None,
        };

        match name {
            Some(name) => {
                let index = match names.iter().position(|n| *n == name) {
                    Some(i) => i + 1,
                    None => {
                        names.push(name);
                        names.len()
                    }
                };
                out.push('?');
                out.push_str(&index.to_string());
            }
            None => out.push_str(&token.to_string()),
        }
    }

    let values = names
        .iter()
        .map(|name| {
            lookup(params, name).cloned().map(QueryParam::from).ok_or_else(|| {
                DbError::invalid_input(format!("Missing value for query parameter :{}", name))
            })
        })
        .collect::<DbResult<Vec<_>>>()?;

    Ok(BoundQuery { sql: out, values })
}

fn strip_prefix(raw: &str) -> Option<String> {
    let rest = raw.strip_prefix(NAMED_PREFIXES)?;
    if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}

fn lookup<'a>(params: &'a Map<String, JsonValue>, name: &str) -> Option<&'a JsonValue> {
    params.get(name).or_else(|| {
        NAMED_PREFIXES
            .iter()
            .find_map(|prefix| params.get(&format!("{prefix}{name}")))
    })
}

/// Bind a parameter to a SQLite query.
pub(crate) fn bind_sqlite_param<'q>(
    query: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
    param: &'q QueryParam,
) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
    match param {
        QueryParam::Null => query.bind(None::<String>),
        QueryParam::Bool(v) => query.bind(*v),
        QueryParam::Int(v) => query.bind(*v),
        QueryParam::Float(v) => query.bind(*v),
        QueryParam::String(v) => query.bind(v.as_str()),
        // SQLite doesn't have native JSON type, store as string
        QueryParam::Json(v) => query.bind(v.to_string()),
    }
}
