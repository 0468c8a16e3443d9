//! MCP tool implementations.
//!
//! This module contains the database tool handlers and their guards:
//! - `guard`: Identifier and statement guards for caller-supplied SQL pieces
//! - `registry`: The ordered tool catalog served by `tools/list`
//! - `schema`: `db_list_tables`, `db_describe_table`, `db_sample_rows`
//! - `query`: `db_query_readonly`

pub mod guard;
pub mod query;
pub mod registry;
pub mod schema;

pub use guard::{ReadStatement, TableName};
pub use query::{QueryInput, QueryOutput, QueryToolHandler};
pub use registry::{ToolKind, ToolRegistry};
pub use schema::{
    DescribeTableInput, DescribeTableOutput, ListTablesInput, ListTablesOutput, SampleRowsInput,
    SampleRowsOutput, SchemaToolHandler,
};
