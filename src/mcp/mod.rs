//! MCP protocol layer.
//!
//! `message` holds the JSON-RPC envelopes, `service` the dispatcher that
//! routes them to the tool handlers.

pub mod message;
pub mod service;

pub use message::{Outcome, Request, Response};
pub use service::DbService;
