//! Protocol dispatcher.
//!
//! `DbService` routes each request by method to the handshake, the tool
//! catalog or a tool handler, and turns every `DbError` raised beneath it into
//! a JSON-RPC error object in one place.

use crate::config::Config;
use crate::db::Database;
use crate::error::{DbError, DbResult};
use crate::mcp::message::{Request, Response};
use crate::models::{DatabaseConfig, SampleLimitPolicy};
use crate::tools::query::QueryToolHandler;
use crate::tools::registry::{ToolKind, ToolRegistry};
use crate::tools::schema::SchemaToolHandler;
use rmcp::model::{
    Content, Implementation, JsonObject, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value as JsonValue, json};
use tracing::{debug, info, warn};

pub const SERVER_NAME: &str = "sqlite-readonly-mcp";

/// Payload of a `tools/call` request. Both fields may be absent.
#[derive(Debug, Default, serde::Deserialize)]
struct CallToolParams {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    arguments: Option<JsonObject>,
}

#[derive(Debug, Clone)]
pub struct DbService {
    /// Fixed tool catalog
    registry: ToolRegistry,
    /// Handler for list/describe/sample
    schema: SchemaToolHandler,
    /// Handler for free-form reads
    query: QueryToolHandler,
}

impl DbService {
    /// Create a service serving the database described by `config`.
    pub fn new(config: DatabaseConfig, limit_policy: SampleLimitPolicy) -> Self {
        let database = Database::new(config);
        Self {
            registry: ToolRegistry::new(),
            schema: SchemaToolHandler::new(database.clone(), limit_policy),
            query: QueryToolHandler::new(database),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.database(), config.sample_limit_policy())
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handshake result. Independent of the request payload.
    pub fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_owned(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: None,
        }
    }

    /// Handle one decoded line and produce its response.
    pub async fn handle(&self, message: JsonValue) -> Response {
        let request = match Request::from_value(message) {
            Ok(request) => request,
            Err(err) => {
                warn!(error = %err, "Rejected message");
                return Response::failure(JsonValue::Null, err.into());
            }
        };

        debug!(method = %request.method, id = %request.id, "Handling request");

        match self.dispatch(&request.method, request.params).await {
            Ok(result) => Response::success(request.id, result),
            Err(err) => {
                warn!(
                    method = %request.method,
                    id = %request.id,
                    kind = ?err.kind(),
                    error = %err,
                    "Request failed"
                );
                Response::failure(request.id, err.into())
            }
        }
    }

    async fn dispatch(&self, method: &str, params: JsonValue) -> DbResult<JsonValue> {
        match method {
            "initialize" => to_json(&self.get_info()),
            "tools/list" => Ok(json!({ "tools": self.registry.tools() })),
            "tools/call" => self.call_tool(params).await,
            other => Err(DbError::method_not_found(other)),
        }
    }

    async fn call_tool(&self, params: JsonValue) -> DbResult<JsonValue> {
        let params: CallToolParams = if params.is_null() {
            CallToolParams::default()
        } else {
            serde_json::from_value(params)
                .map_err(|e| DbError::invalid_input(format!("Invalid tools/call params: {}", e)))?
        };

        let name = params.name.unwrap_or_default();
        let kind = self
            .registry
            .lookup(&name)
            .ok_or_else(|| DbError::unknown_tool(&name))?;
        let arguments = JsonValue::Object(params.arguments.unwrap_or_default());

        info!(tool = kind.name(), "Calling tool");

        let text = match kind {
            ToolKind::ListTables => {
                render(&self.schema.list_tables(parse_arguments(arguments)?).await?)?
            }
            ToolKind::DescribeTable => {
                render(&self.schema.describe_table(parse_arguments(arguments)?).await?)?
            }
            ToolKind::SampleRows => {
                render(&self.schema.sample_rows(parse_arguments(arguments)?).await?)?
            }
            ToolKind::QueryReadonly => {
                render(&self.query.query(parse_arguments(arguments)?).await?)?
            }
        };

        let content = to_json(&Content::text(text))?;
        Ok(json!({ "content": [content] }))
    }
}

/// Deserialize tool arguments into the handler's input type.
fn parse_arguments<T: DeserializeOwned>(arguments: JsonValue) -> DbResult<T> {
    serde_json::from_value(arguments).map_err(|e| DbError::invalid_input(e.to_string()))
}

/// Tool output as the text block returned to the caller.
fn render<T: Serialize>(output: &T) -> DbResult<String> {
    serde_json::to_string_pretty(output)
        .map_err(|e| DbError::internal(format!("Failed to serialize tool output: {}", e)))
}

fn to_json<T: Serialize>(value: &T) -> DbResult<JsonValue> {
    serde_json::to_value(value)
        .map_err(|e| DbError::internal(format!("Failed to serialize result: {}", e)))
}
