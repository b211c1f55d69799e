//! MCP method dispatch.
//!
//! Stateless: every request is answered from the catalog and the shared
//! [`NpmService`], so requests can be handled concurrently.

use std::sync::Arc;

use npm_mcp_core::{NpmService, ToolArguments, ToolError, ToolRequest, ToolResponse};
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::jsonrpc::{
    INTERNAL_ERROR, INVALID_PARAMS, JsonRpcRequest, METHOD_NOT_FOUND, json_rpc_error,
    json_rpc_response,
};
use crate::catalog::tool_definitions;

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "npm-mcp-server";

/// Protocol front-end over an [`NpmService`]. Cheap to clone.
#[derive(Clone)]
pub struct McpServer {
    service: Arc<NpmService>,
}

impl McpServer {
    pub fn new(service: NpmService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Handle one message. Returns the reply, or `None` for notifications.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<Value> {
        if request.is_notification() {
            debug!(method = %request.method, "Notification received");
            return None;
        }

        let id = request.id;
        let reply = match request.method.as_str() {
            "initialize" => json_rpc_response(id, initialize_result()),
            "ping" => json_rpc_response(id, json!({})),
            "tools/list" => json_rpc_response(id, json!({ "tools": tool_definitions() })),
            "tools/call" => match call_params(request.params) {
                Ok((name, arguments)) => {
                    let response = self.call_tool(&name, arguments).await;
                    match serde_json::to_value(&response) {
                        Ok(result) => json_rpc_response(id, result),
                        Err(e) => json_rpc_error(
                            id,
                            INTERNAL_ERROR,
                            &format!("Failed to encode tool result: {e}"),
                        ),
                    }
                }
                Err(message) => json_rpc_error(id, INVALID_PARAMS, &message),
            },
            other => {
                debug!(method = other, "Unknown method");
                json_rpc_error(id, METHOD_NOT_FOUND, &format!("Method not found: {other}"))
            }
        };
        Some(reply)
    }

    /// Run a tool by name. Every failure becomes an error result.
    pub async fn call_tool(&self, name: &str, arguments: Option<Value>) -> ToolResponse {
        let arguments = ToolArguments::from_value(arguments);
        let outcome = match ToolRequest::parse(name, &arguments) {
            Ok(request) => self.service.call(request).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &outcome {
            log_tool_failure(name, e);
        }
        ToolResponse::from(outcome)
    }
}

fn log_tool_failure(tool: &str, error: &ToolError) {
    warn!(tool, category = %error.category(), error = %error, "Tool call failed");
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

/// Extract `name` and `arguments` from `tools/call` params.
fn call_params(params: Option<Value>) -> Result<(String, Option<Value>), String> {
    let Some(Value::Object(mut params)) = params else {
        return Err("tools/call requires an object of params".to_string());
    };
    let name = match params.remove("name") {
        Some(Value::String(name)) => name,
        _ => return Err("tools/call requires a string 'name'".to_string()),
    };
    Ok((name, params.remove("arguments")))
}
