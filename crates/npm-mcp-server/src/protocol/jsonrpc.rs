//! JSON-RPC 2.0 message shapes used by the MCP stdio transport.

use serde::Deserialize;
use serde_json::{Value, json};

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

/// An incoming request or notification.
///
/// A message without an `id` is a notification and never gets a reply.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default, rename = "jsonrpc")]
    pub version: Option<String>,
    pub method: String,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub const fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

pub fn json_rpc_response(id: Option<Value>, result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

pub fn json_rpc_error(id: Option<Value>, code: i64, message: &str) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } })
}

pub const JSONRPC_VERSION: &str = "2.0";

/// Parse one raw line of input.
///
/// On failure returns the error reply to send: a parse error with a null id
/// for bytes that are not JSON (invalid UTF-8 included), or an
/// invalid-request error (echoing the id when one can be recovered) for JSON
/// that is not a 2.0 request object.
pub fn parse_message(line: &[u8]) -> Result<JsonRpcRequest, Value> {
    let value: Value = serde_json::from_slice(line)
        .map_err(|e| json_rpc_error(None, PARSE_ERROR, &format!("Parse error: {e}")))?;

    let id = value.get("id").cloned().filter(|id| !id.is_null());
    let request: JsonRpcRequest = serde_json::from_value(value).map_err(|e| {
        json_rpc_error(id.clone(), INVALID_REQUEST, &format!("Invalid request: {e}"))
    })?;

    match request.version.as_deref() {
        None | Some(JSONRPC_VERSION) => Ok(request),
        Some(other) => Err(json_rpc_error(
            id,
            INVALID_REQUEST,
            &format!("Invalid request: unsupported jsonrpc version '{other}'"),
        )),
    }
}
