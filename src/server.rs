//! MCP server over stdio: one JSON-RPC 2.0 message per line.
//!
//! ```text
//! {"jsonrpc":"2.0","id":1,"method":"initialize","params":{...}}
//! {"jsonrpc":"2.0","method":"notifications/initialized"}
//! {"jsonrpc":"2.0","id":2,"method":"tools/list"}
//! {"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"parse_deck_code","arguments":{"deckCode":"AAECAR8..."}}}
//! ```
//!
//! Every request carrying an `id` gets exactly one response line with the same
//! `id` and either a `result` or an `error`. Notifications get no reply.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::catalog::CardSource;
use crate::tools::{self, DeckTools};

/// MCP protocol revision announced in the `initialize` reply.
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "hearthstone-decks-server";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    /// Absent for notifications.
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self { jsonrpc: "2.0", id, result: Some(result), error: None }
    }

    pub fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError { code, message: message.into() }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": MCP_PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

/// Handle one message line. Returns `None` for notifications.
pub async fn handle_line<S>(tools: &DeckTools<S>, line: &str) -> Option<JsonRpcResponse>
where
    S: CardSource + Send + Sync,
{
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            warn!("Rejecting unparsable message: {}", e);
            let message = format!("Parse error: {}", e);
            return Some(JsonRpcResponse::failure(Value::Null, PARSE_ERROR, message));
        }
    };
    let request: JsonRpcRequest = match serde_json::from_value(value.clone()) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejecting invalid request: {}", e);
            let id = value.get("id").cloned().unwrap_or(Value::Null);
            let message = format!("Invalid request: {}", e);
            return Some(JsonRpcResponse::failure(id, INVALID_REQUEST, message));
        }
    };

    let Some(id) = request.id else {
        debug!("Notification received: {}", request.method);
        return None;
    };
    if request.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::failure(
            id,
            INVALID_REQUEST,
            format!("Invalid request: unsupported jsonrpc version {:?}", request.jsonrpc),
        ));
    }

    let response = match request.method.as_str() {
        "initialize" => {
            info!("Client initialized, protocol {}", MCP_PROTOCOL_VERSION);
            JsonRpcResponse::success(id, initialize_result())
        }
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => JsonRpcResponse::success(id, json!({ "tools": tools::list_tools() })),
        "tools/call" => match serde_json::from_value::<CallToolParams>(request.params) {
            Ok(params) => {
                debug!("Tool called: {}", params.name);
                let response = tools.call_tool(&params.name, &params.arguments).await;
                JsonRpcResponse::success(id, json!(response))
            }
            Err(e) => {
                JsonRpcResponse::failure(id, INVALID_PARAMS, format!("Invalid params: {}", e))
            }
        },
        other => {
            warn!("Unknown method: {}", other);
            JsonRpcResponse::failure(id, METHOD_NOT_FOUND, format!("Method not found: {}", other))
        }
    };
    Some(response)
}

/// Serve messages from `input` until it is exhausted, writing replies to `output`.
pub async fn serve<S, R, W>(tools: &DeckTools<S>, input: R, mut output: W) -> std::io::Result<()>
where
    S: CardSource + Send + Sync,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let tool_names = tools::list_tools()
        .iter()
        .map(|tool| tool.name)
        .collect::<Vec<_>>()
        .join(", ");
    info!("{} serving on stdio: {}", SERVER_NAME, tool_names);

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(response) = handle_line(tools, line).await else {
            continue;
        };
        let text = serde_json::to_string(&response)?;
        output.write_all(text.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }

    info!("Input closed, shutting down");
    Ok(())
}
