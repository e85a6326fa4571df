//! Line-delimited JSON-RPC server.
//!
//! One request per line in, one response per line out. Requests are handled
//! in arrival order; each handler runs on tokio's blocking pool because
//! generation does blocking filesystem work. Requests without an `id` are
//! notifications and get no response.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::errors::ToolError;
use crate::protocol::{error_codes, RpcRequest, RpcResponse, ToolCall, JSONRPC_VERSION};
use crate::registry::ToolRegistry;

/// Serves one tool registry.
pub struct ToolServer {
    name: &'static str,
    registry: ToolRegistry,
}

impl ToolServer {
    pub fn new(name: &'static str, registry: ToolRegistry) -> Self {
        Self { name, registry }
    }

    /// Handles one raw line. Returns `None` for notifications.
    pub fn handle_line(&self, line: &str) -> Option<RpcResponse> {
        let request: RpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Unparseable request");
                return Some(RpcResponse::error(
                    None,
                    error_codes::PARSE_ERROR,
                    format!("Parse error: {e}"),
                ));
            }
        };
        let notification = request.id.is_none();
        let response = self.handle(&request);
        (!notification).then_some(response)
    }

    /// Dispatches one request.
    pub fn handle(&self, request: &RpcRequest) -> RpcResponse {
        let id = request.id.clone();
        if request.jsonrpc != JSONRPC_VERSION {
            return RpcResponse::error(
                id,
                error_codes::INVALID_REQUEST,
                format!("Unsupported jsonrpc version: {}", request.jsonrpc),
            );
        }

        match request.method.as_str() {
            "ping" => RpcResponse::success(id, Value::String("pong".to_string())),
            "tools/list" => RpcResponse::success(id, json!({ "tools": self.registry.names() })),
            "tools/call" => {
                let call: ToolCall = match request
                    .params
                    .clone()
                    .map(serde_json::from_value)
                    .transpose()
                {
                    Ok(Some(call)) => call,
                    Ok(None) => {
                        return RpcResponse::error(
                            id,
                            error_codes::INVALID_PARAMS,
                            "tools/call requires params {name, arguments}",
                        )
                    }
                    Err(e) => {
                        return RpcResponse::error(
                            id,
                            error_codes::INVALID_PARAMS,
                            format!("Invalid tools/call params: {e}"),
                        )
                    }
                };
                debug!(tool = %call.name, "Tool call");
                match self.registry.call(&call.name, call.arguments) {
                    Ok(output) => RpcResponse::success(id, output),
                    Err(e) => {
                        warn!(tool = %call.name, error = %e, "Tool call failed");
                        RpcResponse::error(id, error_code(&e), e.to_string())
                    }
                }
            }
            other => RpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            ),
        }
    }

    /// Serves requests from `reader` until end of input.
    pub async fn serve<R, W>(self: Arc<Self>, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(server = self.name, tools = ?self.registry.names(), "Tool server ready");
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }

            let server = Arc::clone(&self);
            let response = match tokio::task::spawn_blocking(move || server.handle_line(&line)).await {
                Ok(response) => response,
                Err(e) => Some(RpcResponse::error(
                    None,
                    error_codes::INTERNAL_ERROR,
                    format!("Handler panicked: {e}"),
                )),
            };

            if let Some(response) = response {
                let mut encoded = serde_json::to_string(&response)?;
                encoded.push('\n');
                writer.write_all(encoded.as_bytes()).await?;
                writer.flush().await?;
            }
        }
        info!(server = self.name, "Input closed; tool server stopping");
        Ok(())
    }

    /// Serves on the process's stdin and stdout.
    pub async fn serve_stdio(self: Arc<Self>) -> std::io::Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        self.serve(stdin, tokio::io::stdout()).await
    }
}

fn error_code(error: &ToolError) -> i32 {
    match error {
        ToolError::UnknownTool { .. } | ToolError::InvalidArguments { .. } => {
            error_codes::INVALID_PARAMS
        }
        _ => error_codes::INTERNAL_ERROR,
    }
}
