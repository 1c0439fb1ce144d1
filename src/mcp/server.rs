use crate::constants::server::PROTOCOL_VERSION;
use crate::errors::{ErrorCode, McpError, ToolError};
use crate::mcp::catalog::tool_catalog;
use crate::mcp::protocol::{JsonRpcRequest, JsonRpcResponse};
use crate::services::gateway::{ToolGateway, ToolResult};
use crate::services::logger::Logger;
use serde_json::Value;
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

pub struct McpServer {
    logger: Logger,
    gateway: Arc<ToolGateway>,
    name: String,
    version: String,
}

impl McpServer {
    pub fn new(logger: Logger, gateway: Arc<ToolGateway>, name: &str, version: &str) -> Self {
        Self {
            logger: logger.child("mcp"),
            gateway,
            name: name.to_string(),
            version: version.to_string(),
        }
    }

    fn handle_initialize(&self) -> Value {
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {"tools": {}},
            "serverInfo": {"name": self.name, "version": self.version},
        })
    }

    fn handle_tools_list(&self) -> Value {
        serde_json::json!({ "tools": tool_catalog() })
    }

    /// Answer one request line. `tools/call` is answered asynchronously through `tx`.
    fn dispatch(&self, line: &str, tx: &UnboundedSender<JsonRpcResponse>) -> Option<JsonRpcResponse> {
        let parsed: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(_) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    McpError::new(ErrorCode::ParseError, "Parse error"),
                ))
            }
        };
        let request: JsonRpcRequest = match serde_json::from_value(parsed) {
            Ok(request) => request,
            Err(_) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    McpError::new(ErrorCode::InvalidRequest, "Invalid request"),
                ))
            }
        };
        if request.method.starts_with("notifications/") || request.is_notification() {
            return None;
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        match request.method.as_str() {
            "initialize" => Some(JsonRpcResponse::success(id, self.handle_initialize())),
            "ping" => Some(JsonRpcResponse::success(id, serde_json::json!({}))),
            "tools/list" => Some(JsonRpcResponse::success(id, self.handle_tools_list())),
            "tools/call" => {
                let params = request.params.as_object().cloned().unwrap_or_default();
                let name = params
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .to_string();
                if name.is_empty() {
                    return Some(JsonRpcResponse::failure(
                        id,
                        McpError::invalid_params("Missing tool name"),
                    ));
                }
                let args = params.get("arguments").cloned().unwrap_or(Value::Null);
                self.spawn_call(id, name, args, tx.clone());
                None
            }
            other => Some(JsonRpcResponse::failure(id, McpError::method_not_found(other))),
        }
    }

    fn spawn_call(&self, id: Value, name: String, args: Value, tx: UnboundedSender<JsonRpcResponse>) {
        let gateway = self.gateway.clone();
        let logger = self.logger.clone();
        tokio::spawn(async move {
            let call = tokio::spawn(async move { gateway.call(&name, &args).await });
            let result = match call.await {
                Ok(result) => result,
                Err(err) => {
                    logger.error("tool task aborted", Some(&Value::String(err.to_string())));
                    ToolResult::from(ToolError::internal(format!("Internal error: {}", err)))
                }
            };
            let _ = tx.send(JsonRpcResponse::success(id, result.to_mcp_value()));
        });
    }

    /// Serve newline-delimited JSON-RPC until `reader` hits EOF and every
    /// in-flight call has been answered.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = unbounded_channel::<JsonRpcResponse>();
        let writer_task = tokio::spawn(async move {
            let mut writer = BufWriter::new(writer);
            while let Some(response) = rx.recv().await {
                writer.write_all(response.to_line().as_bytes()).await?;
                writer.flush().await?;
            }
            Ok::<(), io::Error>(())
        });

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(response) = self.dispatch(trimmed, &tx) {
                if tx.send(response).is_err() {
                    break;
                }
            }
        }
        drop(tx);

        writer_task
            .await
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?
    }

    pub async fn run_stdio(&self) -> io::Result<()> {
        self.logger.info(
            "serving on stdio",
            Some(&serde_json::json!({ "name": self.name, "version": self.version })),
        );
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }
}
