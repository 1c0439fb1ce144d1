use crate::constants::remote::TIMEOUT_EXIT_STATUS;
use crate::errors::{ToolError, TransportError};
use crate::mcp::catalog::ToolKind;
use crate::services::logger::Logger;
use crate::services::policy::ExecutionPolicy;
use crate::services::synthesizer::{synthesize, SynthesizedCommand};
use crate::services::transport::{ExecOutput, Transport};
use crate::services::validation::ToolRequest;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub is_error: bool,
    pub text: String,
}

impl ToolResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            is_error: false,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            text: text.into(),
        }
    }

    /// MCP `CallToolResult` shape.
    pub fn to_mcp_value(&self) -> Value {
        serde_json::json!({
            "content": [ { "type": "text", "text": self.text } ],
            "isError": self.is_error,
        })
    }
}

impl From<ToolError> for ToolResult {
    fn from(err: ToolError) -> Self {
        ToolResult::error(err.message)
    }
}

#[derive(Clone)]
pub struct ToolGateway {
    logger: Logger,
    transport: Arc<dyn Transport>,
    policy: Arc<ExecutionPolicy>,
}

impl ToolGateway {
    pub fn new(logger: Logger, transport: Arc<dyn Transport>, policy: Arc<ExecutionPolicy>) -> Self {
        Self {
            logger: logger.child("gateway"),
            transport,
            policy,
        }
    }

    pub fn policy(&self) -> &ExecutionPolicy {
        &self.policy
    }

    /// Run one tool invocation. Every failure is folded into an error-flagged result.
    pub async fn call(&self, name: &str, args: &Value) -> ToolResult {
        match self.try_call(name, args).await {
            Ok(result) => result,
            Err(err) => {
                self.logger.warn(
                    "tool call failed",
                    Some(&serde_json::json!({ "tool": name, "error": err })),
                );
                err.into()
            }
        }
    }

    async fn try_call(&self, name: &str, args: &Value) -> Result<ToolResult, ToolError> {
        let tool = ToolKind::from_name(name).ok_or_else(|| ToolError::unknown_tool(name))?;
        let request = ToolRequest::parse(tool, args)?;
        let command = synthesize(&request, &self.policy);
        self.logger.debug(
            "executing",
            Some(&serde_json::json!({
                "tool": name,
                "command_len": command.text.len(),
                "sandbox": command.sandbox_timeout_secs.is_some(),
            })),
        );
        let outcome = self
            .transport
            .execute(&command.text, self.policy.exec_timeout())
            .await;
        classify(&request, &command, outcome)
    }
}

/// Fold an execution outcome into a tool result.
///
/// Tools flagged `tolerate_non_zero_exit` turn an exit-status failure into a
/// success whose text carries both the status and the captured output. A
/// sandbox `timeout` expiry and any transport failure stay errors.
pub fn classify(
    request: &ToolRequest,
    command: &SynthesizedCommand,
    outcome: ExecOutput,
) -> Result<ToolResult, ToolError> {
    let tool = request.tool();
    let output = outcome.text();
    let Some(err) = outcome.error else {
        return Ok(ToolResult::success(success_text(request, output)));
    };

    if let Some(secs) = command.sandbox_timeout_secs {
        if err.exit_status() == Some(TIMEOUT_EXIT_STATUS) {
            return Err(ToolError::timeout(with_output(
                format!("Command timed out after {} seconds", secs),
                &output,
            )));
        }
    }

    if tool.tolerate_non_zero_exit() && err.is_exit_status() {
        return Ok(ToolResult::success(lenient_text(tool, &err, &output)));
    }

    let mut failure = ToolError::from_transport(tool.error_prefix(), &err);
    failure.message = with_output(failure.message, &output);
    Err(failure)
}

fn success_text(request: &ToolRequest, output: String) -> String {
    match request {
        ToolRequest::Write { file_path, .. } => {
            format!("File written successfully: {}", file_path)
        }
        ToolRequest::Edit { file_path, .. } => format!("File edited successfully: {}", file_path),
        _ => output,
    }
}

fn lenient_text(tool: ToolKind, err: &TransportError, output: &str) -> String {
    let label = match tool {
        ToolKind::Grep => "Search completed with status",
        _ => "Command failed",
    };
    format!("{}: {}\nOutput: {}", label, err, output)
}

fn with_output(message: String, output: &str) -> String {
    if output.trim().is_empty() {
        return message;
    }
    format!("{}\nOutput: {}", message, output)
}
