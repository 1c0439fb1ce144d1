use super::TransportError;
use serde::Serialize;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
    MissingParameter,
    InvalidParams,
    UnknownTool,
    NotConnected,
    RemoteCommand,
    Timeout,
    Internal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            parameter: None,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn missing_parameter(name: &str) -> Self {
        let mut err = Self::new(
            ToolErrorKind::MissingParameter,
            "MISSING_PARAMETER",
            format!("Error: missing required parameter: {}", name),
        );
        err.parameter = Some(name.to_string());
        err
    }

    pub fn invalid_params(name: &str, message: impl Into<String>) -> Self {
        let mut err = Self::new(ToolErrorKind::InvalidParams, "INVALID_PARAMS", message);
        err.parameter = Some(name.to_string());
        err
    }

    pub fn unknown_tool(name: &str) -> Self {
        Self::new(
            ToolErrorKind::UnknownTool,
            "UNKNOWN_TOOL",
            format!("Unknown tool: {}", name),
        )
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Timeout, "TIMEOUT", message)
    }

    pub fn remote_command(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::RemoteCommand, "REMOTE_COMMAND", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Internal, "INTERNAL", message)
    }

    /// Classify a transport failure under the given message prefix
    /// (e.g. "Error reading file").
    pub fn from_transport(prefix: &str, err: &TransportError) -> Self {
        let message = format!("{}: {}", prefix, err);
        match err {
            TransportError::NotConnected => {
                Self::new(ToolErrorKind::NotConnected, "NOT_CONNECTED", message)
                    .with_hint("The SSH session was never established or has been closed.")
            }
            TransportError::TimedOut { .. } => Self::timeout(message),
            _ => Self::remote_command(message),
        }
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ToolError {}
