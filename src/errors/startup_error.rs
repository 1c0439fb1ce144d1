use super::TransportError;
use thiserror::Error;

/// Anything discovered before the server begins serving. Always fatal.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load config: {0}")]
    Config(String),

    #[error("failed to connect to remote server: {0}")]
    Connection(#[from] TransportError),

    #[error("failed to access working directory {dir}: {reason}")]
    WorkingDir { dir: String, reason: String },

    #[error("stdio transport failed: {0}")]
    Io(#[from] std::io::Error),
}
