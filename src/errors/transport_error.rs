use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("SSH client not connected")]
    NotConnected,

    #[error("unable to read private key {}: {source}", path.display())]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse private key {}: {reason}", path.display())]
    KeyParse { path: PathBuf, reason: String },

    #[error("failed to dial {addr}: {reason}")]
    Dial { addr: String, reason: String },

    #[error("SSH authentication failed for user {user}: {reason}")]
    Auth { user: String, reason: String },

    #[error("SSH host key mismatch (expected {expected}, got {observed})")]
    HostKeyMismatch { expected: String, observed: String },

    #[error("SSH channel error: {0}")]
    Channel(String),

    #[error("Process exited with status {status}")]
    ExitStatus { status: i32 },

    #[error("Process terminated by signal {signal}")]
    Signal { signal: String },

    #[error("remote command timed out after {secs} seconds")]
    TimedOut { secs: u64 },
}

impl TransportError {
    /// A non-zero exit or a termination signal. These are the only failures
    /// lenient tools may tolerate.
    pub fn is_exit_status(&self) -> bool {
        matches!(
            self,
            TransportError::ExitStatus { .. } | TransportError::Signal { .. }
        )
    }

    pub fn exit_status(&self) -> Option<i32> {
        match self {
            TransportError::ExitStatus { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<ssh2::Error> for TransportError {
    fn from(err: ssh2::Error) -> Self {
        let io_err: std::io::Error = err.into();
        TransportError::Channel(io_err.to_string())
    }
}
