#![allow(dead_code)]

use async_trait::async_trait;
use remote_claude_mcp::errors::TransportError;
use remote_claude_mcp::services::transport::{ExecOutput, Transport};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

pub fn tmp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("{}-{}", prefix, uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

/// Runs commands with the local `sh`, merging stderr into stdout the way a
/// merged SSH channel does.
pub struct LocalShellTransport;

#[async_trait]
impl Transport for LocalShellTransport {
    async fn execute(&self, command: &str, timeout: Option<Duration>) -> ExecOutput {
        let script = format!("{{ {}\n}} 2>&1", command);
        let child = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();
        let child = match child {
            Ok(child) => child,
            Err(err) => return ExecOutput::failed(Vec::new(), TransportError::Channel(err.to_string())),
        };

        let waited = match timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(result) => result,
                Err(_) => {
                    return ExecOutput::failed(
                        Vec::new(),
                        TransportError::TimedOut {
                            secs: limit.as_secs(),
                        },
                    )
                }
            },
            None => child.wait_with_output().await,
        };
        let output = match waited {
            Ok(output) => output,
            Err(err) => return ExecOutput::failed(Vec::new(), TransportError::Channel(err.to_string())),
        };

        match output.status.code() {
            Some(0) => ExecOutput::ok(output.stdout),
            Some(status) => ExecOutput::failed(output.stdout, TransportError::ExitStatus { status }),
            None => ExecOutput::failed(
                output.stdout,
                TransportError::Signal {
                    signal: "unknown".to_string(),
                },
            ),
        }
    }

    async fn close(&self) {}
}

/// Records every command and answers with a fixed output and exit status.
pub struct RecordingTransport {
    pub commands: std::sync::Mutex<Vec<String>>,
    output: String,
    status: i32,
}

impl RecordingTransport {
    pub fn new(output: &str, status: i32) -> Self {
        Self {
            commands: std::sync::Mutex::new(Vec::new()),
            output: output.to_string(),
            status,
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().expect("commands lock").clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, command: &str, _timeout: Option<Duration>) -> ExecOutput {
        self.commands
            .lock()
            .expect("commands lock")
            .push(command.to_string());
        let output = self.output.as_bytes().to_vec();
        if self.status == 0 {
            ExecOutput::ok(output)
        } else {
            ExecOutput::failed(
                output,
                TransportError::ExitStatus {
                    status: self.status,
                },
            )
        }
    }

    async fn close(&self) {}
}
