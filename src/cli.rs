use crate::config::Config;
use crate::errors::StartupError;
use clap::Parser;

const USAGE: &str = "remote-claude-mcp <config.json> OR remote-claude-mcp <ssh-host> <ssh-user> <ssh-key-path> <remote-working-dir> [ssh-port]";

#[derive(Debug, Parser)]
#[command(
    name = "remote-claude-mcp",
    version,
    about = "MCP server exposing file and shell tools on a remote host over SSH",
    override_usage = USAGE
)]
pub struct Cli {
    /// Path to a JSON config file, or the SSH host
    pub target: String,
    /// SSH user
    pub user: Option<String>,
    /// Path to the SSH private key
    pub key_path: Option<String>,
    /// Remote working directory
    pub working_dir: Option<String>,
    /// SSH port (default 22)
    pub port: Option<String>,
}

impl Cli {
    pub fn into_config(self) -> Result<Config, StartupError> {
        match (self.user, self.key_path, self.working_dir) {
            (None, None, None) if self.target.ends_with(".json") => Config::load(&self.target),
            (Some(user), Some(key_path), Some(working_dir)) => Config::from_positional(
                &self.target,
                &user,
                &key_path,
                &working_dir,
                self.port.as_deref(),
            ),
            _ => Err(StartupError::Config(format!("usage: {}", USAGE))),
        }
    }
}
