use crate::constants::{network, remote, server};
use crate::errors::StartupError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SshConfig {
    pub host: String,
    pub user: String,
    pub key_path: String,
    pub port: u16,
    /// `SHA256:<base64>`; when unset any host key is accepted.
    pub host_key_fingerprint: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub working_dir: String,
    pub claude_code_path: String,
    pub shell: String,
    pub sandbox: bool,
    pub sandbox_timeout_secs: u64,
    pub sandbox_tmp_dir: String,
    pub exec_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ssh: SshConfig,
    pub remote: RemoteConfig,
    pub server: ServerConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StartupError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| {
            StartupError::Config(format!("unable to read {}: {}", path.display(), err))
        })?;
        Self::parse(&raw).map_err(|err| match err {
            StartupError::Config(reason) => {
                StartupError::Config(format!("{}: {}", path.display(), reason))
            }
            other => other,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, StartupError> {
        let mut config: Config = serde_json::from_str(raw)
            .map_err(|err| StartupError::Config(format!("invalid JSON: {}", err)))?;
        config.apply_defaults();
        config.validate()?;
        Ok(config)
    }

    pub fn from_positional(
        host: &str,
        user: &str,
        key_path: &str,
        working_dir: &str,
        port: Option<&str>,
    ) -> Result<Self, StartupError> {
        let port = match port {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                StartupError::Config(format!(
                    "port must be an integer in 1..=65535, got '{}'",
                    raw
                ))
            })?,
            None => network::SSH_DEFAULT_PORT,
        };
        let mut config = Config {
            ssh: SshConfig {
                host: host.to_string(),
                user: user.to_string(),
                key_path: key_path.to_string(),
                port,
                host_key_fingerprint: None,
            },
            remote: RemoteConfig {
                working_dir: working_dir.to_string(),
                ..RemoteConfig::default()
            },
            server: ServerConfig::default(),
        };
        config.apply_defaults();
        config.validate()?;
        Ok(config)
    }

    /// Zero and empty values count as unset.
    fn apply_defaults(&mut self) {
        if self.ssh.port == 0 {
            self.ssh.port = network::SSH_DEFAULT_PORT;
        }
        if self
            .ssh
            .host_key_fingerprint
            .as_deref()
            .map(|v| v.trim().is_empty())
            .unwrap_or(false)
        {
            self.ssh.host_key_fingerprint = None;
        }
        if self.remote.claude_code_path.trim().is_empty() {
            self.remote.claude_code_path = remote::DEFAULT_CLAUDE_CODE_PATH.to_string();
        }
        if self.remote.shell.trim().is_empty() {
            self.remote.shell = remote::DEFAULT_SHELL.to_string();
        }
        if self.remote.sandbox_timeout_secs == 0 {
            self.remote.sandbox_timeout_secs = remote::SANDBOX_TIMEOUT_SECS;
        }
        if self.remote.sandbox_tmp_dir.trim().is_empty() {
            self.remote.sandbox_tmp_dir = remote::SANDBOX_TMP_DIR.to_string();
        }
        if self.remote.exec_timeout_secs == Some(0) {
            self.remote.exec_timeout_secs = None;
        }
        if self.server.name.trim().is_empty() {
            self.server.name = server::DEFAULT_NAME.to_string();
        }
        if self.server.version.trim().is_empty() {
            self.server.version = server::DEFAULT_VERSION.to_string();
        }
    }

    fn validate(&self) -> Result<(), StartupError> {
        let required = [
            ("ssh.host", &self.ssh.host),
            ("ssh.user", &self.ssh.user),
            ("ssh.key_path", &self.ssh.key_path),
            ("remote.working_dir", &self.remote.working_dir),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        Err(StartupError::Config(format!(
            "missing required field(s): {}",
            missing.join(", ")
        )))
    }

    pub fn key_path(&self) -> PathBuf {
        expand_home_path(&self.ssh.key_path)
    }
}

fn expand_home_path(raw: &str) -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        if raw == "~" {
            return PathBuf::from(home);
        }
        if let Some(rest) = raw.strip_prefix("~/") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "ssh": {"host": "build.example", "user": "dev", "key_path": "/keys/id_ed25519"},
        "remote": {"working_dir": "/srv/work"}
    }"#;

    #[test]
    fn defaults_fill_unset_fields() {
        let config = Config::parse(MINIMAL).expect("config");
        assert_eq!(config.ssh.port, 22);
        assert_eq!(config.remote.claude_code_path, "claude");
        assert_eq!(config.remote.shell, "bash");
        assert_eq!(config.remote.sandbox_timeout_secs, 120);
        assert_eq!(config.remote.sandbox_tmp_dir, "/tmp/claude");
        assert!(!config.remote.sandbox);
        assert!(config.remote.exec_timeout_secs.is_none());
        assert!(config.ssh.host_key_fingerprint.is_none());
        assert_eq!(config.server.name, "remote-claude-mcp");
        assert_eq!(config.server.version, "0.1.0");
    }

    #[test]
    fn explicit_zero_port_and_empty_names_take_defaults() {
        let raw = r#"{
            "ssh": {"host": "h", "user": "u", "key_path": "k", "port": 0},
            "remote": {"working_dir": "/w", "claude_code_path": ""},
            "server": {"name": "", "version": "2.0.0"}
        }"#;
        let config = Config::parse(raw).expect("config");
        assert_eq!(config.ssh.port, 22);
        assert_eq!(config.remote.claude_code_path, "claude");
        assert_eq!(config.server.name, "remote-claude-mcp");
        assert_eq!(config.server.version, "2.0.0");
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let err = Config::parse("{ not json").expect_err("must fail");
        assert!(matches!(err, StartupError::Config(_)));
    }

    #[test]
    fn missing_required_fields_are_listed() {
        let err = Config::parse(r#"{"ssh": {"host": "h"}}"#).expect_err("must fail");
        let message = err.to_string();
        assert!(message.contains("ssh.user"));
        assert!(message.contains("ssh.key_path"));
        assert!(message.contains("remote.working_dir"));
        assert!(!message.contains("ssh.host,"));
    }

    #[test]
    fn unreadable_file_is_a_config_error() {
        let err = Config::load("/nonexistent/remote-claude-mcp.json").expect_err("must fail");
        assert!(matches!(err, StartupError::Config(_)));
    }

    #[test]
    fn positional_form_parses_port() {
        let config =
            Config::from_positional("h", "u", "/k", "/w", Some("2222")).expect("config");
        assert_eq!(config.ssh.port, 2222);
        assert_eq!(config.remote.working_dir, "/w");
        assert_eq!(config.server.name, "remote-claude-mcp");

        let err = Config::from_positional("h", "u", "/k", "/w", Some("ssh")).expect_err("bad port");
        assert!(matches!(err, StartupError::Config(_)));
    }

    #[test]
    fn key_path_expands_home() {
        let mut config = Config::parse(MINIMAL).expect("config");
        config.ssh.key_path = "~/.ssh/id_ed25519".to_string();
        if let Ok(home) = std::env::var("HOME") {
            assert_eq!(
                config.key_path(),
                PathBuf::from(home).join(".ssh/id_ed25519")
            );
        }
    }
}
