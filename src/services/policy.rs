use crate::config::RemoteConfig;
use crate::constants::{read, remote};
use crate::utils::shell::{quote_operand, shell_quote};
use std::time::Duration;

/// Read-only settings applied to every synthesized command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPolicy {
    pub working_dir: String,
    pub shell: String,
    pub claude_code_path: String,
    pub sandbox_default: bool,
    pub sandbox_timeout_secs: u64,
    pub sandbox_tmp_dir: String,
    pub exec_timeout_secs: Option<u64>,
    pub read_offset: u64,
    pub read_limit: u64,
}

impl ExecutionPolicy {
    pub fn new(working_dir: impl Into<String>) -> Self {
        Self {
            working_dir: working_dir.into(),
            shell: remote::DEFAULT_SHELL.to_string(),
            claude_code_path: remote::DEFAULT_CLAUDE_CODE_PATH.to_string(),
            sandbox_default: false,
            sandbox_timeout_secs: remote::SANDBOX_TIMEOUT_SECS,
            sandbox_tmp_dir: remote::SANDBOX_TMP_DIR.to_string(),
            exec_timeout_secs: None,
            read_offset: read::DEFAULT_OFFSET,
            read_limit: read::DEFAULT_LIMIT,
        }
    }

    pub fn from_config(config: &RemoteConfig) -> Self {
        Self {
            working_dir: config.working_dir.clone(),
            shell: config.shell.clone(),
            claude_code_path: config.claude_code_path.clone(),
            sandbox_default: config.sandbox,
            sandbox_timeout_secs: config.sandbox_timeout_secs,
            sandbox_tmp_dir: config.sandbox_tmp_dir.clone(),
            exec_timeout_secs: config.exec_timeout_secs,
            ..Self::new(config.working_dir.clone())
        }
    }

    pub fn with_sandbox_timeout_secs(mut self, secs: u64) -> Self {
        self.sandbox_timeout_secs = secs;
        self
    }

    pub fn with_exec_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.exec_timeout_secs = secs;
        self
    }

    pub fn in_working_dir(&self, command: &str) -> String {
        format!("cd {} && {}", quote_operand(&self.working_dir), command)
    }

    pub fn resolve_sandbox(&self, requested: Option<bool>) -> bool {
        requested.unwrap_or(self.sandbox_default)
    }

    /// `timeout <n> <shell> -c '<script>'` with TMPDIR pointed at the sandbox directory.
    pub fn sandboxed(&self, command: &str) -> String {
        let tmp = quote_operand(&self.sandbox_tmp_dir);
        let script = format!("mkdir -p {tmp} && export TMPDIR={tmp} && {command}");
        format!(
            "timeout {} {} -c {}",
            self.sandbox_timeout_secs,
            shell_quote(&self.shell),
            shell_quote(&script)
        )
    }

    pub fn exec_timeout(&self) -> Option<Duration> {
        self.exec_timeout_secs.map(Duration::from_secs)
    }

    pub fn is_default_read_window(&self, offset: u64, limit: u64) -> bool {
        offset == self.read_offset && limit == self.read_limit
    }

    pub fn working_dir_setup_command(&self) -> String {
        let dir = quote_operand(&self.working_dir);
        format!("mkdir -p {dir} && cd {dir} && pwd")
    }

    pub fn claude_probe_command(&self) -> String {
        self.in_working_dir(&format!("which {}", shell_quote(&self.claude_code_path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn working_dir_prefix_is_quoted_when_needed() {
        let policy = ExecutionPolicy::new("/srv/work");
        assert_eq!(policy.in_working_dir("ls"), "cd /srv/work && ls");

        let policy = ExecutionPolicy::new("/srv/my work");
        assert_eq!(policy.in_working_dir("ls"), "cd '/srv/my work' && ls");

        let policy = ExecutionPolicy::new("~/proj");
        assert_eq!(policy.in_working_dir("ls"), "cd ~/proj && ls");

        let policy = ExecutionPolicy::new("-P");
        assert_eq!(policy.in_working_dir("ls"), "cd ./-P && ls");
        assert_eq!(policy.working_dir_setup_command(), "mkdir -p ./-P && cd ./-P && pwd");
    }

    #[test]
    fn sandbox_wraps_command_in_timeout_and_tmpdir() {
        let policy = ExecutionPolicy::new("/w");
        assert_eq!(
            policy.sandboxed("echo hi"),
            "timeout 120 bash -c 'mkdir -p /tmp/claude && export TMPDIR=/tmp/claude && echo hi'"
        );
    }

    #[test]
    fn sandbox_script_quotes_embedded_single_quotes() {
        let policy = ExecutionPolicy::new("/w").with_sandbox_timeout_secs(5);
        assert_eq!(
            policy.sandboxed("echo 'x'"),
            "timeout 5 bash -c 'mkdir -p /tmp/claude && export TMPDIR=/tmp/claude && echo '\\''x'\\'''"
        );
    }

    #[test]
    fn sandbox_flag_falls_back_to_default() {
        let mut policy = ExecutionPolicy::new("/w");
        assert!(!policy.resolve_sandbox(None));
        assert!(policy.resolve_sandbox(Some(true)));
        policy.sandbox_default = true;
        assert!(policy.resolve_sandbox(None));
        assert!(!policy.resolve_sandbox(Some(false)));
    }

    #[test]
    fn startup_commands() {
        let policy = ExecutionPolicy::new("/tmp/claude-remote");
        assert_eq!(
            policy.working_dir_setup_command(),
            "mkdir -p /tmp/claude-remote && cd /tmp/claude-remote && pwd"
        );
        assert_eq!(
            policy.claude_probe_command(),
            "cd /tmp/claude-remote && which claude"
        );
    }

    #[test]
    fn from_config_carries_every_setting() {
        let config = RemoteConfig {
            working_dir: "/w".to_string(),
            claude_code_path: "/opt/claude".to_string(),
            shell: "sh".to_string(),
            sandbox: true,
            sandbox_timeout_secs: 30,
            sandbox_tmp_dir: "/tmp/box".to_string(),
            exec_timeout_secs: Some(600),
        };
        let policy = ExecutionPolicy::from_config(&config);
        assert_eq!(policy.working_dir, "/w");
        assert_eq!(policy.shell, "sh");
        assert!(policy.sandbox_default);
        assert_eq!(policy.exec_timeout(), Some(Duration::from_secs(600)));
        assert!(policy.is_default_read_window(0, 2000));
        assert!(!policy.is_default_read_window(0, 10));
    }
}
