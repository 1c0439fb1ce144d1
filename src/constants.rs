pub mod server {
    pub const DEFAULT_NAME: &str = "remote-claude-mcp";
    pub const DEFAULT_VERSION: &str = "0.1.0";
    pub const PROTOCOL_VERSION: &str = "2025-06-18";
}

pub mod network {
    pub const SSH_DEFAULT_PORT: u16 = 22;
    pub const TIMEOUT_SSH_READY_MS: u64 = 10_000;
    pub const KEEPALIVE_INTERVAL_SECS: u32 = 30;
    pub const CHANNEL_POLL_INTERVAL_MS: u64 = 10;
    pub const CHANNEL_CLOSE_GRACE_MS: u64 = 2_000;
}

pub mod remote {
    pub const DEFAULT_CLAUDE_CODE_PATH: &str = "claude";
    pub const DEFAULT_SHELL: &str = "bash";
    pub const SANDBOX_TIMEOUT_SECS: u64 = 120;
    pub const SANDBOX_TMP_DIR: &str = "/tmp/claude";
    /// Exit status of coreutils `timeout` when the limit fires.
    pub const TIMEOUT_EXIT_STATUS: i32 = 124;
}

pub mod read {
    pub const DEFAULT_OFFSET: u64 = 0;
    pub const DEFAULT_LIMIT: u64 = 2000;
}
