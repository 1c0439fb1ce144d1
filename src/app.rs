use crate::config::Config;
use crate::errors::StartupError;
use crate::mcp::server::McpServer;
use crate::services::gateway::ToolGateway;
use crate::services::logger::Logger;
use crate::services::policy::ExecutionPolicy;
use crate::services::transport::{ConnectionDescriptor, SshTransport, Transport};
use std::sync::Arc;

pub struct App {
    pub logger: Logger,
    pub config: Config,
    pub transport: Arc<SshTransport>,
    pub gateway: Arc<ToolGateway>,
    pub claude_available: bool,
}

impl App {
    /// Connect, prepare the working directory and wire the gateway.
    pub async fn initialize(config: Config) -> Result<Self, StartupError> {
        let logger = Logger::new(&config.server.name);
        let policy = Arc::new(ExecutionPolicy::from_config(&config.remote));

        let transport = Arc::new(SshTransport::new(logger.clone()));
        transport
            .connect(ConnectionDescriptor::from_config(&config))
            .await?;

        let claude_available = match prepare_remote(transport.as_ref(), &policy, &logger).await {
            Ok(available) => available,
            Err(err) => {
                transport.close().await;
                return Err(err);
            }
        };
        logger.info(
            &format!(
                "Connected to {}@{}:{}, working directory: {}",
                config.ssh.user, config.ssh.host, config.ssh.port, policy.working_dir
            ),
            None,
        );

        let gateway = Arc::new(ToolGateway::new(
            logger.clone(),
            transport.clone(),
            policy,
        ));
        Ok(Self {
            logger,
            config,
            transport,
            gateway,
            claude_available,
        })
    }

    pub fn server(&self) -> McpServer {
        McpServer::new(
            self.logger.clone(),
            self.gateway.clone(),
            &self.config.server.name,
            &self.config.server.version,
        )
    }

    pub async fn shutdown(&self) {
        self.transport.close().await;
    }
}

/// Create the working directory (fatal on failure) and probe for the Claude
/// binary (warning only). Returns whether the binary was found.
pub async fn prepare_remote(
    transport: &dyn Transport,
    policy: &ExecutionPolicy,
    logger: &Logger,
) -> Result<bool, StartupError> {
    let setup = transport
        .execute(&policy.working_dir_setup_command(), policy.exec_timeout())
        .await;
    if let Some(err) = &setup.error {
        let detail = setup.text();
        let reason = if detail.trim().is_empty() {
            err.to_string()
        } else {
            format!("{} ({})", err, detail.trim())
        };
        return Err(StartupError::WorkingDir {
            dir: policy.working_dir.clone(),
            reason,
        });
    }
    logger.debug(
        "working directory ready",
        Some(&serde_json::json!({ "pwd": setup.text().trim() })),
    );

    let probe = transport
        .execute(&policy.claude_probe_command(), policy.exec_timeout())
        .await;
    if probe.error.is_some() {
        logger.warn(
            &format!(
                "Claude Code not found at '{}', using fallback commands",
                policy.claude_code_path
            ),
            None,
        );
        return Ok(false);
    }
    Ok(true)
}

pub async fn run(config: Config) -> Result<(), StartupError> {
    let app = App::initialize(config).await?;
    let names: Vec<&str> = crate::mcp::catalog::ToolKind::ALL
        .iter()
        .map(|tool| tool.name())
        .collect();
    app.logger.info(
        &format!(
            "Starting MCP server {} v{} with tools: {:?}",
            app.config.server.name, app.config.server.version, names
        ),
        Some(&serde_json::json!({ "claude_available": app.claude_available })),
    );
    let served = app.server().run_stdio().await;
    app.shutdown().await;
    served.map_err(StartupError::from)
}
