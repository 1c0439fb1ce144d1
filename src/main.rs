use clap::Parser;
use remote_claude_mcp::cli::Cli;

#[tokio::main]
async fn main() {
    let result = match Cli::parse().into_config() {
        Ok(config) => remote_claude_mcp::app::run(config).await,
        Err(err) => Err(err),
    };
    if let Err(err) = result {
        eprintln!("remote-claude-mcp: {}", err);
        std::process::exit(1);
    }
}
