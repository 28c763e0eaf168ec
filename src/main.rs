use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::error;

use agentgate::config::{GatewayConfig, RouteFile};
use agentgate::gateway::GatewayServer;
use agentgate::startup::StartupLogger;

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(about = env!("CARGO_PKG_DESCRIPTION"))]
#[command(version)]
struct Cli {
    /// Route file path
    #[arg(short, long, default_value = agentgate::DEFAULT_ROUTE_FILE)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Server host
    #[arg(long)]
    host: Option<String>,

    /// Server port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    // Resolve settings; a missing credential is fatal here
    let config = GatewayConfig::resolve(cli.config, cli.host, cli.port).map_err(|e| {
        error!("Failed to resolve configuration: {}", e);
        anyhow::anyhow!(e)
    })?;

    // Read the route file, creating the documented default when absent
    let table = RouteFile::load_or_create(&config.route_file)
        .map_err(|e| {
            error!("Failed to load route file: {}", e);
            anyhow::anyhow!(e)
        })?
        .into_table();

    StartupLogger::display_startup_info(&config, &table, agentgate::VERSION);

    GatewayServer::start(config, table).await?;

    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(env_filter)
        .init();

    Ok(())
}
