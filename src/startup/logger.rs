//! Startup banner and configuration summary

use crate::config::GatewayConfig;
use crate::routing::{Category, RoutingTable};
use tracing::info;

/// Startup logger for the gateway banner
pub struct StartupLogger;

impl StartupLogger {
    /// Display the startup banner and resolved configuration
    pub fn display_startup_info(config: &GatewayConfig, table: &RoutingTable, version: &str) {
        info!("🚀 AgentGate v{} starting...", version);
        info!("");

        info!("📁 Configuration:");
        info!("   Route file: {:?}", config.route_file);
        info!("   MCP servers: {}", table.len(Category::Mcp));
        for name in table.names(Category::Mcp) {
            info!("      /mcp/{}/", name);
        }
        info!("   A2A agents: {}", table.len(Category::A2a));
        for name in table.names(Category::A2a) {
            info!("      /a2a/{}/", name);
        }

        info!("🌐 Server:");
        info!("   Listening on http://{}:{}", config.host, config.port);
        info!("   Upstream timeout: {}s", config.timeout_secs);
        info!("   Credential: set (injected as Bearer on every forwarded request)");

        info!("");
        info!("✅ AgentGate started successfully");
    }
}
