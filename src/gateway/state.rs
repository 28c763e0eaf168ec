//! Shared per-process gateway state

use crate::config::GatewayConfig;
use crate::error::Result;
use crate::proxy::ForwardingEngine;
use crate::routing::{RoutingTable, SharedRoutingTable};
use std::path::PathBuf;
use std::time::Duration;

/// Everything a request handler needs: the hot-swappable routing table,
/// the forwarding engine, and the settings the management API reports.
pub struct GatewayState {
    pub table: SharedRoutingTable,
    pub engine: ForwardingEngine,
    pub route_file: PathBuf,
    pub port: u16,
}

impl GatewayState {
    pub fn new(config: &GatewayConfig, initial_table: RoutingTable) -> Result<Self> {
        let engine = ForwardingEngine::new(
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self {
            table: SharedRoutingTable::new(initial_table),
            engine,
            route_file: config.route_file.clone(),
            port: config.port,
        })
    }
}
