//! Configuration module for AgentGate
//!
//! This module provides the gateway settings (environment + CLI) and the
//! JSON route file loader.

mod config;

// Re-export the main configuration types
pub use config::{GatewayConfig, RouteFile, DEFAULT_ROUTE_FILE_CONTENT};
