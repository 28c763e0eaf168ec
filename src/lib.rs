//! AgentGate - Local gateway for MCP servers and A2A agents
//!
//! This crate provides a local reverse proxy that multiplexes requests to
//! named upstream services and injects a shared bearer credential on every
//! forwarded request, so downstream tools never hold the secret themselves.
//! It is protocol-agnostic at the byte level: path rewriting and header
//! injection only, no MCP or A2A semantics.

pub mod config;
pub mod error;
pub mod gateway;
pub mod proxy;
pub mod routing;
pub mod startup;
pub mod web;

pub use config::{GatewayConfig, RouteFile};
pub use error::{GatewayError, Result};
pub use routing::{Category, RoutingTable, SharedRoutingTable};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default route file name
pub const DEFAULT_ROUTE_FILE: &str = "agentgate.config.json";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 12345;

/// Default outbound timeout in seconds; permissive because proxied agentic
/// workloads can legitimately run for minutes
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
