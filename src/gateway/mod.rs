//! Gateway module for AgentGate
//!
//! This module assembles the HTTP front end: shared per-process state, the
//! proxy handlers for the `/mcp` and `/a2a` route groups, and the
//! actix-web server.

mod server;
mod state;

pub use server::{proxy_a2a_handler, proxy_mcp_handler, GatewayServer};
pub use state::GatewayState;
