//! Error handling module for AgentGate
//!
//! This module provides the gateway error taxonomy and the mapping from
//! errors to HTTP status codes and response bodies.

mod error;

// Re-export the main error types and utilities
pub use error::{GatewayError, Result};
