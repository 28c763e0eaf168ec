//! Management API module for AgentGate
//!
//! This module provides the non-proxy endpoints: health, configuration
//! listing, reload trigger, and the usage document.

mod management;

pub use management::configure_management_api;
