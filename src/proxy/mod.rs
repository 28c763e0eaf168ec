//! Proxy module for AgentGate
//!
//! This module provides the forwarding engine that relays an inbound
//! request to its resolved upstream with the shared credential injected.

mod forwarder;

pub use forwarder::{ForwardingEngine, ResolvedTarget};
