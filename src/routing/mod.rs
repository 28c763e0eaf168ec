//! Routing module for AgentGate
//!
//! This module provides the hot-swappable routing table that maps
//! `(category, name)` pairs to upstream base URLs, and the pure path
//! rewriter that turns an inbound gateway path into an upstream URL.

mod rewrite;
mod table;

pub use rewrite::rewrite_path;
pub use table::{Category, RoutingTable, SharedRoutingTable};
