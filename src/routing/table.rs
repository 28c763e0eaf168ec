//! In-memory routing table with atomic wholesale replacement

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The two kinds of upstream the gateway fronts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// MCP servers, mounted under `/mcp/{name}/`
    Mcp,
    /// A2A agents, mounted under `/a2a/{name}/`
    A2a,
}

impl Category {
    /// URL path prefix for this category
    pub fn prefix(&self) -> &'static str {
        match self {
            Category::Mcp => "mcp",
            Category::A2a => "a2a",
        }
    }

    /// Human-readable label used in error messages and logs
    pub fn label(&self) -> &'static str {
        match self {
            Category::Mcp => "MCP server",
            Category::A2a => "A2A agent",
        }
    }

    /// JSON field name under which a 404 enumerates the configured names
    pub fn available_field(&self) -> &'static str {
        match self {
            Category::Mcp => "availableServers",
            Category::A2a => "availableAgents",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Immutable snapshot of the configured routes.
///
/// Entries are `(name, base_url)` pairs kept in configuration-file order so
/// diagnostics list them the way the operator wrote them. Tables are small,
/// so lookup is a linear exact match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutingTable {
    mcp_servers: Vec<(String, String)>,
    a2a_agents: Vec<(String, String)>,
}

impl RoutingTable {
    pub fn new(mcp_servers: Vec<(String, String)>, a2a_agents: Vec<(String, String)>) -> Self {
        Self {
            mcp_servers,
            a2a_agents,
        }
    }

    fn entries(&self, category: Category) -> &[(String, String)] {
        match category {
            Category::Mcp => &self.mcp_servers,
            Category::A2a => &self.a2a_agents,
        }
    }

    /// Exact, case-sensitive lookup of an upstream base URL
    pub fn resolve(&self, category: Category, name: &str) -> Option<&str> {
        self.entries(category)
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, url)| url.as_str())
    }

    /// Configured names for a category, in configuration-file order
    pub fn names(&self, category: Category) -> Vec<String> {
        self.entries(category)
            .iter()
            .map(|(n, _)| n.clone())
            .collect()
    }

    pub fn len(&self, category: Category) -> usize {
        self.entries(category).len()
    }

    pub fn is_empty(&self) -> bool {
        self.mcp_servers.is_empty() && self.a2a_agents.is_empty()
    }
}

/// Hot-swappable handle to the current routing table.
///
/// Readers take one snapshot per request and use it consistently for that
/// request's lifetime. A reload builds the replacement table completely off
/// to the side and publishes it with a single atomic store, so no reader
/// ever observes a half-built table.
pub struct SharedRoutingTable {
    current: ArcSwap<RoutingTable>,
}

impl SharedRoutingTable {
    pub fn new(initial: RoutingTable) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
        }
    }

    /// Pin the current table. The returned snapshot stays valid for the
    /// caller even if a reload publishes a newer table concurrently.
    pub fn snapshot(&self) -> Arc<RoutingTable> {
        self.current.load_full()
    }

    /// Publish a fully-built replacement table in one indivisible step
    pub fn replace(&self, table: RoutingTable) {
        self.current.store(Arc::new(table));
    }
}
