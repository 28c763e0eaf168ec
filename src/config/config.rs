//! Configuration management for the gateway

use crate::error::{GatewayError, Result};
use crate::routing::RoutingTable;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use url::Url;

/// Content written when no route file exists yet
pub const DEFAULT_ROUTE_FILE_CONTENT: &str = r#"{
  "mcpServers": {},
  "a2aAgents": {}
}
"#;

/// The JSON route file: `{"mcpServers": {name: url}, "a2aAgents": {name: url}}`.
///
/// Route maps deserialize into ordered pairs rather than a map type so that
/// diagnostics can list names in the order the operator wrote them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteFile {
    #[serde(default, rename = "mcpServers", deserialize_with = "ordered_routes")]
    pub mcp_servers: Vec<(String, String)>,
    #[serde(default, rename = "a2aAgents", deserialize_with = "ordered_routes")]
    pub a2a_agents: Vec<(String, String)>,
}

/// Deserialize a JSON object into `(name, url)` pairs in document order
fn ordered_routes<'de, D>(deserializer: D) -> std::result::Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct RoutesVisitor;

    impl<'de> Visitor<'de> for RoutesVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a map of service name to upstream URL")
        }

        fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut routes = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, url)) = access.next_entry::<String, String>()? {
                routes.push((name, url));
            }
            Ok(routes)
        }
    }

    deserializer.deserialize_map(RoutesVisitor)
}

impl RouteFile {
    /// Parse and validate a route file document
    pub fn parse(content: &str) -> Result<Self> {
        let file: RouteFile = serde_json::from_str(content)
            .map_err(|e| GatewayError::config(format!("Failed to parse config file: {}", e)))?;
        file.validate()?;
        Ok(file)
    }

    /// Read, parse, and validate the route file at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| GatewayError::config(format!("Failed to read config file: {}", e)))?;
        Self::parse(&content)
    }

    /// Load the route file at startup, auto-healing a missing or malformed
    /// file by writing the documented default. A malformed file is backed up
    /// next to the original before being replaced, so nothing the operator
    /// wrote is lost. Reload never writes; only startup heals.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(
                "Config file {:?} not found, creating it with default content",
                path
            );
            std::fs::write(path, DEFAULT_ROUTE_FILE_CONTENT)
                .map_err(|e| GatewayError::config(format!("Failed to write default config: {}", e)))?;
            return Self::load(path);
        }

        match Self::load(path) {
            Ok(file) => Ok(file),
            Err(e) => {
                let mut backup = path.as_os_str().to_owned();
                backup.push(".bak");
                let backup = PathBuf::from(backup);
                tracing::warn!(
                    "Config file {:?} is unusable ({}), moving it to {:?} and starting from the default",
                    path,
                    e,
                    backup
                );
                std::fs::rename(path, &backup).map_err(|e| {
                    GatewayError::config(format!("Failed to back up bad config: {}", e))
                })?;
                std::fs::write(path, DEFAULT_ROUTE_FILE_CONTENT).map_err(|e| {
                    GatewayError::config(format!("Failed to write default config: {}", e))
                })?;
                Self::load(path)
            }
        }
    }

    fn validate(&self) -> Result<()> {
        for (kind, routes) in [("mcpServers", &self.mcp_servers), ("a2aAgents", &self.a2a_agents)] {
            for (name, url) in routes {
                if name.is_empty() {
                    return Err(GatewayError::config(format!(
                        "Empty name in {} is not allowed",
                        kind
                    )));
                }
                let parsed = Url::parse(url).map_err(|e| {
                    GatewayError::config(format!("Invalid URL for {} '{}': {}", kind, name, e))
                })?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(GatewayError::config(format!(
                        "URL for {} '{}' must be http or https, got '{}'",
                        kind,
                        name,
                        parsed.scheme()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Build the routing table this file describes
    pub fn into_table(self) -> RoutingTable {
        RoutingTable::new(self.mcp_servers, self.a2a_agents)
    }
}

/// Process-wide gateway settings resolved from environment and CLI.
///
/// Precedence is defaults < environment < CLI flags, matching the usual
/// twelve-factor layering.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Bounded outbound timeout in seconds
    pub timeout_secs: u64,
    /// Shared bearer credential injected on every forwarded request
    pub api_key: String,
    /// Path of the JSON route file
    pub route_file: PathBuf,
}

impl GatewayConfig {
    /// Resolve settings from `.env` files, the environment, and CLI overrides.
    ///
    /// A missing credential is fatal here: the whole point of the gateway is
    /// to be the only holder of the key, so starting without one would leave
    /// every forwarded request unauthenticated in a way callers cannot see.
    pub fn resolve(
        route_file: PathBuf,
        host_override: Option<String>,
        port_override: Option<u16>,
    ) -> Result<Self> {
        Self::load_env_files();

        let api_key = std::env::var("AGENTGATE_API_KEY")
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                GatewayError::credential(
                    "AGENTGATE_API_KEY is not set; refusing to start without a credential",
                )
            })?;

        let mut host = crate::DEFAULT_HOST.to_string();
        let mut port = crate::DEFAULT_PORT;
        let mut timeout_secs = crate::DEFAULT_TIMEOUT_SECS;

        if let Ok(value) = std::env::var("AGENTGATE_HOST") {
            if !value.is_empty() {
                host = value;
            }
        }
        if let Ok(value) = std::env::var("AGENTGATE_PORT") {
            if !value.is_empty() {
                port = value.parse().map_err(|e| {
                    GatewayError::config(format!("Invalid AGENTGATE_PORT: {}", e))
                })?;
            }
        }
        if let Ok(value) = std::env::var("AGENTGATE_TIMEOUT") {
            if !value.is_empty() {
                timeout_secs = value.parse().map_err(|e| {
                    GatewayError::config(format!("Invalid AGENTGATE_TIMEOUT: {}", e))
                })?;
            }
        }

        // CLI overrides win over the environment
        if let Some(value) = host_override {
            host = value;
        }
        if let Some(value) = port_override {
            port = value;
        }

        Ok(Self {
            host,
            port,
            timeout_secs,
            api_key,
            route_file,
        })
    }

    /// Load `.env` then `.env.local`, silently skipping absent files
    fn load_env_files() {
        for env_file in [".env", ".env.local"] {
            match dotenvy::from_filename(env_file) {
                Ok(_) => {
                    tracing::info!("Loaded environment variables from {}", env_file);
                }
                Err(e) if e.to_string().contains("not found") => {
                    tracing::debug!("No {} file found, skipping", env_file);
                }
                Err(e) => {
                    tracing::warn!("Failed to load {}: {}", env_file, e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Category;

    #[test]
    fn parses_routes_in_document_order() {
        let file = RouteFile::parse(
            r#"{
                "mcpServers": {"zeta": "http://localhost:1", "alpha": "http://localhost:2"},
                "a2aAgents": {"planner": "http://localhost:3"}
            }"#,
        )
        .unwrap();
        let table = file.into_table();
        assert_eq!(table.names(Category::Mcp), vec!["zeta", "alpha"]);
        assert_eq!(table.names(Category::A2a), vec!["planner"]);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let file = RouteFile::parse(r#"{"mcpServers": {}}"#).unwrap();
        let table = file.into_table();
        assert!(table.is_empty());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(RouteFile::parse("{not json").is_err());
    }

    #[test]
    fn rejects_non_http_urls() {
        let result = RouteFile::parse(r#"{"mcpServers": {"f": "ftp://host/"}}"#);
        assert!(result.is_err());
        let result = RouteFile::parse(r#"{"mcpServers": {"f": "not a url"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_empty_names() {
        let result = RouteFile::parse(r#"{"a2aAgents": {"": "http://localhost:1"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn default_content_is_a_valid_route_file() {
        let file = RouteFile::parse(DEFAULT_ROUTE_FILE_CONTENT).unwrap();
        assert!(file.into_table().is_empty());
    }

    #[test]
    fn startup_creates_missing_file_with_default_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.json");

        let file = RouteFile::load_or_create(&path).unwrap();
        assert!(file.into_table().is_empty());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            DEFAULT_ROUTE_FILE_CONTENT
        );
    }

    #[test]
    fn startup_heals_malformed_file_and_keeps_a_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.json");
        std::fs::write(&path, "{this is not json").unwrap();

        let file = RouteFile::load_or_create(&path).unwrap();
        assert!(file.into_table().is_empty());

        // The operator's content survives next to the healed file
        let backup = dir.path().join("routes.json.bak");
        assert_eq!(
            std::fs::read_to_string(backup).unwrap(),
            "{this is not json"
        );
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            DEFAULT_ROUTE_FILE_CONTENT
        );
    }

    #[test]
    fn startup_heals_file_with_invalid_routes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.json");
        std::fs::write(&path, r#"{"mcpServers": {"f": "not a url"}}"#).unwrap();

        let file = RouteFile::load_or_create(&path).unwrap();
        assert!(file.into_table().is_empty());
        assert!(dir.path().join("routes.json.bak").exists());
    }
}
