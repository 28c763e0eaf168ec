//! Error types and handling for the gateway

use crate::routing::Category;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::json;
use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors (missing/unreadable/malformed config file)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The shared credential is absent at startup; the process must not start
    #[error("Credential error: {message}")]
    Credential { message: String },

    /// No configured upstream matches the requested category/name
    #[error("Unknown {} '{name}'", .category.label())]
    RouteNotFound {
        category: Category,
        name: String,
        /// Names configured for the category at resolution time
        available: Vec<String>,
    },

    /// The upstream could not be reached (DNS, refused, reset, timeout)
    #[error("Failed to reach {} '{name}': {message}", .category.label())]
    Upstream {
        category: Category,
        name: String,
        message: String,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic errors
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl GatewayError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a credential error
    pub fn credential<S: Into<String>>(message: S) -> Self {
        Self::Credential {
            message: message.into(),
        }
    }

    /// Create a route-not-found error with the names valid at lookup time
    pub fn route_not_found<S: Into<String>>(
        category: Category,
        name: S,
        available: Vec<String>,
    ) -> Self {
        Self::RouteNotFound {
            category,
            name: name.into(),
            available,
        }
    }

    /// Create an upstream-unreachable error
    pub fn upstream<S: Into<String>>(category: Category, name: S, message: S) -> Self {
        Self::Upstream {
            category,
            name: name.into(),
            message: message.into(),
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            GatewayError::Config { .. } => "config",
            GatewayError::Credential { .. } => "credential",
            GatewayError::RouteNotFound { .. } => "route_not_found",
            GatewayError::Upstream { .. } => "upstream",
            GatewayError::Io(_) => "io",
            GatewayError::Serde(_) => "serialization",
            GatewayError::Http(_) => "http",
            GatewayError::Internal(_) => "internal",
        }
    }

    /// HTTP status this error maps to. Total over the taxonomy: anything
    /// that is not a client-side routing mistake is a gateway-side 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render this error as the HTTP response the client receives.
    ///
    /// `RouteNotFound` enumerates the names that were configured for the
    /// category when the lookup failed, so callers can self-correct.
    /// `Upstream` carries the upstream name and transport error text.
    /// Everything else is surfaced as a generic 500 without internals.
    pub fn to_http_response(&self) -> HttpResponse {
        match self {
            GatewayError::RouteNotFound {
                category,
                available,
                ..
            } => HttpResponse::build(self.status_code()).json(json!({
                "error": self.to_string(),
                (category.available_field()): available,
            })),
            GatewayError::Upstream { .. } => {
                HttpResponse::build(self.status_code()).json(json!({
                    "error": self.to_string(),
                }))
            }
            _ => HttpResponse::build(self.status_code()).json(json!({
                "error": "Internal server error",
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_not_found_maps_to_404() {
        let err = GatewayError::route_not_found(
            Category::Mcp,
            "ghost",
            vec!["echo".to_string(), "files".to_string()],
        );
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.category(), "route_not_found");
    }

    #[test]
    fn upstream_maps_to_500_with_name_and_cause() {
        let err = GatewayError::upstream(Category::A2a, "planner", "connection refused");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let text = err.to_string();
        assert!(text.contains("planner"));
        assert!(text.contains("connection refused"));
    }

    #[test]
    fn internal_errors_map_to_500() {
        let err = GatewayError::from(anyhow::anyhow!("boom"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.category(), "internal");
    }

    #[test]
    fn config_error_message_is_preserved() {
        let err = GatewayError::config("bad file");
        assert_eq!(err.to_string(), "Configuration error: bad file");
        assert_eq!(err.category(), "config");
    }
}
