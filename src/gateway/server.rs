//! HTTP front end: route registration and the proxy handlers

use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::gateway::GatewayState;
use crate::proxy::ResolvedTarget;
use crate::routing::{rewrite_path, Category, RoutingTable};
use crate::web::configure_management_api;
use actix_web::{middleware::Logger, web, App, HttpRequest, HttpResponse, HttpServer};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// The gateway HTTP server
pub struct GatewayServer;

impl GatewayServer {
    /// Bind and run the gateway until the process receives a shutdown signal
    pub async fn start(config: GatewayConfig, initial_table: RoutingTable) -> Result<()> {
        let state = Arc::new(GatewayState::new(&config, initial_table)?);
        let state_data = web::Data::new(state);

        info!("Starting gateway on {}:{}", config.host, config.port);

        HttpServer::new(move || {
            App::new()
                .app_data(state_data.clone())
                .wrap(Logger::default())
                // Management endpoints
                .configure(configure_management_api)
                // Proxy route groups; any method, rest may be empty
                .route("/mcp/{name}/{rest:.*}", web::route().to(proxy_mcp_handler))
                .route("/mcp/{name}", web::route().to(proxy_mcp_handler))
                .route("/a2a/{name}/{rest:.*}", web::route().to(proxy_a2a_handler))
                .route("/a2a/{name}", web::route().to(proxy_a2a_handler))
        })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await?;

        debug!("Gateway server stopped");
        Ok(())
    }
}

/// Proxy handler for `/mcp/{name}/*`
pub async fn proxy_mcp_handler(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<Arc<GatewayState>>,
) -> HttpResponse {
    proxy(Category::Mcp, req, body, state).await
}

/// Proxy handler for `/a2a/{name}/*`
pub async fn proxy_a2a_handler(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<Arc<GatewayState>>,
) -> HttpResponse {
    proxy(Category::A2a, req, body, state).await
}

/// Resolve the upstream for one request and forward to it.
///
/// The table snapshot is taken once and used for both the lookup and, on a
/// miss, the 404 name enumeration, so a concurrent reload can never produce
/// a mixed view within one request.
async fn proxy(
    category: Category,
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<Arc<GatewayState>>,
) -> HttpResponse {
    let name = req.match_info().get("name").unwrap_or_default();
    let rest = req.match_info().get("rest").unwrap_or_default();
    let snapshot = state.table.snapshot();

    let Some(base_url) = snapshot.resolve(category, name) else {
        warn!("No {} named '{}' is configured", category.label(), name);
        return GatewayError::route_not_found(category, name, snapshot.names(category))
            .to_http_response();
    };

    let target = ResolvedTarget {
        category,
        name: name.to_string(),
        url: rewrite_path(base_url, rest, req.query_string()),
    };

    match state.engine.forward(&target, &req, body).await {
        Ok(response) => response,
        Err(e) => {
            error!(
                "Forwarding to {} '{}' failed ({}): {}",
                category.label(),
                name,
                e.category(),
                e
            );
            e.to_http_response()
        }
    }
}
