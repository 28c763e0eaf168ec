//! Management endpoint handlers

use crate::config::RouteFile;
use crate::gateway::GatewayState;
use crate::routing::Category;
use actix_web::{web, HttpResponse};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

/// Register the management routes
pub fn configure_management_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/config", web::get().to(get_config))
        .route("/config/reload", web::post().to(reload_config))
        .route("/", web::get().to(usage));
}

/// Health check endpoint
async fn health(state: web::Data<Arc<GatewayState>>) -> HttpResponse {
    let table = state.table.snapshot();
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "port": state.port,
        "configuredServers": table.names(Category::Mcp),
        "configuredAgents": table.names(Category::A2a),
    }))
}

/// List configured names and their local endpoints.
///
/// Never exposes upstream URLs or the credential; callers only learn what
/// is mounted where on the gateway itself.
async fn get_config(state: web::Data<Arc<GatewayState>>) -> HttpResponse {
    let table = state.table.snapshot();
    let local_urls = |category: Category| -> Vec<String> {
        table
            .names(category)
            .iter()
            .map(|name| {
                format!(
                    "http://localhost:{}/{}/{}/",
                    state.port,
                    category.prefix(),
                    name
                )
            })
            .collect()
    };

    HttpResponse::Ok().json(json!({
        "mcpServers": table.names(Category::Mcp),
        "a2aAgents": table.names(Category::A2a),
        "endpoints": {
            "mcp": local_urls(Category::Mcp),
            "a2a": local_urls(Category::A2a),
        },
    }))
}

/// Re-read the route file and atomically replace the routing table.
///
/// A read or parse failure rejects the reload and leaves the previous
/// table serving; the failure is reported in the response, never fatal.
async fn reload_config(state: web::Data<Arc<GatewayState>>) -> HttpResponse {
    let path = state.route_file.clone();
    let loaded = web::block(move || RouteFile::load(&path)).await;

    let file = match loaded {
        Ok(Ok(file)) => file,
        Ok(Err(e)) => {
            error!("Config reload rejected ({}): {}", e.category(), e);
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "error": e.to_string(),
            }));
        }
        Err(e) => {
            error!("Config reload task failed: {}", e);
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "error": "Internal server error",
            }));
        }
    };

    let table = file.into_table();
    let servers = table.names(Category::Mcp);
    let agents = table.names(Category::A2a);
    state.table.replace(table);
    info!(
        "Configuration reloaded: {} MCP servers, {} A2A agents",
        servers.len(),
        agents.len()
    );

    HttpResponse::Ok().json(json!({
        "success": true,
        "mcpServers": servers,
        "a2aAgents": agents,
    }))
}

/// Static usage document
async fn usage(state: web::Data<Arc<GatewayState>>) -> HttpResponse {
    let body = format!(
        "AgentGate v{}\n\
         \n\
         Local gateway proxying MCP servers and A2A agents with shared\n\
         credential injection. Configure upstreams in {:?}.\n\
         \n\
         Routes:\n\
         any  /mcp/{{serverName}}/*   proxy to the named MCP server\n\
         any  /a2a/{{agentName}}/*    proxy to the named A2A agent\n\
         GET  /health                gateway health and configured names\n\
         GET  /config                configured names and local endpoints\n\
         POST /config/reload         re-read the config file\n\
         \n\
         Listening on port {}.\n",
        crate::VERSION,
        state.route_file,
        state.port
    );
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(body)
}
