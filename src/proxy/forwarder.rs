//! Forwarding engine: outbound request construction and response relay

use crate::error::{GatewayError, Result};
use crate::routing::Category;
use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Headers that belong to a single connection and must not be relayed in
/// either direction (RFC 7230 section 6.1, plus `Host` and the length
/// framing the transport layers manage themselves).
const HOP_BY_HOP_HEADERS: &[&str] = &[
    "host",
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "content-length",
];

fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP_HEADERS
        .iter()
        .any(|h| name.eq_ignore_ascii_case(h))
}

/// An upstream resolved from the routing table for one inbound request
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    pub category: Category,
    pub name: String,
    /// Fully rewritten upstream URL, query string included
    pub url: String,
}

/// Sends inbound requests to their resolved upstream.
///
/// One engine exists per process; it owns the shared credential and a
/// single reqwest client with a bounded timeout. Each inbound request gets
/// exactly one upstream attempt — proxied calls may be non-idempotent, so
/// retrying belongs to the caller, not the gateway.
pub struct ForwardingEngine {
    client: Client,
    credential: String,
}

impl ForwardingEngine {
    pub fn new(credential: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .use_rustls_tls()
            .build()
            .map_err(|e| GatewayError::config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, credential })
    }

    /// Relay `req` to `target` and stream the upstream response back.
    ///
    /// All inbound headers are copied except hop-by-hop ones and any client
    /// `Authorization`, which is always discarded; the shared credential is
    /// injected as the last mutation before send. Any upstream status,
    /// including 4xx/5xx, is passed through verbatim — only transport
    /// failures become gateway errors.
    pub async fn forward(
        &self,
        target: &ResolvedTarget,
        req: &HttpRequest,
        body: web::Bytes,
    ) -> Result<HttpResponse> {
        let method = reqwest::Method::from_bytes(req.method().as_str().as_bytes())
            .map_err(|e| anyhow::anyhow!("Unsupported HTTP method: {}", e))?;

        let mut outbound = self.client.request(method, &target.url);

        for (name, value) in req.headers() {
            if is_hop_by_hop(name.as_str()) || *name == header::AUTHORIZATION {
                debug!("Dropping inbound header '{}'", name);
                continue;
            }
            outbound = outbound.header(name.as_str(), value.as_bytes());
        }

        outbound = outbound.body(body);
        // Credential injection stays last so nothing can overwrite it.
        outbound = outbound.bearer_auth(&self.credential);

        info!(
            "Forwarding {} {} for {} '{}' to {}",
            req.method(),
            req.path(),
            target.category.label(),
            target.name,
            target.url
        );

        let upstream = outbound.send().await.map_err(|e| {
            GatewayError::upstream(target.category, target.name.clone(), e.to_string())
        })?;

        let status = upstream.status();
        info!(
            "{} '{}' responded {} for {} {}",
            target.category.label(),
            target.name,
            status,
            req.method(),
            req.path()
        );

        let status = StatusCode::from_u16(status.as_u16())
            .map_err(|e| anyhow::anyhow!("Invalid upstream status: {}", e))?;
        let mut response = HttpResponse::build(status);
        for (name, value) in upstream.headers() {
            if is_hop_by_hop(name.as_str()) {
                continue;
            }
            // append, not insert: repeated headers (Set-Cookie) must all survive
            response.append_header((name.as_str(), value.as_bytes()));
        }

        use futures_util::TryStreamExt;
        Ok(response.streaming(upstream.bytes_stream().map_err(std::io::Error::other)))
    }
}
