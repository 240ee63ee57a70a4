//! Profile API module.
//!
//! Serves `GET /me`: a static identity block enriched with a freshly fetched
//! cat fact and a millisecond-precision UTC timestamp. The external fact
//! dependency is best-effort; every failure shape degrades to a fallback
//! string and the endpoint always answers 200.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{middleware::from_fn, routing::get, Router};
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
pub mod request_id;
mod web;

pub use config::ProfileApiConfig;

use domain::service::ProfileService;

/// Build the HTTP router: module routes plus the health check and the
/// standard middleware stack.
pub fn build_router(service: Arc<ProfileService>, config: &ProfileApiConfig) -> Router {
    let router = Router::new().route("/health", get(web::health_check));
    let mut router = api::rest::routes::register_routes(router, service);

    // Middleware order (outermost to innermost):
    // PropagateRequestId -> SetRequestId -> push_req_id_to_extensions -> Trace -> Timeout -> CORS -> BodyLimit
    let x_request_id = request_id::header();

    // 1. If client sent x-request-id, propagate it; otherwise we will set it
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));

    // 2. Generate x-request-id when missing
    router = router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

    // 3. Put request_id into extensions and span
    router = router.layer(from_fn(request_id::push_req_id_to_extensions));

    // 4. Trace with request_id/status/latency
    router = router.layer(request_id::create_trace_layer());

    // 5. Timeout layer - 30 second timeout for handlers
    router = router.layer(TimeoutLayer::new(Duration::from_secs(30)));

    // 6. CORS layer (if enabled): any origin, any method, any header
    if config.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }

    // 7. Body limit layer - 16MB default limit
    router = router.layer(RequestBodyLimitLayer::new(16 * 1024 * 1024));

    router
}

/// Background HTTP server: bind, serve until cancelled.
pub async fn serve(addr: SocketAddr, router: Router, cancel: CancellationToken) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server bound on {}", listener.local_addr()?);

    // Graceful shutdown on cancel
    let shutdown = {
        let cancel = cancel.clone();
        async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        }
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
