//! HTTP route table.
//!
//! Routes are registered explicitly here rather than discovered. Probe routes
//! carry `Cache-Control: no-store` so intermediaries never answer for them.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod health;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_PROBE;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Path of the liveness probe
pub const HEALTH_PATH: &str = "/health";

/// Path of the readiness probe
pub const READY_PATH: &str = "/ready";

/// Creates the Axum router with the probe routes.
pub fn create_router(state: AppState) -> Router {
    // Probes - never cached, always fresh
    let probe_routes = Router::new()
        .route(HEALTH_PATH, get(health::health))
        .route(READY_PATH, get(health::ready))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_PROBE),
        ));

    Router::new()
        .merge(probe_routes)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
