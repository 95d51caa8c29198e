//! HTTP adapter for campus portal request validation
//!
//! Wires the `campus-validation` schemas into axum: the
//! [`ValidatedRequest`](extractors::ValidatedRequest) extractor for
//! handlers, plus health, metrics and schema dry-run routes.

pub mod config;
pub mod endpoints;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod observability;
pub mod routes;
pub mod state;

use axum::{
    extract::{MatchedPath, Request},
    middleware,
    middleware::Next,
    response::Response,
    Router,
};
use std::time::Instant;

use crate::state::AppState;

/// Metrics label for requests that reached the fallback
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Router with every built-in route, the not-found fallback and request logging
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::schema_routes())
        .merge(routes::observability_routes())
        .fallback(handlers::route_not_found)
        .layer(middleware::from_fn(request_logger))
        .with_state(state)
}

async fn request_logger(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    // Route template, never the raw path, so label values stay bounded
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());
    let start = Instant::now();

    let response = next.run(req).await;

    let elapsed = start.elapsed();
    let status = response.status().as_u16();
    metrics::observe_http(method.as_str(), &route, status, elapsed.as_secs_f64());

    tracing::info!("{method} {uri} {status} {}ms", elapsed.as_millis());

    response
}
