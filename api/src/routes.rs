use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, state::AppState};

pub fn observability_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(handlers::metrics_endpoint))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health_check))
}

pub fn schema_routes() -> Router<AppState> {
    Router::new()
        .route("/api/schemas", get(handlers::list_schemas))
        .route("/api/schemas/:name/check", post(handlers::check_request))
}
