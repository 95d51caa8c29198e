use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use campus_validation::{
    schemas::catalog, validate, validators::validate_json_depth, Namespace, RequestInput,
};
use serde_json::{json, Value};

use crate::error::{ApiError, ValidationError};
use crate::metrics;
use crate::state::AppState;

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let uptime = state.started_at.elapsed().as_secs();
    let now = chrono::Utc::now().to_rfc3339();

    tracing::debug!(uptime_secs = uptime, "health check passed");
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": now,
            "uptime_secs": uptime,
            "schemas": catalog::all().len()
        })),
    )
}

pub async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let body = metrics::gather_metrics(&state.registry);
    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        body,
    )
}

/// Every registered schema with the namespaces it constrains
pub async fn list_schemas() -> Json<Value> {
    let schemas: Vec<Value> = catalog::all()
        .iter()
        .map(|schema| {
            let namespaces: Vec<&str> = Namespace::ALL
                .into_iter()
                .filter(|ns| schema.namespace(*ns).is_some())
                .map(|ns| ns.as_str())
                .collect();
            json!({ "name": schema.name(), "namespaces": namespaces })
        })
        .collect();
    Json(json!({ "total": schemas.len(), "schemas": schemas }))
}

/// Dry run: validates a `{params, query, body}` document against a named
/// schema and returns the normalized form without invoking any operation.
pub async fn check_request(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<RequestInput>, JsonRejection>,
) -> Response {
    let Some(schema) = catalog::get(&name) else {
        return ApiError::not_found("SchemaNotFound", format!("No schema named '{}'", name))
            .into_response();
    };
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            return ApiError::bad_request("InvalidPayload", rejection.body_text()).into_response()
        }
    };
    if let Err(message) = validate_json_depth(&input.body, state.config.max_json_depth) {
        return ValidationError::single("body", message).into_response();
    }

    match validate(schema, &input) {
        Ok(normalized) => {
            metrics::observe_validation(schema.name(), &[]);
            (
                StatusCode::OK,
                Json(json!({ "valid": true, "schema": schema.name(), "input": normalized })),
            )
                .into_response()
        }
        Err(issues) => {
            metrics::observe_validation(schema.name(), &issues);
            ValidationError::from(issues).into_response()
        }
    }
}

pub async fn route_not_found() -> ApiError {
    ApiError::not_found("RouteNotFound", "Route not found")
}
