//! Axum extractor that validates a whole request against an endpoint schema
//!
//! `ValidatedRequest<E>` gathers path parameters, query pairs and the JSON
//! body, runs them through `E`'s schema and hands the handler the
//! normalized [`RequestInput`]. Any issue answers `400` before the handler
//! runs, with every field error listed.

use std::marker::PhantomData;
use std::ops::Deref;

use axum::{
    async_trait,
    body::Body,
    extract::{rejection::RawPathParamsRejection, FromRef, FromRequest, FromRequestParts, Query, RawPathParams, Request},
    http::{header, request::Parts},
};
use campus_validation::{validate, validators::validate_json_depth, RequestInput};
use serde_json::{Map, Value};
use tracing::warn;

use crate::config::ApiConfig;
use crate::endpoints::Endpoint;
use crate::error::ValidationError;
use crate::metrics;

/// Request input that satisfied `E`'s schema
///
/// # Example
///
/// ```ignore
/// pub async fn delete_branch(
///     req: ValidatedRequest<branch::Delete>,
/// ) -> impl IntoResponse {
///     let id = req.param("id");
///     // ...
/// }
/// ```
pub struct ValidatedRequest<E> {
    input: RequestInput,
    _endpoint: PhantomData<fn() -> E>,
}

impl<E> ValidatedRequest<E> {
    pub fn into_inner(self) -> RequestInput {
        self.input
    }
}

impl<E> Deref for ValidatedRequest<E> {
    type Target = RequestInput;

    fn deref(&self) -> &Self::Target {
        &self.input
    }
}

#[async_trait]
impl<S, E> FromRequest<S> for ValidatedRequest<E>
where
    E: Endpoint,
    S: Send + Sync,
    ApiConfig: FromRef<S>,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let config = ApiConfig::from_ref(state);
        let schema = E::schema();

        let input = match read_input(req, state, &config).await {
            Ok(input) => input,
            Err(rejection) => {
                metrics::VALIDATION_REQUESTS_TOTAL
                    .with_label_values(&[schema.name()])
                    .inc();
                metrics::VALIDATION_FAILURES_TOTAL
                    .with_label_values(&[schema.name()])
                    .inc();
                warn!(endpoint = schema.name(), errors = ?rejection.errors, "request could not be read");
                return Err(rejection);
            }
        };

        match validate(schema, &input) {
            Ok(normalized) => {
                metrics::observe_validation(schema.name(), &[]);
                Ok(Self {
                    input: normalized,
                    _endpoint: PhantomData,
                })
            }
            Err(issues) => {
                metrics::observe_validation(schema.name(), &issues);
                warn!(
                    endpoint = schema.name(),
                    issues = issues.len(),
                    first = %issues[0],
                    "request rejected"
                );
                Err(ValidationError::from(issues))
            }
        }
    }
}

async fn read_input<S>(req: Request, state: &S, config: &ApiConfig) -> Result<RequestInput, ValidationError>
where
    S: Send + Sync,
{
    let (mut parts, body) = req.into_parts();
    let params = path_params(&mut parts, state).await?;
    let query = query_params(&parts)?;
    let body = json_body(&parts, body, config).await?;
    Ok(RequestInput { params, query, body })
}

async fn path_params<S>(parts: &mut Parts, state: &S) -> Result<Map<String, Value>, ValidationError>
where
    S: Send + Sync,
{
    match RawPathParams::from_request_parts(parts, state).await {
        Ok(raw) => Ok(raw
            .iter()
            .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
            .collect()),
        // Route without path segments
        Err(RawPathParamsRejection::MissingPathParams(_)) => Ok(Map::new()),
        Err(err) => Err(ValidationError::single("params", err.body_text())),
    }
}

fn query_params(parts: &Parts) -> Result<Map<String, Value>, ValidationError> {
    if parts.uri.query().is_none() {
        return Ok(Map::new());
    }
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
        .map_err(|err| ValidationError::single("query", err.body_text()))?;
    Ok(RequestInput::query_from_pairs(pairs))
}

async fn json_body(parts: &Parts, body: Body, config: &ApiConfig) -> Result<Value, ValidationError> {
    let limit = config.max_body_bytes;
    let declared = parts
        .headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared.is_some_and(|len| len > limit) {
        return Err(too_large(limit));
    }

    let bytes = axum::body::to_bytes(body, limit)
        .await
        .map_err(|_| too_large(limit))?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|e| ValidationError::single("body", format!("JSON syntax error: {}", e)))?;
    validate_json_depth(&value, config.max_json_depth)
        .map_err(|message| ValidationError::single("body", message))?;
    Ok(value)
}

fn too_large(limit: usize) -> ValidationError {
    ValidationError::single(
        "body",
        format!("Request body is unreadable or exceeds the {} byte limit", limit),
    )
}
