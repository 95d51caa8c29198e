//! JSON error bodies
//!
//! Every error the service answers with, whether a missing route or a
//! rejected request, is rendered as one [`ErrorBody`]: a stable `error`
//! code, a readable summary, optional field errors, a UTC timestamp and a
//! correlation id that is repeated in the `x-correlation-id` header.

use axum::{
    http::{header::HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use campus_validation::Issue;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use uuid::Uuid;

const CORRELATION_HEADER: &str = "x-correlation-id";

/// A field-level validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<Issue> for FieldError {
    fn from(issue: Issue) -> Self {
        Self {
            field: issue.path,
            message: issue.message,
        }
    }
}

/// Serialized shape shared by every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    #[serde(skip)]
    status: StatusCode,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
    pub code: u16,
    pub timestamp: String,
    pub correlation_id: String,
}

impl ErrorBody {
    fn new(status: StatusCode, error: String, message: String, errors: Vec<FieldError>) -> Self {
        Self {
            status,
            error,
            message,
            errors,
            code: status.as_u16(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            correlation_id: Uuid::new_v4().to_string(),
        }
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        let header = HeaderValue::from_str(&self.correlation_id).ok();
        let mut response = (self.status, Json(self)).into_response();
        if let Some(value) = header {
            response
                .headers_mut()
                .insert(HeaderName::from_static(CORRELATION_HEADER), value);
        }
        response
    }
}

/// Failure outside request validation: unknown route or schema, unreadable
/// dry-run payload
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: String,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error, message)
    }

    pub fn not_found(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error, message)
    }

    pub fn into_body(self) -> ErrorBody {
        ErrorBody::new(self.status, self.error, self.message, Vec::new())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_body().into_response()
    }
}

/// Rejected request; renders as `400` with every field error
#[derive(Debug)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }

    /// Names the field when only one failed, otherwise counts them
    pub fn summary(&self) -> String {
        match self.errors.as_slice() {
            [only] => format!("Validation failed for field '{}'", only.field),
            errors => format!("Validation failed for {} fields", errors.len()),
        }
    }

    pub fn into_body(self) -> ErrorBody {
        let message = self.summary();
        ErrorBody::new(
            StatusCode::BAD_REQUEST,
            "ValidationError".to_string(),
            message,
            self.errors,
        )
    }
}

impl From<Vec<Issue>> for ValidationError {
    fn from(issues: Vec<Issue>) -> Self {
        Self::new(issues.into_iter().map(FieldError::from).collect())
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        self.into_body().into_response()
    }
}
