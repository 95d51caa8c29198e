//! Issue and error types for request validation
//!
//! Two families of failure exist and they never mix:
//!
//! - [`Issue`]: something wrong with the *input*. Always collected into a
//!   list and handed back to the caller, never raised.
//! - [`SchemaError`]: something wrong with a *schema definition*. Raised
//!   while schemas are composed at startup and never reaches an end user.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::RequestInput;

/// Category of an input issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Required field missing
    Presence,
    /// Value present but not convertible to the declared type
    Coercion,
    /// Value converted but violates a bound, pattern or enum membership
    Constraint,
    /// Individually valid data failed a field or whole-object rule
    Refinement,
}

impl IssueKind {
    pub const ALL: [IssueKind; 4] = [
        IssueKind::Presence,
        IssueKind::Coercion,
        IssueKind::Constraint,
        IssueKind::Refinement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Presence => "presence",
            IssueKind::Coercion => "coercion",
            IssueKind::Constraint => "constraint",
            IssueKind::Refinement => "refinement",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Dotted/array location, e.g. `body.emergencyContact.phone`
    pub path: String,
    pub message: String,
    pub kind: IssueKind,
}

impl Issue {
    pub fn new(path: impl Into<String>, message: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    pub fn presence(path: impl Into<String>, field: &str) -> Self {
        Self::new(path, format!("{} is required", field), IssueKind::Presence)
    }

    pub fn coercion(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, message, IssueKind::Coercion)
    }

    pub fn constraint(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, message, IssueKind::Constraint)
    }

    pub fn refinement(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, message, IssueKind::Refinement)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Outcome of validating one request.
///
/// `Ok` carries the normalized request; `Err` carries every issue found,
/// ordered params, query, body and by declaration order within each.
pub type ValidationResult = Result<RequestInput, Vec<Issue>>;

/// Malformed schema definition (programmer error)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("unknown pattern name '{0}'")]
    UnknownPattern(String),

    #[error("unknown enum set '{0}'")]
    UnknownEnumSet(String),

    #[error("enum set '{0}' has no values")]
    EmptyEnumSet(String),

    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("refinement references undeclared field '{0}'")]
    UndeclaredField(String),

    #[error("refinement lists no fields")]
    EmptyRefinement,

    #[error("{rule} cannot be applied to {field_type} field '{field}'")]
    IncompatibleRule {
        field: String,
        rule: &'static str,
        field_type: &'static str,
    },

    #[error("field '{field}' has inverted bounds ({min} > {max})")]
    InvertedBounds { field: String, min: f64, max: f64 },
}

/// Result type for schema composition
pub type SchemaResult<T> = Result<T, SchemaError>;
