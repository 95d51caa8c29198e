//! Campus Validation
//!
//! Declarative request validation for the campus portal API. Each API
//! operation is described by an [`EndpointSchema`] built from typed field
//! rules; [`validate`] walks a [`RequestInput`] against it and returns
//! either the normalized request or every [`Issue`] found.
//!
//! ```
//! use campus_validation::schemas::student;
//! use campus_validation::{validate, RequestInput};
//!
//! let input = RequestInput::new().with_param("id", "not-an-id");
//! let issues = validate(&student::DELETE, &input).unwrap_err();
//! assert_eq!(issues[0].message, "Invalid ID format");
//! ```

pub mod coercion;
pub mod enums;
pub mod error;
pub mod executor;
pub mod input;
pub mod patterns;
pub mod schema;
pub mod schemas;
pub mod validators;

pub use enums::EnumSet;
pub use error::{Issue, IssueKind, SchemaError, SchemaResult, ValidationResult};
pub use executor::validate;
pub use input::RequestInput;
pub use patterns::Pattern;
pub use schema::{
    array, boolean, date, enumeration, number, object, string, EndpointSchema, FieldRule,
    Namespace, ObjectSchema,
};
