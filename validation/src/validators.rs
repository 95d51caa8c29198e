//! Primitive validators
//!
//! Stateless checks over already-coerced values. Each returns `Ok(())` or
//! the message for the issue it raises.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::enums::EnumSet;
use crate::patterns::Pattern;

/// Calendar-date layouts accepted in addition to RFC 3339 and RFC 2822
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Validate a string against a named pattern
pub fn validate_pattern(value: &str, pattern: Pattern) -> Result<(), String> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(pattern.message().to_string())
    }
}

/// Validate enum membership (exact, case-sensitive)
pub fn validate_enum(field: &str, value: &str, set: &EnumSet) -> Result<(), String> {
    if set.contains(value) {
        return Ok(());
    }
    Err(format!(
        "{} must be one of {}, received '{}'",
        field,
        set.describe(),
        value
    ))
}

/// Whether a generic date parser resolves the string to a real calendar date
pub fn is_parseable_date(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    if DateTime::parse_from_rfc3339(value).is_ok() || DateTime::parse_from_rfc2822(value).is_ok() {
        return true;
    }
    DATE_FORMATS
        .iter()
        .any(|f| NaiveDate::parse_from_str(value, f).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|f| NaiveDateTime::parse_from_str(value, f).is_ok())
}

/// Validate date parseability
pub fn validate_date(field: &str, value: &str) -> Result<(), String> {
    if is_parseable_date(value) {
        Ok(())
    } else {
        Err(format!("{} must be a valid date", field))
    }
}

/// Validate minimum string length, in characters
pub fn validate_min_length(field: &str, value: &str, min: usize) -> Result<(), String> {
    if value.chars().count() < min {
        return Err(format!("{} must be at least {} characters", field, min));
    }
    Ok(())
}

/// Validate maximum string length, in characters
pub fn validate_max_length(field: &str, value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!("{} must be at most {} characters", field, max));
    }
    Ok(())
}

/// Validate minimum number of array items
pub fn validate_min_items(field: &str, len: usize, min: usize) -> Result<(), String> {
    if len < min {
        return Err(format!("{} must contain at least {} items", field, min));
    }
    Ok(())
}

/// Validate maximum number of array items
pub fn validate_max_items(field: &str, len: usize, max: usize) -> Result<(), String> {
    if len > max {
        return Err(format!("{} must contain at most {} items", field, max));
    }
    Ok(())
}

pub fn validate_min(field: &str, value: f64, min: f64) -> Result<(), String> {
    if value < min {
        return Err(format!("{} must be greater than or equal to {}", field, min));
    }
    Ok(())
}

pub fn validate_max(field: &str, value: f64, max: f64) -> Result<(), String> {
    if value > max {
        return Err(format!("{} must be less than or equal to {}", field, max));
    }
    Ok(())
}

pub fn validate_integer(field: &str, value: f64) -> Result<(), String> {
    if value.fract() != 0.0 {
        return Err(format!("{} must be an integer", field));
    }
    Ok(())
}

/// Strictly greater than zero
pub fn validate_positive(field: &str, value: f64) -> Result<(), String> {
    if value <= 0.0 {
        return Err(format!("{} must be a positive number", field));
    }
    Ok(())
}

/// Validate JSON value is not deeply nested
pub fn validate_json_depth(value: &Value, max_depth: usize) -> Result<(), String> {
    fn check_depth(v: &Value, current: usize, max: usize) -> Result<(), String> {
        if current > max {
            return Err(format!("JSON exceeds maximum nesting depth of {}", max));
        }
        match v {
            Value::Array(arr) => {
                for item in arr {
                    check_depth(item, current + 1, max)?;
                }
            }
            Value::Object(obj) => {
                for val in obj.values() {
                    check_depth(val, current + 1, max)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    check_depth(value, 0, max_depth)
}
