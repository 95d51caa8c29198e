//! Coercion steps applied before constraints
//!
//! Each step turns a raw JSON value into the declared type or fails with a
//! message. Every step is stable under repetition: coercing an already
//! coerced value returns it unchanged.

use serde_json::{Number, Value};

/// Largest magnitude at which every integer is exactly representable as f64
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Returns the JSON type name for messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_mismatch(field: &str, expected: &str, value: &Value) -> String {
    format!(
        "{} must be {}, received {}",
        field,
        expected,
        json_type_name(value)
    )
}

/// Accepts only a string; trims it when `trim` is set.
pub fn coerce_string(field: &str, value: &Value, trim: bool) -> Result<String, String> {
    match value {
        Value::String(s) if trim => Ok(s.trim().to_string()),
        Value::String(s) => Ok(s.clone()),
        other => Err(type_mismatch(field, "a string", other)),
    }
}

/// Accepts a JSON number, or a numeric string when `from_string` is set.
///
/// Empty, non-numeric and non-finite strings fail; they never become zero.
pub fn coerce_number(field: &str, value: &Value, from_string: bool) -> Result<f64, String> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("{} must be a finite number", field)),
        Value::String(s) if from_string => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(format!("{} must be a number, received empty string", field));
            }
            match trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(n),
                _ => Err(format!("{} must be a number, received '{}'", field, trimmed)),
            }
        }
        other => Err(type_mismatch(field, "a number", other)),
    }
}

/// Renders a number back to JSON, as an integer when it has no fraction.
pub fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Accepts a JSON boolean, or `"true"`/`"false"` when `from_string` is set.
pub fn coerce_bool(field: &str, value: &Value, from_string: bool) -> Result<bool, String> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) if from_string => match s.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(format!("{} must be a boolean, received '{}'", field, other)),
        },
        other => Err(type_mismatch(field, "a boolean", other)),
    }
}

/// Accepts an array, or wraps a lone scalar when `wrap` is set.
///
/// Query strings carry a repeated key as an array and a single key as a
/// plain string; wrapping lets both shapes satisfy an array field.
pub fn coerce_array(field: &str, value: &Value, wrap: bool) -> Result<Vec<Value>, String> {
    match value {
        Value::Array(items) => Ok(items.clone()),
        Value::String(_) | Value::Number(_) | Value::Bool(_) if wrap => Ok(vec![value.clone()]),
        other => Err(type_mismatch(field, "an array", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_trim_is_observable() {
        assert_eq!(coerce_string("name", &json!("  Asha "), true).unwrap(), "Asha");
        assert_eq!(coerce_string("name", &json!("  Asha "), false).unwrap(), "  Asha ");
        let err = coerce_string("name", &json!(42), true).unwrap_err();
        assert_eq!(err, "name must be a string, received number");
    }

    #[test]
    fn test_number_from_string() {
        assert_eq!(coerce_number("salary", &json!("50000"), true).unwrap(), 50000.0);
        assert_eq!(coerce_number("salary", &json!(" -5 "), true).unwrap(), -5.0);
        assert_eq!(coerce_number("salary", &json!(12.5), false).unwrap(), 12.5);
    }

    #[test]
    fn test_non_numeric_string_is_not_zero() {
        assert!(coerce_number("salary", &json!("abc"), true).is_err());
        assert!(coerce_number("salary", &json!(""), true).is_err());
        assert!(coerce_number("salary", &json!("NaN"), true).is_err());
        assert!(coerce_number("salary", &json!("inf"), true).is_err());
    }

    #[test]
    fn test_strict_number_rejects_string() {
        let err = coerce_number("salary", &json!("50000"), false).unwrap_err();
        assert_eq!(err, "salary must be a number, received string");
    }

    #[test]
    fn test_number_value_prefers_integers() {
        assert_eq!(number_value(50000.0), json!(50000));
        assert_eq!(number_value(2.5), json!(2.5));
        assert!(number_value(50000.0).is_i64());
    }

    #[test]
    fn test_bool_from_string() {
        assert!(coerce_bool("flag", &json!("true"), true).unwrap());
        assert!(!coerce_bool("flag", &json!(false), false).unwrap());
        assert!(coerce_bool("flag", &json!("yes"), true).is_err());
        assert!(coerce_bool("flag", &json!("true"), false).is_err());
    }

    #[test]
    fn test_array_wrap() {
        assert_eq!(coerce_array("tags", &json!("a"), true).unwrap(), vec![json!("a")]);
        assert_eq!(coerce_array("tags", &json!(["a", "b"]), false).unwrap().len(), 2);
        assert!(coerce_array("tags", &json!("a"), false).is_err());
        assert!(coerce_array("tags", &json!({}), true).is_err());
    }
}
