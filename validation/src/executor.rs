//! Validation executor
//!
//! Walks an [`EndpointSchema`] over a [`RequestInput`]. For every declared
//! field: presence, coercion, constraints in declaration order, nested
//! recursion, field refinement; the first failure is the only issue for
//! that field. Object refinements run once every field of the object has
//! passed. Undeclared fields are carried through untouched.
//!
//! All three namespaces are always evaluated so the caller receives the
//! complete issue list in one pass. Input problems never panic and never
//! escape as errors: they are issues.

use serde_json::{Map, Number, Value};
use tracing::{debug, trace};

use crate::coercion::{
    coerce_array, coerce_bool, coerce_number, coerce_string, json_type_name, number_value,
};
use crate::error::{Issue, ValidationResult};
use crate::input::RequestInput;
use crate::schema::{Coercion, Constraint, EndpointSchema, FieldRule, FieldType, Namespace, ObjectSchema};
use crate::validators::{
    validate_date, validate_enum, validate_integer, validate_max, validate_max_items,
    validate_max_length, validate_min, validate_min_items, validate_min_length, validate_pattern,
    validate_positive,
};

/// Validates `input` against `schema`.
///
/// Returns the normalized request when no issue was found, otherwise every
/// issue in params → query → body order. A partially normalized request is
/// never returned.
pub fn validate(schema: &EndpointSchema, input: &RequestInput) -> ValidationResult {
    let mut issues = Vec::new();
    let mut output = input.clone();

    for namespace in Namespace::ALL {
        let Some(object_schema) = schema.namespace(namespace) else {
            continue;
        };
        let path = namespace.as_str();
        match namespace {
            Namespace::Params => {
                output.params = validate_object(object_schema, &input.params, path, &mut issues);
            }
            Namespace::Query => {
                output.query = validate_object(object_schema, &input.query, path, &mut issues);
            }
            Namespace::Body => match &input.body {
                Value::Object(map) => {
                    output.body =
                        Value::Object(validate_object(object_schema, map, path, &mut issues));
                }
                // No body at all: report required body fields as missing
                Value::Null => {
                    output.body = Value::Object(validate_object(
                        object_schema,
                        &Map::new(),
                        path,
                        &mut issues,
                    ));
                }
                other => issues.push(Issue::coercion(
                    path,
                    format!("body must be an object, received {}", json_type_name(other)),
                )),
            },
        }
    }

    if issues.is_empty() {
        trace!(endpoint = schema.name(), "request validated");
        Ok(output)
    } else {
        debug!(
            endpoint = schema.name(),
            issues = issues.len(),
            first = %issues[0],
            "request failed validation"
        );
        Err(issues)
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    format!("{}.{}", prefix, field)
}

/// Validates one object level and returns its resolved form.
///
/// The returned map is only meaningful when no issue was added.
fn validate_object(
    schema: &ObjectSchema,
    input: &Map<String, Value>,
    path: &str,
    issues: &mut Vec<Issue>,
) -> Map<String, Value> {
    let before = issues.len();
    let mut resolved = input.clone();

    for (name, rule) in schema.fields() {
        let field_path = join_path(path, name);
        // null is treated the same as a missing key
        match input.get(name).filter(|v| !v.is_null()) {
            Some(raw) => {
                if let Some(value) = validate_field(rule, raw, &field_path, name, issues) {
                    resolved.insert(name.to_string(), value);
                }
            }
            None => {
                resolved.remove(name);
                if let Some(default) = rule.declared_default() {
                    resolved.insert(name.to_string(), default.clone());
                } else if rule.is_required() {
                    issues.push(Issue::presence(field_path, name));
                }
            }
        }
    }

    if issues.len() == before {
        if let Some(refinement) = schema.refinement() {
            if !refinement.holds(&resolved) {
                issues.push(Issue::refinement(path, refinement.message()));
            }
        }
    }

    resolved
}

/// Validates a present value; `None` means an issue was recorded.
fn validate_field(
    rule: &FieldRule,
    raw: &Value,
    path: &str,
    label: &str,
    issues: &mut Vec<Issue>,
) -> Option<Value> {
    let value = match coerce(rule, raw, label) {
        Ok(value) => value,
        Err(message) => {
            issues.push(Issue::coercion(path, message));
            return None;
        }
    };

    if let Err(message) = check_constraints(rule, &value, label) {
        issues.push(Issue::constraint(path, message));
        return None;
    }

    let value = match (rule.field_type(), value) {
        (FieldType::Object(child), Value::Object(map)) => {
            let before = issues.len();
            let resolved = validate_object(child, &map, path, issues);
            if issues.len() > before {
                return None;
            }
            Value::Object(resolved)
        }
        (FieldType::Array(item), Value::Array(items)) => {
            let before = issues.len();
            let mut resolved = Vec::with_capacity(items.len());
            for (i, raw_item) in items.iter().enumerate() {
                let item_path = format!("{}[{}]", path, i);
                let item_label = format!("{}[{}]", label, i);
                if let Some(v) = validate_field(item, raw_item, &item_path, &item_label, issues) {
                    resolved.push(v);
                }
            }
            if issues.len() > before {
                return None;
            }
            Value::Array(resolved)
        }
        (_, value) => value,
    };

    if let Some(refinement) = rule.refinement() {
        if !(refinement.predicate)(&value) {
            issues.push(Issue::refinement(path, refinement.message.as_str()));
            return None;
        }
    }

    Some(value)
}

fn coerce(rule: &FieldRule, raw: &Value, label: &str) -> Result<Value, String> {
    let enabled = |c: Coercion| rule.coercion() == Some(c);
    match rule.field_type() {
        FieldType::String | FieldType::Enum(_) | FieldType::Date => {
            coerce_string(label, raw, enabled(Coercion::Trim)).map(Value::String)
        }
        FieldType::Number => coerce_number(label, raw, enabled(Coercion::ToNumber)).map(number_value),
        FieldType::Boolean => coerce_bool(label, raw, enabled(Coercion::ToBoolean)).map(Value::Bool),
        FieldType::Object(_) => match raw {
            Value::Object(_) => Ok(raw.clone()),
            other => Err(format!(
                "{} must be an object, received {}",
                label,
                json_type_name(other)
            )),
        },
        FieldType::Array(_) => {
            coerce_array(label, raw, enabled(Coercion::WrapArray)).map(Value::Array)
        }
    }
}

/// Type-implied check first (enum membership, date parseability), then the
/// declared constraints in order.
fn check_constraints(rule: &FieldRule, value: &Value, label: &str) -> Result<(), String> {
    match (rule.field_type(), value) {
        (FieldType::Enum(set), Value::String(s)) => validate_enum(label, s, set)?,
        (FieldType::Date, Value::String(s)) => validate_date(label, s)?,
        _ => {}
    }
    for constraint in rule.constraints() {
        check_constraint(constraint, value, label)?;
    }
    Ok(())
}

fn as_f64(n: &Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

fn check_constraint(constraint: &Constraint, value: &Value, label: &str) -> Result<(), String> {
    match (constraint, value) {
        (Constraint::MinLength(min), Value::String(s)) => validate_min_length(label, s, *min),
        (Constraint::MaxLength(max), Value::String(s)) => validate_max_length(label, s, *max),
        (Constraint::MinLength(min), Value::Array(items)) => {
            validate_min_items(label, items.len(), *min)
        }
        (Constraint::MaxLength(max), Value::Array(items)) => {
            validate_max_items(label, items.len(), *max)
        }
        (Constraint::Min(min), Value::Number(n)) => validate_min(label, as_f64(n), *min),
        (Constraint::Max(max), Value::Number(n)) => validate_max(label, as_f64(n), *max),
        (Constraint::Integer, Value::Number(n)) => validate_integer(label, as_f64(n)),
        (Constraint::Positive, Value::Number(n)) => validate_positive(label, as_f64(n)),
        (Constraint::Pattern(pattern), Value::String(s)) => validate_pattern(s, *pattern),
        // Type/constraint mismatches are rejected when the schema is built
        _ => Ok(()),
    }
}
