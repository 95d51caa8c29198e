//! Schema composition model
//!
//! Schemas are plain data: a [`FieldRule`] per field, an [`ObjectSchema`]
//! per object, an [`EndpointSchema`] per API operation. The constructor
//! functions and chained methods below only fill in that data; nothing is
//! evaluated until [`crate::executor::validate`] walks the tree.
//!
//! ```ignore
//! let body = ObjectSchema::builder()
//!     .field("name", string().trim().min_len(1).max_len(100))
//!     .field("salary", number().coerce().integer().positive())
//!     .field("phone", string().trim().pattern(Pattern::Phone).optional())
//!     .build()?;
//! let schema = EndpointSchema::new("admin.register").body(body);
//! ```
//!
//! Definition mistakes (a bound on the wrong type, a refinement naming an
//! undeclared field, ...) surface from [`ObjectSchemaBuilder::build`] as a
//! [`SchemaError`], so they fail when the schema is composed rather than
//! when a request arrives.

use std::collections::HashSet;
use std::fmt;

use serde_json::{Map, Value};

use crate::enums::EnumSet;
use crate::error::{SchemaError, SchemaResult};
use crate::patterns::Pattern;

/// Predicate over a single already-valid field value
pub type FieldPredicate = fn(&Value) -> bool;

/// Predicate over a fully resolved object
pub type ObjectPredicate = fn(&Map<String, Value>) -> bool;

/// The three input sources of a request, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Params,
    Query,
    Body,
}

impl Namespace {
    pub const ALL: [Namespace; 3] = [Namespace::Params, Namespace::Query, Namespace::Body];

    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Params => "params",
            Namespace::Query => "query",
            Namespace::Body => "body",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic type of a field
#[derive(Debug, Clone)]
pub enum FieldType {
    String,
    Number,
    Boolean,
    /// String restricted to a named set of literals
    Enum(EnumSet),
    /// String that must parse as a calendar date
    Date,
    Object(ObjectSchema),
    Array(Box<FieldRule>),
}

impl FieldType {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Enum(_) => "enum",
            FieldType::Date => "date",
            FieldType::Object(_) => "object",
            FieldType::Array(_) => "array",
        }
    }

    fn is_textual(&self) -> bool {
        matches!(self, FieldType::String | FieldType::Enum(_) | FieldType::Date)
    }
}

/// Conversion applied to a raw value before any constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Strip surrounding whitespace from a string
    Trim,
    /// Numeric string to number
    ToNumber,
    /// `"true"`/`"false"` to boolean
    ToBoolean,
    /// Lone scalar to a one-element array
    WrapArray,
}

impl Coercion {
    pub fn name(&self) -> &'static str {
        match self {
            Coercion::Trim => "trim",
            Coercion::ToNumber => "number coercion",
            Coercion::ToBoolean => "boolean coercion",
            Coercion::WrapArray => "array wrapping",
        }
    }

    fn applies_to(&self, field_type: &FieldType) -> bool {
        match self {
            Coercion::Trim => field_type.is_textual(),
            Coercion::ToNumber => matches!(field_type, FieldType::Number),
            Coercion::ToBoolean => matches!(field_type, FieldType::Boolean),
            Coercion::WrapArray => matches!(field_type, FieldType::Array(_)),
        }
    }
}

/// A single check evaluated after coercion
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Characters for strings, items for arrays
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    Integer,
    /// Strictly greater than zero
    Positive,
    Pattern(Pattern),
}

impl Constraint {
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::MinLength(_) => "min length",
            Constraint::MaxLength(_) => "max length",
            Constraint::Min(_) => "minimum",
            Constraint::Max(_) => "maximum",
            Constraint::Integer => "integer",
            Constraint::Positive => "positive",
            Constraint::Pattern(_) => "pattern",
        }
    }

    fn applies_to(&self, field_type: &FieldType) -> bool {
        match self {
            Constraint::MinLength(_) | Constraint::MaxLength(_) => {
                matches!(field_type, FieldType::String | FieldType::Array(_))
            }
            Constraint::Min(_) | Constraint::Max(_) | Constraint::Integer | Constraint::Positive => {
                matches!(field_type, FieldType::Number)
            }
            Constraint::Pattern(_) => matches!(field_type, FieldType::String),
        }
    }
}

/// Custom check on one field, run after its constraints
#[derive(Clone)]
pub struct FieldRefinement {
    pub predicate: FieldPredicate,
    pub message: String,
}

impl fmt::Debug for FieldRefinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRefinement")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Whole-object rule, run only when every field of the object is valid
#[derive(Clone)]
pub enum ObjectRefinement {
    /// At least one of the listed fields holds a value
    AtLeastOneOf { fields: Vec<String>, message: String },
    Custom {
        predicate: ObjectPredicate,
        message: String,
    },
}

impl ObjectRefinement {
    pub fn message(&self) -> &str {
        match self {
            ObjectRefinement::AtLeastOneOf { message, .. } => message,
            ObjectRefinement::Custom { message, .. } => message,
        }
    }

    /// Evaluates the rule against the resolved object
    pub fn holds(&self, object: &Map<String, Value>) -> bool {
        match self {
            ObjectRefinement::AtLeastOneOf { fields, .. } => fields
                .iter()
                .any(|f| object.get(f).is_some_and(|v| !v.is_null())),
            ObjectRefinement::Custom { predicate, .. } => predicate(object),
        }
    }
}

impl fmt::Debug for ObjectRefinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectRefinement::AtLeastOneOf { fields, message } => f
                .debug_struct("AtLeastOneOf")
                .field("fields", fields)
                .field("message", message)
                .finish(),
            ObjectRefinement::Custom { message, .. } => f
                .debug_struct("Custom")
                .field("message", message)
                .finish_non_exhaustive(),
        }
    }
}

/// Everything the executor needs to know about one field
#[derive(Debug, Clone)]
pub struct FieldRule {
    field_type: FieldType,
    required: bool,
    default: Option<Value>,
    coercion: Option<Coercion>,
    constraints: Vec<Constraint>,
    refinement: Option<FieldRefinement>,
}

/// Required string field
pub fn string() -> FieldRule {
    FieldRule::new(FieldType::String)
}

/// Required number field; accepts JSON numbers only until `.coerce()`
pub fn number() -> FieldRule {
    FieldRule::new(FieldType::Number)
}

pub fn boolean() -> FieldRule {
    FieldRule::new(FieldType::Boolean)
}

/// Required string restricted to `set`
pub fn enumeration(set: EnumSet) -> FieldRule {
    FieldRule::new(FieldType::Enum(set))
}

/// Required date string, trimmed so the normalized value is the one checked
pub fn date() -> FieldRule {
    FieldRule::new(FieldType::Date).trim()
}

/// Required nested object
pub fn object(schema: ObjectSchema) -> FieldRule {
    FieldRule::new(FieldType::Object(schema))
}

/// Required array whose items all satisfy `item`
pub fn array(item: FieldRule) -> FieldRule {
    FieldRule::new(FieldType::Array(Box::new(item)))
}

impl FieldRule {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: true,
            default: None,
            coercion: None,
            constraints: Vec::new(),
            refinement: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Optional field that takes `value` when absent
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.required = false;
        self.default = Some(value.into());
        self
    }

    pub fn trim(mut self) -> Self {
        self.coercion = Some(Coercion::Trim);
        self
    }

    /// Enables the natural string coercion for the field type
    pub fn coerce(mut self) -> Self {
        self.coercion = match self.field_type {
            FieldType::Number => Some(Coercion::ToNumber),
            FieldType::Boolean => Some(Coercion::ToBoolean),
            FieldType::Array(_) => Some(Coercion::WrapArray),
            _ => Some(Coercion::Trim),
        };
        self
    }

    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn min_len(self, min: usize) -> Self {
        self.constraint(Constraint::MinLength(min))
    }

    pub fn max_len(self, max: usize) -> Self {
        self.constraint(Constraint::MaxLength(max))
    }

    pub fn min(self, min: f64) -> Self {
        self.constraint(Constraint::Min(min))
    }

    pub fn max(self, max: f64) -> Self {
        self.constraint(Constraint::Max(max))
    }

    pub fn integer(self) -> Self {
        self.constraint(Constraint::Integer)
    }

    pub fn positive(self) -> Self {
        self.constraint(Constraint::Positive)
    }

    pub fn pattern(self, pattern: Pattern) -> Self {
        self.constraint(Constraint::Pattern(pattern))
    }

    /// Pattern by table name; unknown names are a schema error
    pub fn pattern_named(self, name: &str) -> SchemaResult<Self> {
        Ok(self.pattern(Pattern::from_name(name)?))
    }

    pub fn email(self) -> Self {
        self.pattern(Pattern::Email)
    }

    pub fn refine(mut self, predicate: FieldPredicate, message: impl Into<String>) -> Self {
        self.refinement = Some(FieldRefinement {
            predicate,
            message: message.into(),
        });
        self
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Value substituted when the field is absent
    pub fn declared_default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn coercion(&self) -> Option<Coercion> {
        self.coercion
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn refinement(&self) -> Option<&FieldRefinement> {
        self.refinement.as_ref()
    }

    /// Checks the rule definition itself
    fn check(&self, name: &str) -> SchemaResult<()> {
        let incompatible = |rule: &'static str| SchemaError::IncompatibleRule {
            field: name.to_string(),
            rule,
            field_type: self.field_type.type_name(),
        };

        if let Some(coercion) = self.coercion {
            if !coercion.applies_to(&self.field_type) {
                return Err(incompatible(coercion.name()));
            }
        }

        let mut min_len = None;
        let mut max_len = None;
        let mut min = None;
        let mut max = None;
        for constraint in &self.constraints {
            if !constraint.applies_to(&self.field_type) {
                return Err(incompatible(constraint.name()));
            }
            match constraint {
                Constraint::MinLength(n) => min_len = Some(*n as f64),
                Constraint::MaxLength(n) => max_len = Some(*n as f64),
                Constraint::Min(n) => min = Some(*n),
                Constraint::Max(n) => max = Some(*n),
                _ => {}
            }
        }
        for (lo, hi) in [(min_len, max_len), (min, max)] {
            if let (Some(lo), Some(hi)) = (lo, hi) {
                if lo > hi {
                    return Err(SchemaError::InvertedBounds {
                        field: name.to_string(),
                        min: lo,
                        max: hi,
                    });
                }
            }
        }

        match &self.field_type {
            FieldType::Enum(set) if set.values().is_empty() => {
                Err(SchemaError::EmptyEnumSet(set.name().to_string()))
            }
            FieldType::Array(item) => item.check(&format!("{}[]", name)),
            _ => Ok(()),
        }
    }
}

/// Ordered field map with an optional whole-object rule
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<(String, FieldRule)>,
    refinement: Option<ObjectRefinement>,
}

impl ObjectSchema {
    pub fn builder() -> ObjectSchemaBuilder {
        ObjectSchemaBuilder::default()
    }

    /// Declared fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, rule)| rule)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn refinement(&self) -> Option<&ObjectRefinement> {
        self.refinement.as_ref()
    }
}

/// Collects fields and a refinement, checked by [`build`](Self::build)
#[derive(Debug, Default)]
pub struct ObjectSchemaBuilder {
    fields: Vec<(String, FieldRule)>,
    refinement: Option<ObjectRefinement>,
}

impl ObjectSchemaBuilder {
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.fields.push((name.into(), rule));
        self
    }

    /// Requires at least one of `fields` to be present.
    ///
    /// The names must be declared fields of this object.
    pub fn at_least_one_of(mut self, fields: &[&str], message: impl Into<String>) -> Self {
        self.refinement = Some(ObjectRefinement::AtLeastOneOf {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            message: message.into(),
        });
        self
    }

    /// Requires at least one of the fields declared so far
    pub fn at_least_one_declared(self, message: impl Into<String>) -> Self {
        let names: Vec<String> = self.fields.iter().map(|(n, _)| n.clone()).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        self.at_least_one_of(&names, message)
    }

    pub fn refine(mut self, predicate: ObjectPredicate, message: impl Into<String>) -> Self {
        self.refinement = Some(ObjectRefinement::Custom {
            predicate,
            message: message.into(),
        });
        self
    }

    pub fn build(self) -> SchemaResult<ObjectSchema> {
        let mut seen = HashSet::new();
        for (name, rule) in &self.fields {
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateField(name.clone()));
            }
            rule.check(name)?;
        }

        if let Some(ObjectRefinement::AtLeastOneOf { fields, .. }) = &self.refinement {
            if fields.is_empty() {
                return Err(SchemaError::EmptyRefinement);
            }
            if let Some(unknown) = fields.iter().find(|f| !seen.contains(f.as_str())) {
                return Err(SchemaError::UndeclaredField(unknown.clone()));
            }
        }

        Ok(ObjectSchema {
            fields: self.fields,
            refinement: self.refinement,
        })
    }
}

/// Full input contract of one API operation.
///
/// A namespace left unset places no constraint on that part of the request.
#[derive(Debug, Clone)]
pub struct EndpointSchema {
    name: String,
    params: Option<ObjectSchema>,
    query: Option<ObjectSchema>,
    body: Option<ObjectSchema>,
}

impl EndpointSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: None,
            query: None,
            body: None,
        }
    }

    pub fn params(mut self, schema: ObjectSchema) -> Self {
        self.params = Some(schema);
        self
    }

    pub fn query(mut self, schema: ObjectSchema) -> Self {
        self.query = Some(schema);
        self
    }

    pub fn body(mut self, schema: ObjectSchema) -> Self {
        self.body = Some(schema);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self, namespace: Namespace) -> Option<&ObjectSchema> {
        match namespace {
            Namespace::Params => self.params.as_ref(),
            Namespace::Query => self.query.as_ref(),
            Namespace::Body => self.body.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::GENDER;

    #[test]
    fn test_builder_keeps_declaration_order() {
        let schema = ObjectSchema::builder()
            .field("zeta", string())
            .field("alpha", number())
            .field("mid", boolean().optional())
            .build()
            .unwrap();
        let names: Vec<&str> = schema.fields().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert!(!schema.field("mid").unwrap().is_required());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = ObjectSchema::builder()
            .field("email", string())
            .field("email", string())
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateField("email".into()));
    }

    #[test]
    fn test_refinement_must_reference_declared_fields() {
        let err = ObjectSchema::builder()
            .field("name", string().optional())
            .at_least_one_of(&["name", "branch"], "At least one filter")
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::UndeclaredField("branch".into()));

        let err = ObjectSchema::builder()
            .at_least_one_of(&[], "At least one filter")
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::EmptyRefinement);
    }

    #[test]
    fn test_incompatible_constraint_rejected() {
        let err = ObjectSchema::builder()
            .field("salary", number().pattern(Pattern::Phone))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::IncompatibleRule { rule: "pattern", field_type: "number", .. }
        ));

        let err = ObjectSchema::builder()
            .field("gender", enumeration(GENDER).positive())
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::IncompatibleRule { rule: "positive", .. }));
    }

    #[test]
    fn test_incompatible_coercion_rejected() {
        let err = ObjectSchema::builder()
            .field("age", number().trim())
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::IncompatibleRule { rule: "trim", .. }));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = ObjectSchema::builder()
            .field("name", string().min_len(10).max_len(2))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvertedBounds { .. }));

        let err = ObjectSchema::builder()
            .field("semester", number().min(8.0).max(1.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvertedBounds { .. }));
    }

    #[test]
    fn test_array_item_rule_checked() {
        let err = ObjectSchema::builder()
            .field("tags", array(number().pattern(Pattern::Email)))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::IncompatibleRule { ref field, .. } if field == "tags[]"
        ));
    }

    #[test]
    fn test_unknown_pattern_name_fails_at_composition() {
        assert_eq!(
            string().pattern_named("postcode").unwrap_err(),
            SchemaError::UnknownPattern("postcode".into())
        );
        assert!(string().pattern_named("pincode").is_ok());
    }

    #[test]
    fn test_empty_enum_set_rejected() {
        const NOTHING: EnumSet = EnumSet::new("nothing", &[]);
        let err = ObjectSchema::builder()
            .field("choice", enumeration(NOTHING))
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::EmptyEnumSet("nothing".into()));
    }

    #[test]
    fn test_at_least_one_declared_snapshots_fields() {
        let schema = ObjectSchema::builder()
            .field("name", string().optional())
            .field("code", string().optional())
            .at_least_one_declared("Provide something")
            .build()
            .unwrap();
        match schema.refinement() {
            Some(ObjectRefinement::AtLeastOneOf { fields, .. }) => {
                assert_eq!(fields, &vec!["name".to_string(), "code".to_string()]);
            }
            other => panic!("unexpected refinement: {:?}", other),
        }
    }

    #[test]
    fn test_endpoint_namespaces() {
        let params = ObjectSchema::builder().field("id", string()).build().unwrap();
        let schema = EndpointSchema::new("student.delete").params(params);
        assert_eq!(schema.name(), "student.delete");
        assert!(schema.namespace(Namespace::Params).is_some());
        assert!(schema.namespace(Namespace::Query).is_none());
        assert!(schema.namespace(Namespace::Body).is_none());
    }
}
