//! Field rules and operation shapes shared across entity domains

use serde_json::{Map, Value};

use crate::enums::{BLOOD_GROUP, GENDER};
use crate::error::SchemaResult;
use crate::patterns::Pattern;
use crate::schema::{
    date, enumeration, number, object, string, EndpointSchema, FieldRule, ObjectSchema,
    ObjectSchemaBuilder,
};

/// Maximum length for a person's name part
const MAX_NAME_LENGTH: usize = 50;
/// Maximum length for a street address
const MAX_ADDRESS_LENGTH: usize = 200;
/// Minimum length for a newly chosen password
const MIN_PASSWORD_LENGTH: usize = 8;
/// Maximum length for any password
const MAX_PASSWORD_LENGTH: usize = 64;
/// Highest semester number
const MAX_SEMESTER: f64 = 8.0;

pub(crate) const UPDATE_NEEDS_FIELD: &str = "At least one field must be provided for update";
pub(crate) const SEARCH_NEEDS_FILTER: &str = "At least one search filter must be provided";

/// Makes `rule` optional unless `required`
pub(crate) fn presence(rule: FieldRule, required: bool) -> FieldRule {
    if required {
        rule
    } else {
        rule.optional()
    }
}

pub(crate) fn object_id() -> FieldRule {
    string().trim().pattern(Pattern::ObjectId)
}

pub(crate) fn phone() -> FieldRule {
    string().trim().pattern(Pattern::Phone)
}

pub(crate) fn pincode() -> FieldRule {
    string().trim().pattern(Pattern::Pincode)
}

pub(crate) fn email() -> FieldRule {
    string().trim().email()
}

pub(crate) fn person_name() -> FieldRule {
    string().trim().min_len(1).max_len(MAX_NAME_LENGTH)
}

/// Free text between 1 and `max` characters
pub(crate) fn text(max: usize) -> FieldRule {
    string().trim().min_len(1).max_len(max)
}

/// A password being set; login only checks presence
pub(crate) fn new_password() -> FieldRule {
    string()
        .min_len(MIN_PASSWORD_LENGTH)
        .max_len(MAX_PASSWORD_LENGTH)
}

pub(crate) fn positive_int() -> FieldRule {
    number().coerce().integer().positive()
}

pub(crate) fn semester() -> FieldRule {
    number().coerce().integer().min(1.0).max(MAX_SEMESTER)
}

pub(crate) fn id_params() -> SchemaResult<ObjectSchema> {
    ObjectSchema::builder().field("id", object_id()).build()
}

fn emergency_contact() -> SchemaResult<ObjectSchema> {
    ObjectSchema::builder()
        .field("name", person_name())
        .field("relationship", text(30))
        .field("phone", phone())
        .build()
}

/// Personal details carried by admin, faculty and student records.
///
/// With `required` unset every field becomes optional and no default is
/// declared, which is the shape of an update payload.
pub(crate) fn personal_fields(
    builder: ObjectSchemaBuilder,
    required: bool,
) -> SchemaResult<ObjectSchemaBuilder> {
    let country = if required {
        text(MAX_NAME_LENGTH).default_value("India")
    } else {
        text(MAX_NAME_LENGTH).optional()
    };

    Ok(builder
        .field("firstName", presence(person_name(), required))
        .field("middleName", person_name().optional())
        .field("lastName", presence(person_name(), required))
        .field("email", presence(email(), required))
        .field("phone", presence(phone(), required))
        .field("gender", presence(enumeration(GENDER), required))
        .field("dob", presence(date(), required))
        .field("bloodGroup", enumeration(BLOOD_GROUP).optional())
        .field("address", presence(text(MAX_ADDRESS_LENGTH), required))
        .field("city", presence(text(MAX_NAME_LENGTH), required))
        .field("state", presence(text(MAX_NAME_LENGTH), required))
        .field("pincode", presence(pincode(), required))
        .field("country", country)
        .field("emergencyContact", object(emergency_contact()?).optional()))
}

fn passwords_match(body: &Map<String, Value>) -> bool {
    body.get("password") == body.get("confirmPassword")
}

fn password_changed(body: &Map<String, Value>) -> bool {
    body.get("currentPassword") != body.get("newPassword")
}

/// `identifier` + password
pub(crate) fn login(
    name: &str,
    identifier: &str,
    identifier_rule: FieldRule,
) -> SchemaResult<EndpointSchema> {
    let body = ObjectSchema::builder()
        .field(identifier, identifier_rule)
        .field("password", string().min_len(1).max_len(MAX_PASSWORD_LENGTH))
        .build()?;
    Ok(EndpointSchema::new(name).body(body))
}

pub(crate) fn forget_password(name: &str) -> SchemaResult<EndpointSchema> {
    let body = ObjectSchema::builder().field("email", email()).build()?;
    Ok(EndpointSchema::new(name).body(body))
}

/// Reset token in the path, new password twice in the body
pub(crate) fn reset_password(name: &str) -> SchemaResult<EndpointSchema> {
    let params = ObjectSchema::builder()
        .field("resetId", object_id())
        .build()?;
    let body = ObjectSchema::builder()
        .field("password", new_password())
        .field("confirmPassword", string())
        .refine(passwords_match, "Passwords do not match")
        .build()?;
    Ok(EndpointSchema::new(name).params(params).body(body))
}

pub(crate) fn change_password(name: &str) -> SchemaResult<EndpointSchema> {
    let body = ObjectSchema::builder()
        .field("currentPassword", string().min_len(1).max_len(MAX_PASSWORD_LENGTH))
        .field("newPassword", new_password())
        .refine(
            password_changed,
            "New password must be different from the current password",
        )
        .build()?;
    Ok(EndpointSchema::new(name).body(body))
}

pub(crate) fn delete(name: &str) -> SchemaResult<EndpointSchema> {
    Ok(EndpointSchema::new(name).params(id_params()?))
}

/// Record id in the path, a non-empty partial record in the body
pub(crate) fn update(name: &str, fields: ObjectSchemaBuilder) -> SchemaResult<EndpointSchema> {
    let body = fields.at_least_one_declared(UPDATE_NEEDS_FIELD).build()?;
    Ok(EndpointSchema::new(name).params(id_params()?).body(body))
}

/// Body with only `fields`
pub(crate) fn create(name: &str, fields: ObjectSchemaBuilder) -> SchemaResult<EndpointSchema> {
    Ok(EndpointSchema::new(name).body(fields.build()?))
}
