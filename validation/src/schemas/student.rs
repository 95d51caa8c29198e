//! Student account operations

use crate::error::SchemaResult;
use crate::schema::{EndpointSchema, ObjectSchema, ObjectSchemaBuilder};

use super::common::{self, object_id, presence, positive_int, semester, text, SEARCH_NEEDS_FILTER};

fn record_fields(required: bool) -> SchemaResult<ObjectSchemaBuilder> {
    Ok(common::personal_fields(ObjectSchema::builder(), required)?
        .field("enrollmentNo", presence(positive_int(), required))
        .field("semester", presence(semester(), required))
        .field("branchId", presence(object_id(), required)))
}

fn register() -> SchemaResult<EndpointSchema> {
    common::create("student.register", record_fields(true)?)
}

fn update_details() -> SchemaResult<EndpointSchema> {
    common::update("student.update-details", record_fields(false)?)
}

/// Filters combine with AND; an empty filter object is rejected
fn search() -> SchemaResult<EndpointSchema> {
    let filters = ObjectSchema::builder()
        .field("enrollmentNo", positive_int().optional())
        .field("name", text(100).optional())
        .field("semester", semester().optional())
        .field("branch", object_id().optional())
        .at_least_one_of(
            &["enrollmentNo", "name", "semester", "branch"],
            SEARCH_NEEDS_FILTER,
        )
        .build()?;
    Ok(EndpointSchema::new("student.search").body(filters))
}

endpoint_schemas! {
    LOGIN => common::login("student.login", "enrollmentNo", positive_int());
    REGISTER => register();
    UPDATE_DETAILS => update_details();
    FORGET_PASSWORD => common::forget_password("student.forget-password");
    RESET_PASSWORD => common::reset_password("student.reset-password");
    CHANGE_PASSWORD => common::change_password("student.change-password");
    DELETE => common::delete("student.delete");
    SEARCH => search();
}
