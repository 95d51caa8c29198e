//! Faculty account operations

use crate::enums::FACULTY_DESIGNATION;
use crate::error::SchemaResult;
use crate::schema::{date, enumeration, number, EndpointSchema, ObjectSchema, ObjectSchemaBuilder};

use super::common::{self, object_id, presence, positive_int, text, SEARCH_NEEDS_FILTER};

fn record_fields(required: bool) -> SchemaResult<ObjectSchemaBuilder> {
    Ok(common::personal_fields(ObjectSchema::builder(), required)?
        .field("employeeId", presence(positive_int(), required))
        .field("designation", presence(enumeration(FACULTY_DESIGNATION), required))
        .field("branchId", presence(object_id(), required))
        .field("joiningDate", presence(date(), required))
        .field("salary", presence(positive_int(), required))
        .field("qualification", text(100).optional())
        .field("experience", number().coerce().integer().min(0.0).max(60.0).optional()))
}

fn register() -> SchemaResult<EndpointSchema> {
    common::create("faculty.register", record_fields(true)?)
}

fn update_details() -> SchemaResult<EndpointSchema> {
    common::update("faculty.update-details", record_fields(false)?)
}

fn search() -> SchemaResult<EndpointSchema> {
    let filters = ObjectSchema::builder()
        .field("employeeId", positive_int().optional())
        .field("name", text(100).optional())
        .field("branch", object_id().optional())
        .field("designation", enumeration(FACULTY_DESIGNATION).optional())
        .at_least_one_of(
            &["employeeId", "name", "branch", "designation"],
            SEARCH_NEEDS_FILTER,
        )
        .build()?;
    Ok(EndpointSchema::new("faculty.search").body(filters))
}

endpoint_schemas! {
    LOGIN => common::login("faculty.login", "employeeId", positive_int());
    REGISTER => register();
    UPDATE_DETAILS => update_details();
    FORGET_PASSWORD => common::forget_password("faculty.forget-password");
    RESET_PASSWORD => common::reset_password("faculty.reset-password");
    CHANGE_PASSWORD => common::change_password("faculty.change-password");
    DELETE => common::delete("faculty.delete");
    SEARCH => search();
}
