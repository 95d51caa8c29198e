//! Admin account operations

use crate::error::SchemaResult;
use crate::schema::{boolean, date, EndpointSchema, ObjectSchema, ObjectSchemaBuilder};

use super::common::{self, presence, positive_int, text, SEARCH_NEEDS_FILTER};

fn record_fields(required: bool) -> SchemaResult<ObjectSchemaBuilder> {
    let super_admin = if required {
        boolean().coerce().default_value(false)
    } else {
        boolean().coerce().optional()
    };

    Ok(common::personal_fields(ObjectSchema::builder(), required)?
        .field("employeeId", presence(positive_int(), required))
        .field("designation", presence(text(100), required))
        .field("joiningDate", presence(date(), required))
        .field("salary", presence(positive_int(), required))
        .field("isSuperAdmin", super_admin))
}

fn register() -> SchemaResult<EndpointSchema> {
    common::create("admin.register", record_fields(true)?)
}

fn update_details() -> SchemaResult<EndpointSchema> {
    common::update("admin.update-details", record_fields(false)?)
}

fn search() -> SchemaResult<EndpointSchema> {
    let filters = ObjectSchema::builder()
        .field("employeeId", positive_int().optional())
        .field("name", text(100).optional())
        .field("email", common::email().optional())
        .at_least_one_of(&["employeeId", "name", "email"], SEARCH_NEEDS_FILTER)
        .build()?;
    Ok(EndpointSchema::new("admin.search").body(filters))
}

endpoint_schemas! {
    LOGIN => common::login("admin.login", "email", common::email());
    REGISTER => register();
    UPDATE_DETAILS => update_details();
    FORGET_PASSWORD => common::forget_password("admin.forget-password");
    RESET_PASSWORD => common::reset_password("admin.reset-password");
    CHANGE_PASSWORD => common::change_password("admin.change-password");
    DELETE => common::delete("admin.delete");
    SEARCH => search();
}
