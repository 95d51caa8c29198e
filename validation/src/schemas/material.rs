//! Study material operations

use crate::enums::MATERIAL_TYPE;
use crate::error::SchemaResult;
use crate::schema::{enumeration, EndpointSchema, ObjectSchema, ObjectSchemaBuilder};

use super::common::{self, object_id, presence, semester, text};

fn fields(required: bool) -> ObjectSchemaBuilder {
    ObjectSchema::builder()
        .field("title", presence(text(200), required))
        .field("subject", presence(object_id(), required))
        .field("faculty", presence(object_id(), required))
        .field("semester", presence(semester(), required))
        .field("branch", presence(object_id(), required))
        .field("type", presence(enumeration(MATERIAL_TYPE), required))
}

/// Listing filters arrive as query strings; none is mandatory
fn list() -> SchemaResult<EndpointSchema> {
    Ok(EndpointSchema::new("material.list").query(fields(false).build()?))
}

endpoint_schemas! {
    CREATE => common::create("material.create", fields(true));
    UPDATE => common::update("material.update", fields(false));
    DELETE => common::delete("material.delete");
    LIST => list();
}
