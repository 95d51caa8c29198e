//! Timetable operations
//!
//! The timetable document itself is an uploaded file handled outside this
//! crate; only the accompanying form fields are validated here.

use crate::schema::{ObjectSchema, ObjectSchemaBuilder};

use super::common::{self, object_id, presence, semester};

fn fields(required: bool) -> ObjectSchemaBuilder {
    ObjectSchema::builder()
        .field("semester", presence(semester(), required))
        .field("branch", presence(object_id(), required))
}

endpoint_schemas! {
    CREATE => common::create("timetable.create", fields(true));
    UPDATE => common::update("timetable.update", fields(false));
    DELETE => common::delete("timetable.delete");
}
