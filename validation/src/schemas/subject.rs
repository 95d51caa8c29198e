//! Subject catalogue operations

use crate::schema::{number, string, ObjectSchema, ObjectSchemaBuilder};

use super::common::{self, object_id, presence, semester, text};

/// Highest credit weight a subject may carry
const MAX_CREDITS: f64 = 10.0;

fn fields(required: bool) -> ObjectSchemaBuilder {
    ObjectSchema::builder()
        .field("name", presence(text(100), required))
        .field("code", presence(string().trim().min_len(2).max_len(10), required))
        .field("branch", presence(object_id(), required))
        .field("semester", presence(semester(), required))
        .field(
            "credits",
            presence(
                number().coerce().integer().positive().max(MAX_CREDITS),
                required,
            ),
        )
}

endpoint_schemas! {
    CREATE => common::create("subject.create", fields(true));
    UPDATE => common::update("subject.update", fields(false));
    DELETE => common::delete("subject.delete");
}
