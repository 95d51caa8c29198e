//! Branch (department) operations

use crate::schema::{string, ObjectSchema, ObjectSchemaBuilder};

use super::common::{self, presence, text};

fn fields(required: bool) -> ObjectSchemaBuilder {
    ObjectSchema::builder()
        .field("branchId", presence(string().trim().min_len(2).max_len(10), required))
        .field("name", presence(text(100), required))
}

endpoint_schemas! {
    CREATE => common::create("branch.create", fields(true));
    UPDATE => common::update("branch.update", fields(false));
    DELETE => common::delete("branch.delete");
}
