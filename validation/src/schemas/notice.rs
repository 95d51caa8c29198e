//! Notice board operations

use crate::enums::NOTICE_AUDIENCE;
use crate::schema::{enumeration, string, ObjectSchema, ObjectSchemaBuilder};

use super::common::{self, presence, text};

fn fields(required: bool) -> ObjectSchemaBuilder {
    ObjectSchema::builder()
        .field("title", presence(text(200), required))
        .field("description", presence(text(5000), required))
        .field("type", presence(enumeration(NOTICE_AUDIENCE), required))
        .field("link", string().trim().max_len(500).optional())
}

endpoint_schemas! {
    CREATE => common::create("notice.create", fields(true));
    UPDATE => common::update("notice.update", fields(false));
    DELETE => common::delete("notice.delete");
}
