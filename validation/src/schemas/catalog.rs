//! Name-indexed registry of every endpoint schema

use lazy_static::lazy_static;
use tracing::info;

use crate::schema::EndpointSchema;

use super::{admin, branch, faculty, material, notice, student, subject, timetable};

lazy_static! {
    static ref CATALOG: Vec<&'static EndpointSchema> = vec![
        &*admin::LOGIN,
        &*admin::REGISTER,
        &*admin::UPDATE_DETAILS,
        &*admin::FORGET_PASSWORD,
        &*admin::RESET_PASSWORD,
        &*admin::CHANGE_PASSWORD,
        &*admin::DELETE,
        &*admin::SEARCH,
        &*student::LOGIN,
        &*student::REGISTER,
        &*student::UPDATE_DETAILS,
        &*student::FORGET_PASSWORD,
        &*student::RESET_PASSWORD,
        &*student::CHANGE_PASSWORD,
        &*student::DELETE,
        &*student::SEARCH,
        &*faculty::LOGIN,
        &*faculty::REGISTER,
        &*faculty::UPDATE_DETAILS,
        &*faculty::FORGET_PASSWORD,
        &*faculty::RESET_PASSWORD,
        &*faculty::CHANGE_PASSWORD,
        &*faculty::DELETE,
        &*faculty::SEARCH,
        &*branch::CREATE,
        &*branch::UPDATE,
        &*branch::DELETE,
        &*notice::CREATE,
        &*notice::UPDATE,
        &*notice::DELETE,
        &*material::CREATE,
        &*material::UPDATE,
        &*material::DELETE,
        &*material::LIST,
        &*subject::CREATE,
        &*subject::UPDATE,
        &*subject::DELETE,
        &*timetable::CREATE,
        &*timetable::UPDATE,
        &*timetable::DELETE,
    ];
}

/// Every registered schema, grouped by domain
pub fn all() -> &'static [&'static EndpointSchema] {
    &CATALOG
}

/// Looks a schema up by its dotted name, e.g. `student.register`
pub fn get(name: &str) -> Option<&'static EndpointSchema> {
    CATALOG.iter().copied().find(|schema| schema.name() == name)
}

/// Builds every schema now and returns how many there are.
///
/// Call once at startup; an invalid definition panics here instead of on
/// the first request that needs it.
pub fn verify() -> usize {
    let count = CATALOG.len();
    info!(schemas = count, "endpoint schema catalog ready");
    count
}
