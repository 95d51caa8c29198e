//! Endpoint schemas for every API operation, grouped by entity domain
//!
//! Each domain module exposes one named, lazily built, immutable
//! [`EndpointSchema`](crate::schema::EndpointSchema) per operation.
//! [`catalog::verify`] forces all of them at process start so a broken
//! definition stops the service before it takes traffic.

/// Declares `pub static` endpoint schemas built from `SchemaResult`
/// expressions; a definition error panics on first access.
macro_rules! endpoint_schemas {
    ($($(#[$meta:meta])* $name:ident => $build:expr;)+) => {
        ::lazy_static::lazy_static! {
            $(
                $(#[$meta])*
                pub static ref $name: $crate::schema::EndpointSchema = match $build {
                    Ok(schema) => schema,
                    Err(err) => panic!("invalid {} schema: {}", stringify!($name), err),
                };
            )+
        }
    };
}

mod common;

pub mod admin;
pub mod branch;
pub mod catalog;
pub mod faculty;
pub mod material;
pub mod notice;
pub mod student;
pub mod subject;
pub mod timetable;
