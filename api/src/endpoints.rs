//! Marker types naming the schema a handler's input must satisfy
//!
//! ```ignore
//! use api::endpoints::student;
//! use api::extractors::ValidatedRequest;
//!
//! async fn register(req: ValidatedRequest<student::Register>) -> StatusCode {
//!     // req.body holds the normalized registration
//! }
//! ```

use campus_validation::EndpointSchema;

/// An API operation with a fixed input schema
pub trait Endpoint: Send + Sync + 'static {
    fn schema() -> &'static EndpointSchema;
}

macro_rules! endpoints {
    ($($marker:ident => $schema:path;)+) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $marker;

            impl $crate::endpoints::Endpoint for $marker {
                fn schema() -> &'static ::campus_validation::EndpointSchema {
                    &*$schema
                }
            }
        )+
    };
}

macro_rules! account_endpoints {
    ($domain:ident) => {
        pub mod $domain {
            use campus_validation::schemas::$domain;

            endpoints! {
                Login => $domain::LOGIN;
                Register => $domain::REGISTER;
                UpdateDetails => $domain::UPDATE_DETAILS;
                ForgetPassword => $domain::FORGET_PASSWORD;
                ResetPassword => $domain::RESET_PASSWORD;
                ChangePassword => $domain::CHANGE_PASSWORD;
                Delete => $domain::DELETE;
                Search => $domain::SEARCH;
            }
        }
    };
}

macro_rules! record_endpoints {
    ($domain:ident) => {
        pub mod $domain {
            use campus_validation::schemas::$domain;

            endpoints! {
                Create => $domain::CREATE;
                Update => $domain::UPDATE;
                Delete => $domain::DELETE;
            }
        }
    };
}

account_endpoints!(admin);
account_endpoints!(student);
account_endpoints!(faculty);

record_endpoints!(branch);
record_endpoints!(notice);
record_endpoints!(subject);
record_endpoints!(timetable);

pub mod material {
    use campus_validation::schemas::material;

    endpoints! {
        Create => material::CREATE;
        Update => material::UPDATE;
        Delete => material::DELETE;
        List => material::LIST;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_of<E: Endpoint>() -> &'static str {
        E::schema().name()
    }

    #[test]
    fn test_markers_resolve_to_catalog_schemas() {
        assert_eq!(name_of::<student::Register>(), "student.register");
        assert_eq!(name_of::<admin::Search>(), "admin.search");
        assert_eq!(name_of::<faculty::ResetPassword>(), "faculty.reset-password");
        assert_eq!(name_of::<timetable::Delete>(), "timetable.delete");
        assert_eq!(name_of::<material::List>(), "material.list");
    }
}
