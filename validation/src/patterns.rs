//! Named format patterns shared by every entity schema
//!
//! All domains import from this one table so the identifier, phone and
//! postal-code formats cannot drift apart between schemas.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{SchemaError, SchemaResult};

lazy_static! {
    /// Document identifier: 24 hexadecimal characters
    static ref OBJECT_ID_REGEX: Regex = Regex::new(r"^[0-9a-fA-F]{24}$").unwrap();

    /// Phone number: exactly 10 ASCII digits
    static ref PHONE_REGEX: Regex = Regex::new(r"^[0-9]{10}$").unwrap();

    /// Indian postal code: exactly 6 ASCII digits
    static ref PINCODE_REGEX: Regex = Regex::new(r"^[0-9]{6}$").unwrap();

    /// Email address: local@domain.tld, no whitespace
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// A named format from the shared table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    ObjectId,
    Phone,
    Pincode,
    Email,
}

impl Pattern {
    pub const ALL: [Pattern; 4] = [
        Pattern::ObjectId,
        Pattern::Phone,
        Pattern::Pincode,
        Pattern::Email,
    ];

    /// Name used to reference the pattern from schema definitions
    pub fn name(&self) -> &'static str {
        match self {
            Pattern::ObjectId => "objectId",
            Pattern::Phone => "phone",
            Pattern::Pincode => "pincode",
            Pattern::Email => "email",
        }
    }

    /// Looks a pattern up by name.
    ///
    /// An unknown name is a schema-definition error.
    pub fn from_name(name: &str) -> SchemaResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == name)
            .ok_or_else(|| SchemaError::UnknownPattern(name.to_string()))
    }

    pub fn regex(&self) -> &'static Regex {
        match self {
            Pattern::ObjectId => &OBJECT_ID_REGEX,
            Pattern::Phone => &PHONE_REGEX,
            Pattern::Pincode => &PINCODE_REGEX,
            Pattern::Email => &EMAIL_REGEX,
        }
    }

    /// Fixed human-readable failure message
    pub fn message(&self) -> &'static str {
        match self {
            Pattern::ObjectId => "Invalid ID format",
            Pattern::Phone => "Phone number must be exactly 10 digits",
            Pattern::Pincode => "Pincode must be exactly 6 digits",
            Pattern::Email => "Invalid email address",
        }
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex().is_match(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id() {
        assert!(Pattern::ObjectId.is_match("65f1c2a9e4b0a1b2c3d4e5f6"));
        assert!(Pattern::ObjectId.is_match("65F1C2A9E4B0A1B2C3D4E5F6"));
        assert!(!Pattern::ObjectId.is_match("65f1c2a9e4b0a1b2c3d4e5f"));
        assert!(!Pattern::ObjectId.is_match("65f1c2a9e4b0a1b2c3d4e5fg"));
        assert!(!Pattern::ObjectId.is_match(""));
    }

    #[test]
    fn test_phone_and_pincode_reject_non_ascii_digits() {
        assert!(Pattern::Phone.is_match("9876543210"));
        assert!(!Pattern::Phone.is_match("12345"));
        assert!(!Pattern::Phone.is_match("٩٨٧٦٥٤٣٢١٠"));
        assert!(Pattern::Pincode.is_match("560001"));
        assert!(!Pattern::Pincode.is_match("56000"));
        assert!(!Pattern::Pincode.is_match("5600011"));
    }

    #[test]
    fn test_email() {
        assert!(Pattern::Email.is_match("dean@college.edu"));
        assert!(!Pattern::Email.is_match("dean@college"));
        assert!(!Pattern::Email.is_match("dean college@x.edu"));
    }

    #[test]
    fn test_lookup_by_name() {
        for pattern in Pattern::ALL {
            assert_eq!(Pattern::from_name(pattern.name()), Ok(pattern));
        }
        assert_eq!(
            Pattern::from_name("zipcode"),
            Err(SchemaError::UnknownPattern("zipcode".into()))
        );
    }
}
