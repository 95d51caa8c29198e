//! Named enumerations of allowed literal values

use crate::error::{SchemaError, SchemaResult};

/// A finite set of allowed strings.
///
/// Membership is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumSet {
    name: &'static str,
    values: &'static [&'static str],
}

pub const GENDER: EnumSet = EnumSet::new("gender", &["male", "female", "other"]);

pub const BLOOD_GROUP: EnumSet = EnumSet::new(
    "bloodGroup",
    &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"],
);

pub const FACULTY_DESIGNATION: EnumSet = EnumSet::new(
    "facultyDesignation",
    &[
        "Assistant Professor",
        "Associate Professor",
        "Professor",
        "Head of Department",
    ],
);

/// Audience a notice is published to
pub const NOTICE_AUDIENCE: EnumSet = EnumSet::new("noticeAudience", &["student", "faculty", "both"]);

pub const MATERIAL_TYPE: EnumSet =
    EnumSet::new("materialType", &["notes", "assignment", "syllabus", "other"]);

const REGISTRY: [EnumSet; 5] = [
    GENDER,
    BLOOD_GROUP,
    FACULTY_DESIGNATION,
    NOTICE_AUDIENCE,
    MATERIAL_TYPE,
];

impl EnumSet {
    pub const fn new(name: &'static str, values: &'static [&'static str]) -> Self {
        Self { name, values }
    }

    /// Looks up one of the shared sets by name
    pub fn from_name(name: &str) -> SchemaResult<Self> {
        REGISTRY
            .iter()
            .copied()
            .find(|set| set.name == name)
            .ok_or_else(|| SchemaError::UnknownEnumSet(name.to_string()))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn values(&self) -> &'static [&'static str] {
        self.values
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| *v == value)
    }

    /// `'a' | 'b' | 'c'`, for messages
    pub fn describe(&self) -> String {
        self.values
            .iter()
            .map(|v| format!("'{}'", v))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
