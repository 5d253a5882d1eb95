//! Student accounts as seen by the listing and engagement features.
//!
//! Accounts are created by the external auth service; this crate only reads
//! them to attach author names to reviews and experiences.

use super::StudentId;

/// Read model of a registered student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// Natural key shared with the auth service.
    pub id: StudentId,
    /// Display name shown next to contributions.
    pub name: String,
    /// Contact address; unique per account.
    pub email: String,
    /// Year of study, when the student supplied one.
    pub year: Option<i32>,
}

impl Student {
    /// Build a student read model.
    pub fn new(id: StudentId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            year: None,
        }
    }

    /// Attach a year of study.
    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}

/// Authenticated caller, as established by the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    student_id: StudentId,
}

impl Identity {
    /// Identity for the given student.
    pub const fn new(student_id: StudentId) -> Self {
        Self { student_id }
    }

    /// The student acting on this request.
    pub const fn student_id(self) -> StudentId {
        self.student_id
    }

    /// Whether this identity is the configured administrator.
    pub fn is_admin(self, admin: StudentId) -> bool {
        self.student_id == admin
    }
}
