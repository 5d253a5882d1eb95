//! Driven port for batched student lookups.

use async_trait::async_trait;

use crate::domain::{Student, StudentId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by student directory adapters.
    pub enum StudentDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } =>
            "student directory connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } =>
            "student directory query failed: {message}",
    }
}

/// Read access to student accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    /// Fetch every listed student that exists, in one round trip.
    ///
    /// Unknown ids are silently absent from the result; callers decide what a
    /// gap means.
    async fn find_by_ids(&self, ids: &[StudentId]) -> Result<Vec<Student>, StudentDirectoryError>;
}

/// Fixture directory that knows every student as "Fixture Student".
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStudentDirectory;

#[async_trait]
impl StudentDirectory for FixtureStudentDirectory {
    async fn find_by_ids(&self, ids: &[StudentId]) -> Result<Vec<Student>, StudentDirectoryError> {
        Ok(ids
            .iter()
            .map(|id| Student::new(*id, "Fixture Student", format!("student{id}@example.edu")))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_echoes_requested_ids() {
        let students = FixtureStudentDirectory
            .find_by_ids(&[StudentId::new(3), StudentId::new(4)])
            .await
            .expect("fixture lookup succeeds");
        let ids: Vec<i32> = students.iter().map(|s| s.id.get()).collect();
        assert_eq!(ids, [3, 4]);
    }
}
