//! Driven port for interview experience persistence.

use async_trait::async_trait;
use pagination::Paginated;

use crate::domain::listing::{ExperienceSort, ListRequest};
use crate::domain::{Experience, NewExperience};

use super::define_port_error;

define_port_error! {
    /// Errors raised by experience repositories.
    pub enum ExperienceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "experience repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "experience repository query failed: {message}",
        /// The author referenced by an insert does not exist.
        MissingStudent { student_id: i32 } =>
            "experience author {student_id} does not exist",
    }
}

/// Storage for interview experiences.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    /// Filtered, sorted page of experiences plus the filtered total.
    async fn list(
        &self,
        request: &ListRequest<ExperienceSort>,
    ) -> Result<Paginated<Experience>, ExperienceRepositoryError>;

    /// Every experience at one company, newest first.
    async fn by_company(&self, company_name: &str)
    -> Result<Vec<Experience>, ExperienceRepositoryError>;

    /// Insert a validated experience and return the stored row.
    async fn insert(
        &self,
        experience: &NewExperience,
    ) -> Result<Experience, ExperienceRepositoryError>;
}
