//! Driven port for learning resource persistence.

use async_trait::async_trait;
use pagination::Paginated;

use crate::domain::listing::{ListRequest, ResourceSort};
use crate::domain::{NewResource, Resource, ResourceExtension};

use super::define_port_error;

define_port_error! {
    /// Errors raised by resource repositories.
    pub enum ResourceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "resource repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "resource repository query failed: {message}",
    }
}

/// Storage for learning resources.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Filtered, sorted page of resources plus the filtered total.
    async fn list(
        &self,
        request: &ListRequest<ResourceSort>,
    ) -> Result<Paginated<Resource>, ResourceRepositoryError>;

    /// Resources whose skill name matches exactly, oldest first.
    async fn by_skill_name(&self, skill_name: &str) -> Result<Vec<Resource>, ResourceRepositoryError>;

    /// Insert a validated resource and return the stored row.
    async fn insert(&self, resource: &NewResource) -> Result<Resource, ResourceRepositoryError>;

    /// Append links and tags to the oldest resource with the skill name.
    ///
    /// Returns `None` when no resource has that skill name.
    async fn extend(
        &self,
        extension: &ResourceExtension,
    ) -> Result<Option<Resource>, ResourceRepositoryError>;
}
