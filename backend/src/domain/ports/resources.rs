//! Driving ports for learning resources.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::Paginated;

use crate::domain::listing::{ListRequest, ResourceSort};
use crate::domain::{Error, Resource, ResourceDraft, ResourceExtensionDraft, ResourceId};

/// Resource listing use cases.
#[async_trait]
pub trait ResourceQuery: Send + Sync {
    /// Filtered, sorted page of resources.
    async fn list(&self, request: ListRequest<ResourceSort>) -> Result<Paginated<Resource>, Error>;

    /// Resources with the exact skill name; `NotFound` when there are none.
    async fn by_skill_name(&self, skill_name: &str) -> Result<Vec<Resource>, Error>;
}

/// Resource curation use cases. Callers enforce the admin check.
#[async_trait]
pub trait ResourceCommand: Send + Sync {
    /// Validate and store a resource.
    async fn add(&self, draft: ResourceDraft) -> Result<Resource, Error>;

    /// Append links and tags to an existing resource.
    async fn extend(&self, draft: ResourceExtensionDraft) -> Result<Resource, Error>;
}

/// Fixture with no stored resources.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureResources;

#[async_trait]
impl ResourceQuery for FixtureResources {
    async fn list(&self, request: ListRequest<ResourceSort>) -> Result<Paginated<Resource>, Error> {
        Ok(Paginated::new(Vec::new(), request.page, 0))
    }

    async fn by_skill_name(&self, _skill_name: &str) -> Result<Vec<Resource>, Error> {
        Err(Error::not_found("Resource not found"))
    }
}

#[async_trait]
impl ResourceCommand for FixtureResources {
    async fn add(&self, draft: ResourceDraft) -> Result<Resource, Error> {
        Ok(draft
            .validate()?
            .into_stored(ResourceId::new(1), DateTime::<Utc>::default()))
    }

    async fn extend(&self, draft: ResourceExtensionDraft) -> Result<Resource, Error> {
        draft.validate()?;
        Err(Error::not_found("Resource not found"))
    }
}
