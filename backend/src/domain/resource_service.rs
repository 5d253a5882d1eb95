//! Learning resource services.
//!
//! Resources have no owning student, so listings skip the assembler.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Paginated;
use tracing::{error, info};

use crate::domain::listing::{ListRequest, ResourceSort};
use crate::domain::ports::{
    ResourceCommand, ResourceQuery, ResourceRepository, ResourceRepositoryError,
};
use crate::domain::{Error, Resource, ResourceDraft, ResourceExtensionDraft};

fn map_repository_error(err: ResourceRepositoryError) -> Error {
    error!(error = %err, "resource store failed");
    Error::store_unavailable(err.to_string())
}

/// Resource service implementing the resource driving ports.
#[derive(Clone)]
pub struct ResourceService<R> {
    resources: Arc<R>,
}

impl<R> ResourceService<R> {
    /// Create a service over the resource repository.
    pub fn new(resources: Arc<R>) -> Self {
        Self { resources }
    }
}

#[async_trait]
impl<R> ResourceQuery for ResourceService<R>
where
    R: ResourceRepository,
{
    async fn list(&self, request: ListRequest<ResourceSort>) -> Result<Paginated<Resource>, Error> {
        self.resources
            .list(&request)
            .await
            .map_err(map_repository_error)
    }

    async fn by_skill_name(&self, skill_name: &str) -> Result<Vec<Resource>, Error> {
        let skill = skill_name.trim();
        if skill.is_empty() {
            return Err(Error::invalid_request("Skill name is required"));
        }
        let found = self
            .resources
            .by_skill_name(skill)
            .await
            .map_err(map_repository_error)?;
        if found.is_empty() {
            return Err(Error::not_found("Resource not found"));
        }
        Ok(found)
    }
}

#[async_trait]
impl<R> ResourceCommand for ResourceService<R>
where
    R: ResourceRepository,
{
    async fn add(&self, draft: ResourceDraft) -> Result<Resource, Error> {
        let resource = draft.validate()?;
        let stored = self
            .resources
            .insert(&resource)
            .await
            .map_err(map_repository_error)?;
        info!(resource_id = stored.id.get(), skill = %stored.skill_name, "resource added");
        Ok(stored)
    }

    async fn extend(&self, draft: ResourceExtensionDraft) -> Result<Resource, Error> {
        let extension = draft.validate()?;
        self.resources
            .extend(&extension)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("Resource not found"))
    }
}
