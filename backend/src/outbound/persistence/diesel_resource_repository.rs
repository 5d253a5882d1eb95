//! PostgreSQL-backed learning resource repository.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use pagination::Paginated;

use crate::domain::json_text::encode;
use crate::domain::listing::{ListRequest, ResourceSort};
use crate::domain::ports::{ResourceRepository, ResourceRepositoryError};
use crate::domain::{NewResource, Resource, ResourceExtension};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::list_query::{RESOURCES, bind_params, build_list_query};
use super::models::{CountRow, NewResourceRow, ResourceRow};
use super::pool::{DbPool, PoolError};
use super::schema::resources;

/// Diesel-backed implementation of [`ResourceRepository`].
#[derive(Clone)]
pub struct DieselResourceRepository {
    pool: DbPool,
}

impl DieselResourceRepository {
    /// Create a repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ResourceRepositoryError {
    map_pool_error(error, ResourceRepositoryError::connection)
}

fn map_diesel(error: DieselError) -> ResourceRepositoryError {
    map_diesel_error(
        error,
        ResourceRepositoryError::query,
        ResourceRepositoryError::connection,
    )
}

#[async_trait]
impl ResourceRepository for DieselResourceRepository {
    async fn list(
        &self,
        request: &ListRequest<ResourceSort>,
    ) -> Result<Paginated<Resource>, ResourceRepositoryError> {
        let query = build_list_query(&RESOURCES, request);
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows = bind_params(query.sql, query.params)
            .load::<ResourceRow>(&mut conn)
            .await
            .map_err(map_diesel)?;
        let count = bind_params(query.count_sql, query.count_params)
            .get_result::<CountRow>(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(Paginated::new(
            rows.into_iter().map(Resource::from).collect(),
            request.page,
            count.total,
        ))
    }

    async fn by_skill_name(&self, skill_name: &str) -> Result<Vec<Resource>, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows = resources::table
            .filter(resources::skill_name.eq(skill_name))
            .order(resources::id.asc())
            .select(ResourceRow::as_select())
            .load::<ResourceRow>(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(Resource::from).collect())
    }

    async fn insert(&self, resource: &NewResource) -> Result<Resource, ResourceRepositoryError> {
        let row = NewResourceRow::from(resource);
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::insert_into(resources::table)
            .values(&row)
            .returning(ResourceRow::as_returning())
            .get_result::<ResourceRow>(&mut conn)
            .await
            .map(Resource::from)
            .map_err(map_diesel)
    }

    async fn extend(
        &self,
        extension: &ResourceExtension,
    ) -> Result<Option<Resource>, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        // The row lock keeps two concurrent extensions from dropping each
        // other's additions.
        conn.transaction::<_, DieselError, _>(|conn| {
            async move {
                let current = resources::table
                    .filter(resources::skill_name.eq(&extension.skill_name))
                    .order(resources::id.asc())
                    .select(ResourceRow::as_select())
                    .for_update()
                    .first::<ResourceRow>(conn)
                    .await
                    .optional()?;
                let Some(current) = current else {
                    return Ok(None);
                };

                let id = current.id;
                let (links, tags) = Resource::from(current).extended_lists(extension);
                let updated = diesel::update(resources::table.find(id))
                    .set((
                        resources::resource_links.eq(encode(&links)),
                        resources::tags.eq(encode(&tags)),
                        resources::updated_at.eq(Utc::now()),
                    ))
                    .returning(ResourceRow::as_returning())
                    .get_result::<ResourceRow>(conn)
                    .await?;

                Ok(Some(Resource::from(updated)))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel)
    }
}
