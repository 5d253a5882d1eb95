//! PostgreSQL-backed interview experience repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::Paginated;

use crate::domain::listing::{ExperienceSort, ListRequest};
use crate::domain::ports::{ExperienceRepository, ExperienceRepositoryError};
use crate::domain::{Experience, NewExperience};

use super::error_mapping::{is_foreign_key_violation, map_diesel_error, map_pool_error};
use super::list_query::{EXPERIENCES, bind_params, build_list_query};
use super::models::{CountRow, ExperienceRow, NewExperienceRow};
use super::pool::{DbPool, PoolError};
use super::schema::experiences;

/// Diesel-backed implementation of [`ExperienceRepository`].
#[derive(Clone)]
pub struct DieselExperienceRepository {
    pool: DbPool,
}

impl DieselExperienceRepository {
    /// Create a repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ExperienceRepositoryError {
    map_pool_error(error, ExperienceRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> ExperienceRepositoryError {
    map_diesel_error(
        error,
        ExperienceRepositoryError::query,
        ExperienceRepositoryError::connection,
    )
}

#[async_trait]
impl ExperienceRepository for DieselExperienceRepository {
    async fn list(
        &self,
        request: &ListRequest<ExperienceSort>,
    ) -> Result<Paginated<Experience>, ExperienceRepositoryError> {
        let query = build_list_query(&EXPERIENCES, request);
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows = bind_params(query.sql, query.params)
            .load::<ExperienceRow>(&mut conn)
            .await
            .map_err(map_diesel)?;
        let count = bind_params(query.count_sql, query.count_params)
            .get_result::<CountRow>(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(Paginated::new(
            rows.into_iter().map(Experience::from).collect(),
            request.page,
            count.total,
        ))
    }

    async fn by_company(
        &self,
        company_name: &str,
    ) -> Result<Vec<Experience>, ExperienceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows = experiences::table
            .filter(experiences::company_name.eq(company_name))
            .order((experiences::created_at.desc(), experiences::id.desc()))
            .select(ExperienceRow::as_select())
            .load::<ExperienceRow>(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(Experience::from).collect())
    }

    async fn insert(
        &self,
        experience: &NewExperience,
    ) -> Result<Experience, ExperienceRepositoryError> {
        let row = NewExperienceRow::from(experience);
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::insert_into(experiences::table)
            .values(&row)
            .returning(ExperienceRow::as_returning())
            .get_result::<ExperienceRow>(&mut conn)
            .await
            .map(Experience::from)
            .map_err(|error| {
                if is_foreign_key_violation(&error) {
                    ExperienceRepositoryError::missing_student(experience.student_id.get())
                } else {
                    map_diesel(error)
                }
            })
    }
}
