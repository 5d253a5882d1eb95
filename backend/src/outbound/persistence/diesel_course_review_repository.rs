//! PostgreSQL-backed course review repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::Paginated;

use crate::domain::listing::{ListRequest, ReviewSort};
use crate::domain::ports::{CourseReviewRepository, CourseReviewRepositoryError};
use crate::domain::{CourseReview, NewCourseReview};

use super::error_mapping::{is_foreign_key_violation, map_diesel_error, map_pool_error};
use super::list_query::{COURSE_REVIEWS, bind_params, build_list_query};
use super::models::{CountRow, CourseReviewRow, NewCourseReviewRow};
use super::pool::{DbPool, PoolError};
use super::schema::course_reviews;

/// Diesel-backed implementation of [`CourseReviewRepository`].
#[derive(Clone)]
pub struct DieselCourseReviewRepository {
    pool: DbPool,
}

impl DieselCourseReviewRepository {
    /// Create a repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> CourseReviewRepositoryError {
    map_pool_error(error, CourseReviewRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> CourseReviewRepositoryError {
    map_diesel_error(
        error,
        CourseReviewRepositoryError::query,
        CourseReviewRepositoryError::connection,
    )
}

#[async_trait]
impl CourseReviewRepository for DieselCourseReviewRepository {
    async fn list(
        &self,
        request: &ListRequest<ReviewSort>,
    ) -> Result<Paginated<CourseReview>, CourseReviewRepositoryError> {
        let query = build_list_query(&COURSE_REVIEWS, request);
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows = bind_params(query.sql, query.params)
            .load::<CourseReviewRow>(&mut conn)
            .await
            .map_err(map_diesel)?;
        let count = bind_params(query.count_sql, query.count_params)
            .get_result::<CountRow>(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(Paginated::new(
            rows.into_iter().map(CourseReview::from).collect(),
            request.page,
            count.total,
        ))
    }

    async fn for_course(
        &self,
        course_code: &str,
    ) -> Result<Vec<CourseReview>, CourseReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows = course_reviews::table
            .filter(course_reviews::course_code.eq(course_code))
            .order((course_reviews::created_at.desc(), course_reviews::id.desc()))
            .select(CourseReviewRow::as_select())
            .load::<CourseReviewRow>(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(CourseReview::from).collect())
    }

    async fn insert(
        &self,
        review: &NewCourseReview,
    ) -> Result<CourseReview, CourseReviewRepositoryError> {
        let row = NewCourseReviewRow::from(review);
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::insert_into(course_reviews::table)
            .values(&row)
            .returning(CourseReviewRow::as_returning())
            .get_result::<CourseReviewRow>(&mut conn)
            .await
            .map(CourseReview::from)
            .map_err(|error| {
                if is_foreign_key_violation(&error) {
                    CourseReviewRepositoryError::missing_student(review.student_id.get())
                } else {
                    map_diesel(error)
                }
            })
    }
}
