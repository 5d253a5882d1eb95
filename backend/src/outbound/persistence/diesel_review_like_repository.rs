//! PostgreSQL-backed like ledger.
//!
//! A toggle locks the review row first, so toggles on one review queue up
//! behind each other while toggles on different reviews run in parallel. The
//! like row flip and the count recomputation commit in the same transaction.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{ReviewLikeRepository, ReviewLikeRepositoryError};
use crate::domain::{LikeToggle, ReviewId, StudentId};

use super::error_mapping::{is_foreign_key_violation, map_diesel_error, map_pool_error};
use super::pool::{DbPool, PoolError};
use super::schema::{course_reviews, review_likes};

/// Diesel-backed implementation of [`ReviewLikeRepository`].
#[derive(Clone)]
pub struct DieselReviewLikeRepository {
    pool: DbPool,
}

impl DieselReviewLikeRepository {
    /// Create a ledger backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ReviewLikeRepositoryError {
    map_pool_error(error, ReviewLikeRepositoryError::connection)
}

fn map_diesel(error: DieselError, student_id: StudentId) -> ReviewLikeRepositoryError {
    if is_foreign_key_violation(&error) {
        return ReviewLikeRepositoryError::missing_student(student_id.get());
    }
    map_diesel_error(
        error,
        ReviewLikeRepositoryError::query,
        ReviewLikeRepositoryError::connection,
    )
}

#[async_trait]
impl ReviewLikeRepository for DieselReviewLikeRepository {
    async fn toggle(
        &self,
        review_id: ReviewId,
        student_id: StudentId,
    ) -> Result<LikeToggle, ReviewLikeRepositoryError> {
        let review = review_id.get();
        let student = student_id.get();
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let outcome = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move {
                    let locked = course_reviews::table
                        .find(review)
                        .select(course_reviews::id)
                        .for_update()
                        .first::<i32>(conn)
                        .await
                        .optional()?;
                    if locked.is_none() {
                        return Ok(None);
                    }

                    let removed = diesel::delete(
                        review_likes::table
                            .filter(review_likes::review_id.eq(review))
                            .filter(review_likes::student_id.eq(student)),
                    )
                    .execute(conn)
                    .await?;

                    let liked = removed == 0;
                    if liked {
                        diesel::insert_into(review_likes::table)
                            .values((
                                review_likes::review_id.eq(review),
                                review_likes::student_id.eq(student),
                            ))
                            .on_conflict_do_nothing()
                            .execute(conn)
                            .await?;
                    }

                    let like_count = review_likes::table
                        .filter(review_likes::review_id.eq(review))
                        .count()
                        .get_result::<i64>(conn)
                        .await?;

                    diesel::update(course_reviews::table.find(review))
                        .set(course_reviews::likes_count.eq(like_count))
                        .execute(conn)
                        .await?;

                    Ok(Some(LikeToggle { liked, like_count }))
                }
                .scope_boxed()
            })
            .await
            .map_err(|error| map_diesel(error, student_id))?;

        let toggle = outcome.ok_or_else(|| ReviewLikeRepositoryError::review_not_found(review))?;
        debug!(review, student, liked = toggle.liked, "like toggled");
        Ok(toggle)
    }

    async fn is_liked(
        &self,
        review_id: ReviewId,
        student_id: StudentId,
    ) -> Result<bool, ReviewLikeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::select(diesel::dsl::exists(
            review_likes::table
                .filter(review_likes::review_id.eq(review_id.get()))
                .filter(review_likes::student_id.eq(student_id.get())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(|error| map_diesel(error, student_id))
    }
}
