//! Like ledger service.
//!
//! Atomicity of the flip and count recomputation is the repository's job; the
//! service only translates outcomes and failures.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{
    ReviewLikeCommand, ReviewLikeQuery, ReviewLikeRepository, ReviewLikeRepositoryError,
};
use crate::domain::{Error, LikeToggle, ReviewId, StudentId};

fn map_repository_error(err: ReviewLikeRepositoryError) -> Error {
    match err {
        ReviewLikeRepositoryError::ReviewNotFound { review_id } => {
            Error::not_found(format!("Review {review_id} not found"))
        }
        ReviewLikeRepositoryError::MissingStudent { student_id } => {
            Error::missing_related_entity("student", student_id)
        }
        ReviewLikeRepositoryError::Connection { .. } | ReviewLikeRepositoryError::Query { .. } => {
            error!(error = %err, "like ledger store failed");
            Error::store_unavailable(err.to_string())
        }
    }
}

/// Like ledger implementing both like driving ports.
#[derive(Clone)]
pub struct LikeLedgerService<R> {
    likes: Arc<R>,
}

impl<R> LikeLedgerService<R> {
    /// Create a ledger over the like repository.
    pub fn new(likes: Arc<R>) -> Self {
        Self { likes }
    }
}

#[async_trait]
impl<R> ReviewLikeCommand for LikeLedgerService<R>
where
    R: ReviewLikeRepository,
{
    async fn toggle(&self, review_id: ReviewId, student_id: StudentId) -> Result<LikeToggle, Error> {
        let outcome = self
            .likes
            .toggle(review_id, student_id)
            .await
            .map_err(map_repository_error)?;
        debug!(
            review_id = review_id.get(),
            student_id = student_id.get(),
            liked = outcome.liked,
            like_count = outcome.like_count,
            "review like toggled"
        );
        Ok(outcome)
    }
}

#[async_trait]
impl<R> ReviewLikeQuery for LikeLedgerService<R>
where
    R: ReviewLikeRepository,
{
    async fn is_liked(&self, review_id: ReviewId, student_id: StudentId) -> Result<bool, Error> {
        self.likes
            .is_liked(review_id, student_id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "like_ledger_service_tests.rs"]
mod tests;
