//! Driven port for the review like ledger.

use async_trait::async_trait;

use crate::domain::{LikeToggle, ReviewId, StudentId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by like ledger adapters.
    pub enum ReviewLikeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "review like repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "review like repository query failed: {message}",
        /// The review does not exist.
        ReviewNotFound { review_id: i32 } =>
            "review {review_id} does not exist",
        /// The liking student does not exist.
        MissingStudent { student_id: i32 } =>
            "student {student_id} does not exist",
    }
}

/// Like rows and the denormalised count on reviews.
///
/// Implementations must make [`ReviewLikeRepository::toggle`] atomic: the
/// flip and the count recomputation commit together, and concurrent toggles
/// on the same review are serialised.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewLikeRepository: Send + Sync {
    /// Flip the like and return the new state with the recomputed count.
    async fn toggle(
        &self,
        review_id: ReviewId,
        student_id: StudentId,
    ) -> Result<LikeToggle, ReviewLikeRepositoryError>;

    /// Whether the student currently likes the review.
    async fn is_liked(
        &self,
        review_id: ReviewId,
        student_id: StudentId,
    ) -> Result<bool, ReviewLikeRepositoryError>;
}
