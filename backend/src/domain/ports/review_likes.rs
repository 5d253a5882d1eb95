//! Driving ports for the like ledger.

use async_trait::async_trait;

use crate::domain::{Error, LikeToggle, ReviewId, StudentId};

/// Flip a student's like on a review.
#[async_trait]
pub trait ReviewLikeCommand: Send + Sync {
    /// Toggle and report the new state with the recomputed count.
    async fn toggle(&self, review_id: ReviewId, student_id: StudentId) -> Result<LikeToggle, Error>;
}

/// Read a student's like on a review.
#[async_trait]
pub trait ReviewLikeQuery: Send + Sync {
    /// Whether the like exists. No side effects.
    async fn is_liked(&self, review_id: ReviewId, student_id: StudentId) -> Result<bool, Error>;
}

/// Fixture ledger where every toggle lands on a single like.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReviewLikes;

#[async_trait]
impl ReviewLikeCommand for FixtureReviewLikes {
    async fn toggle(
        &self,
        _review_id: ReviewId,
        _student_id: StudentId,
    ) -> Result<LikeToggle, Error> {
        Ok(LikeToggle {
            liked: true,
            like_count: 1,
        })
    }
}

#[async_trait]
impl ReviewLikeQuery for FixtureReviewLikes {
    async fn is_liked(&self, _review_id: ReviewId, _student_id: StudentId) -> Result<bool, Error> {
        Ok(false)
    }
}
