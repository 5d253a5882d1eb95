//! Driving ports for course review reads and submissions.
//!
//! Both the REST handlers and the typed query endpoint call these traits, so
//! the two surfaces always return the same shapes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::Paginated;

use crate::domain::listing::{ListRequest, ReviewSort};
use crate::domain::{CourseReviewView, Error, ReviewDraft, ReviewId};

/// Review listing use cases.
#[async_trait]
pub trait CourseReviewQuery: Send + Sync {
    /// Filtered, sorted page of reviews with author names.
    async fn list(
        &self,
        request: ListRequest<ReviewSort>,
    ) -> Result<Paginated<CourseReviewView>, Error>;

    /// All reviews for one course; `NotFound` when there are none.
    async fn for_course(&self, course_code: &str) -> Result<Vec<CourseReviewView>, Error>;
}

/// Review submission use case.
#[async_trait]
pub trait CourseReviewCommand: Send + Sync {
    /// Validate and store a review; the result has no likes yet.
    async fn add(&self, draft: ReviewDraft) -> Result<CourseReviewView, Error>;
}

/// Fixture query with no stored reviews.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseReviewQuery;

#[async_trait]
impl CourseReviewQuery for FixtureCourseReviewQuery {
    async fn list(
        &self,
        request: ListRequest<ReviewSort>,
    ) -> Result<Paginated<CourseReviewView>, Error> {
        Ok(Paginated::new(Vec::new(), request.page, 0))
    }

    async fn for_course(&self, course_code: &str) -> Result<Vec<CourseReviewView>, Error> {
        Err(Error::not_found(format!(
            "No course reviews found for {course_code}"
        )))
    }
}

/// Fixture command that validates and echoes the review back.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseReviewCommand;

#[async_trait]
impl CourseReviewCommand for FixtureCourseReviewCommand {
    async fn add(&self, draft: ReviewDraft) -> Result<CourseReviewView, Error> {
        let review = draft
            .validate()?
            .into_stored(ReviewId::new(1), DateTime::<Utc>::default());
        Ok(CourseReviewView {
            review,
            student_name: "Fixture Student".to_owned(),
        })
    }
}
