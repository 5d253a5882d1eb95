//! Course review services.
//!
//! Listings go repository → assembler; submissions go validator → repository
//! → assembler so the response carries the author name like a listing row.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Paginated;
use tracing::error;

use crate::domain::aggregation::{OrphanPolicy, assemble};
use crate::domain::listing::{ListRequest, ReviewSort};
use crate::domain::ports::{
    CourseReviewCommand, CourseReviewQuery, CourseReviewRepository, CourseReviewRepositoryError,
    StudentDirectory,
};
use crate::domain::{CourseReview, CourseReviewView, Error, ReviewDraft, Student};

fn map_repository_error(err: CourseReviewRepositoryError) -> Error {
    match err {
        CourseReviewRepositoryError::MissingStudent { student_id } => {
            Error::missing_related_entity("student", student_id)
        }
        CourseReviewRepositoryError::Connection { .. } | CourseReviewRepositoryError::Query { .. } => {
            error!(error = %err, "course review store failed");
            Error::store_unavailable(err.to_string())
        }
    }
}

fn into_view((review, student): (CourseReview, Student)) -> CourseReviewView {
    CourseReviewView {
        review,
        student_name: student.name,
    }
}

/// Course review service implementing the review driving ports.
#[derive(Clone)]
pub struct CourseReviewService<R, D> {
    reviews: Arc<R>,
    students: Arc<D>,
    orphan_policy: OrphanPolicy,
}

impl<R, D> CourseReviewService<R, D> {
    /// Create a service that fails listings on orphaned rows.
    pub fn new(reviews: Arc<R>, students: Arc<D>) -> Self {
        Self {
            reviews,
            students,
            orphan_policy: OrphanPolicy::default(),
        }
    }

    /// Override the orphan policy.
    #[must_use]
    pub fn with_orphan_policy(mut self, orphan_policy: OrphanPolicy) -> Self {
        self.orphan_policy = orphan_policy;
        self
    }
}

#[async_trait]
impl<R, D> CourseReviewQuery for CourseReviewService<R, D>
where
    R: CourseReviewRepository,
    D: StudentDirectory,
{
    async fn list(
        &self,
        request: ListRequest<ReviewSort>,
    ) -> Result<Paginated<CourseReviewView>, Error> {
        let Paginated { data, pagination } = self
            .reviews
            .list(&request)
            .await
            .map_err(map_repository_error)?;

        let rows = assemble(data, self.students.as_ref(), self.orphan_policy).await?;
        Ok(Paginated {
            data: rows.into_iter().map(into_view).collect(),
            pagination,
        })
    }

    async fn for_course(&self, course_code: &str) -> Result<Vec<CourseReviewView>, Error> {
        let code = course_code.trim();
        if code.is_empty() {
            return Err(Error::invalid_request("courseCode is required"));
        }

        let rows = self
            .reviews
            .for_course(code)
            .await
            .map_err(map_repository_error)?;
        if rows.is_empty() {
            return Err(Error::not_found(format!("No course reviews found for {code}")));
        }

        let rows = assemble(rows, self.students.as_ref(), self.orphan_policy).await?;
        Ok(rows.into_iter().map(into_view).collect())
    }
}

#[async_trait]
impl<R, D> CourseReviewCommand for CourseReviewService<R, D>
where
    R: CourseReviewRepository,
    D: StudentDirectory,
{
    async fn add(&self, draft: ReviewDraft) -> Result<CourseReviewView, Error> {
        let review = draft.validate()?;
        let stored = self
            .reviews
            .insert(&review)
            .await
            .map_err(map_repository_error)?;

        let mut rows = assemble(vec![stored], self.students.as_ref(), OrphanPolicy::FailListing).await?;
        rows.pop()
            .map(into_view)
            .ok_or_else(|| Error::missing_related_entity("student", review.student_id))
    }
}

#[cfg(test)]
#[path = "course_review_service_tests.rs"]
mod tests;
