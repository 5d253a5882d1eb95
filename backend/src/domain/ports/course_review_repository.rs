//! Driven port for course review persistence.

use async_trait::async_trait;
use pagination::Paginated;

use crate::domain::listing::{ListRequest, ReviewSort};
use crate::domain::{CourseReview, NewCourseReview};

use super::define_port_error;

define_port_error! {
    /// Errors raised by course review repositories.
    pub enum CourseReviewRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "course review repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "course review repository query failed: {message}",
        /// The author referenced by an insert does not exist.
        MissingStudent { student_id: i32 } =>
            "course review author {student_id} does not exist",
    }
}

/// Storage for course reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseReviewRepository: Send + Sync {
    /// Filtered, sorted page of reviews plus the filtered total.
    async fn list(
        &self,
        request: &ListRequest<ReviewSort>,
    ) -> Result<Paginated<CourseReview>, CourseReviewRepositoryError>;

    /// Every review for one course code, newest first.
    async fn for_course(
        &self,
        course_code: &str,
    ) -> Result<Vec<CourseReview>, CourseReviewRepositoryError>;

    /// Insert a validated review and return the stored row.
    async fn insert(
        &self,
        review: &NewCourseReview,
    ) -> Result<CourseReview, CourseReviewRepositoryError>;
}
