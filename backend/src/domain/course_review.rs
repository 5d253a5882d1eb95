//! Course reviews and their submission drafts.

use chrono::{DateTime, Utc};

use super::json_text::RawJsonText;
use super::validation::{ValidationError, in_range, optional_text, required, required_list, required_text};
use super::{ReviewId, StudentId};

/// Lowest accepted star rating.
pub const MIN_RATING: i64 = 1;
/// Highest accepted star rating.
pub const MAX_RATING: i64 = 5;

/// Stored course review with decoded list fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseReview {
    /// Surrogate key.
    pub id: ReviewId,
    /// Course title.
    pub course_name: String,
    /// Institution course code, e.g. `CS101`.
    pub course_code: String,
    /// Instructors, in submission order.
    pub instructor_names: Vec<String>,
    /// Institution offering the course.
    pub institution: String,
    /// Semester the course was taken.
    pub semester: String,
    /// Author.
    pub student_id: StudentId,
    /// Rating within `[MIN_RATING, MAX_RATING]`.
    pub experience_rating: i32,
    /// Review body.
    pub review_text: String,
    /// Optional advice for future students.
    pub tips: Option<String>,
    /// Denormalised like count kept in step with the like ledger.
    pub likes_count: i64,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Last edit time.
    pub updated_at: DateTime<Utc>,
}

/// A review joined with its author's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseReviewView {
    /// The stored review.
    pub review: CourseReview,
    /// Author display name.
    pub student_name: String,
}

/// Unvalidated review submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    /// Course title.
    pub course_name: Option<String>,
    /// Course code.
    pub course_code: Option<String>,
    /// Instructors in any accepted list encoding.
    pub instructor_names: RawJsonText,
    /// Institution.
    pub institution: Option<String>,
    /// Semester.
    pub semester: Option<String>,
    /// Claimed author.
    pub student_id: Option<StudentId>,
    /// Star rating.
    pub rating: Option<i64>,
    /// Review body.
    pub review_text: Option<String>,
    /// Optional advice.
    pub tips: Option<String>,
}

/// Review that passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourseReview {
    /// Course title.
    pub course_name: String,
    /// Course code.
    pub course_code: String,
    /// Instructors, at least one.
    pub instructor_names: Vec<String>,
    /// Institution.
    pub institution: String,
    /// Semester.
    pub semester: String,
    /// Author.
    pub student_id: StudentId,
    /// Rating within bounds.
    pub experience_rating: i32,
    /// Review body.
    pub review_text: String,
    /// Advice, stored as an empty string when absent.
    pub tips: String,
}

impl ReviewDraft {
    /// Check required fields in submission order, then the rating range.
    ///
    /// ```
    /// use peerbridge::domain::{ReviewDraft, StudentId, ValidationError};
    ///
    /// let draft = ReviewDraft {
    ///     course_name: Some("Algorithms".into()),
    ///     ..ReviewDraft::default()
    /// };
    /// assert_eq!(
    ///     draft.validate(),
    ///     Err(ValidationError::MissingField { field: "courseCode" })
    /// );
    /// ```
    pub fn validate(self) -> Result<NewCourseReview, ValidationError> {
        let course_name = required_text("courseName", self.course_name)?;
        let course_code = required_text("courseCode", self.course_code)?;
        let instructor_names = required_list("instructorNames", self.instructor_names)?;
        let institution = required_text("institution", self.institution)?;
        let semester = required_text("semester", self.semester)?;
        let student_id = required("studentId", self.student_id)?;
        let rating = required("rating", self.rating)?;
        let review_text = required_text("reviewContent", self.review_text)?;
        let experience_rating = in_range("rating", rating, MIN_RATING, MAX_RATING)?;

        Ok(NewCourseReview {
            course_name,
            course_code,
            instructor_names,
            institution,
            semester,
            student_id,
            experience_rating,
            review_text,
            tips: optional_text(self.tips).unwrap_or_default(),
        })
    }
}

impl NewCourseReview {
    /// Stored form after the store assigned `id` at `at`, with no likes yet.
    pub fn into_stored(self, id: ReviewId, at: DateTime<Utc>) -> CourseReview {
        CourseReview {
            id,
            course_name: self.course_name,
            course_code: self.course_code,
            instructor_names: self.instructor_names,
            institution: self.institution,
            semester: self.semester,
            student_id: self.student_id,
            experience_rating: self.experience_rating,
            review_text: self.review_text,
            tips: Some(self.tips),
            likes_count: 0,
            created_at: at,
            updated_at: at,
        }
    }
}

/// Outcome of flipping a like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeToggle {
    /// Whether the student now likes the review.
    pub liked: bool,
    /// Like count recomputed after the flip.
    pub like_count: i64,
}

impl LikeToggle {
    /// Client-facing confirmation message.
    pub fn message(self) -> &'static str {
        if self.liked {
            "Review liked successfully"
        } else {
            "Review unliked successfully"
        }
    }
}
