//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Read rows derive both `Selectable` (for
//! DSL queries) and `QueryableByName` (for listing queries built as text).

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::BigInt;

use crate::domain::json_text::{decode_column, encode};
use crate::domain::{
    CourseReview, Experience, ExperienceId, NewCourseReview, NewExperience, NewResource, Resource,
    ResourceId, ReviewId, Student, StudentId,
};

use super::schema::{course_reviews, experiences, resources, users};

/// Projection of the users table without the credential hash.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub student_id: i32,
    pub name: String,
    pub email: String,
    pub year: Option<i32>,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        let student = Student::new(StudentId::new(row.student_id), row.name, row.email);
        match row.year {
            Some(year) => student.with_year(year),
            None => student,
        }
    }
}

// ---------------------------------------------------------------------------
// Course reviews
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, QueryableByName)]
#[diesel(table_name = course_reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseReviewRow {
    pub id: i32,
    pub course_name: String,
    pub course_code: String,
    pub instructor_names: Option<String>,
    pub institution: String,
    pub semester: String,
    pub student_id: i32,
    pub experience_rating: i32,
    pub review_text: String,
    pub tips: Option<String>,
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CourseReviewRow> for CourseReview {
    fn from(row: CourseReviewRow) -> Self {
        Self {
            id: ReviewId::new(row.id),
            course_name: row.course_name,
            course_code: row.course_code,
            instructor_names: decode_column(row.instructor_names.as_deref()),
            institution: row.institution,
            semester: row.semester,
            student_id: StudentId::new(row.student_id),
            experience_rating: row.experience_rating,
            review_text: row.review_text,
            tips: row.tips,
            likes_count: row.likes_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = course_reviews)]
pub(crate) struct NewCourseReviewRow<'a> {
    pub course_name: &'a str,
    pub course_code: &'a str,
    pub instructor_names: String,
    pub institution: &'a str,
    pub semester: &'a str,
    pub student_id: i32,
    pub experience_rating: i32,
    pub review_text: &'a str,
    pub tips: &'a str,
}

impl<'a> From<&'a NewCourseReview> for NewCourseReviewRow<'a> {
    fn from(review: &'a NewCourseReview) -> Self {
        Self {
            course_name: &review.course_name,
            course_code: &review.course_code,
            instructor_names: encode(&review.instructor_names),
            institution: &review.institution,
            semester: &review.semester,
            student_id: review.student_id.get(),
            experience_rating: review.experience_rating,
            review_text: &review.review_text,
            tips: &review.tips,
        }
    }
}

// ---------------------------------------------------------------------------
// Experiences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, QueryableByName)]
#[diesel(table_name = experiences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExperienceRow {
    pub id: i32,
    pub student_id: i32,
    pub company_name: String,
    pub position: String,
    pub interview_type: String,
    pub interview_rounds: i32,
    pub duration: Option<i32>,
    pub interview_location: String,
    pub difficulty_level: String,
    pub interview_questions: Option<String>,
    pub interview_experience: Option<String>,
    pub outcome: String,
    pub feedback: Option<String>,
    pub tips: Option<String>,
    pub prep_links: Option<String>,
    pub resources: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ExperienceRow> for Experience {
    fn from(row: ExperienceRow) -> Self {
        Self {
            id: ExperienceId::new(row.id),
            student_id: StudentId::new(row.student_id),
            company_name: row.company_name,
            position: row.position,
            interview_type: row.interview_type,
            interview_rounds: row.interview_rounds,
            duration: row.duration,
            location: row.interview_location,
            difficulty_level: row.difficulty_level,
            questions: row.interview_questions,
            narrative: row.interview_experience,
            outcome: row.outcome,
            feedback: row.feedback,
            tips: row.tips,
            prep_links: decode_column(row.prep_links.as_deref()),
            resources: row.resources,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = experiences)]
pub(crate) struct NewExperienceRow<'a> {
    pub student_id: i32,
    pub company_name: &'a str,
    pub position: &'a str,
    pub interview_type: &'a str,
    pub interview_rounds: i32,
    pub duration: Option<i32>,
    pub interview_location: &'a str,
    pub difficulty_level: &'a str,
    pub interview_questions: Option<&'a str>,
    pub interview_experience: Option<&'a str>,
    pub outcome: &'a str,
    pub feedback: Option<&'a str>,
    pub tips: Option<&'a str>,
    pub prep_links: String,
    pub resources: Option<&'a str>,
}

impl<'a> From<&'a NewExperience> for NewExperienceRow<'a> {
    fn from(experience: &'a NewExperience) -> Self {
        Self {
            student_id: experience.student_id.get(),
            company_name: &experience.company_name,
            position: &experience.position,
            interview_type: &experience.interview_type,
            interview_rounds: experience.interview_rounds,
            duration: experience.duration,
            interview_location: &experience.location,
            difficulty_level: &experience.difficulty_level,
            interview_questions: experience.questions.as_deref(),
            interview_experience: experience.narrative.as_deref(),
            outcome: &experience.outcome,
            feedback: experience.feedback.as_deref(),
            tips: experience.tips.as_deref(),
            prep_links: encode(&experience.prep_links),
            resources: experience.resources.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, QueryableByName)]
#[diesel(table_name = resources)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ResourceRow {
    pub id: i32,
    pub skill_name: String,
    pub description: String,
    pub category: String,
    pub resource_links: Option<String>,
    pub tags: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResourceRow> for Resource {
    fn from(row: ResourceRow) -> Self {
        Self {
            id: ResourceId::new(row.id),
            skill_name: row.skill_name,
            description: row.description,
            category: row.category,
            resource_links: decode_column(row.resource_links.as_deref()),
            tags: decode_column(row.tags.as_deref()),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = resources)]
pub(crate) struct NewResourceRow<'a> {
    pub skill_name: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub resource_links: String,
    pub tags: String,
}

impl<'a> From<&'a NewResource> for NewResourceRow<'a> {
    fn from(resource: &'a NewResource) -> Self {
        Self {
            skill_name: &resource.skill_name,
            description: &resource.description,
            category: &resource.category,
            resource_links: encode(&resource.resource_links),
            tags: encode(&resource.tags),
        }
    }
}

/// Result row of a listing count query.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub(crate) struct CountRow {
    #[diesel(sql_type = BigInt)]
    pub total: i64,
}
