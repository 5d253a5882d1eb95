//! Wire shapes shared by the REST handlers and the typed query layer.
//!
//! Both surfaces serialise these structs, so a review, experience or resource
//! has the same JSON form however it was fetched. Request bodies keep every
//! field optional; the domain drafts decide what is missing.

use chrono::{DateTime, Utc};
use pagination::{Paginated, Pagination};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::json_text::RawJsonText;
use crate::domain::{
    CourseReviewView, ExperienceDraft, ExperienceView, Resource, ResourceDraft,
    ResourceExtensionDraft, ReviewDraft, Student, StudentId,
};

const SUCCESS: &str = "success";

/// Pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationDto {
    /// Rows matching the filters across all pages.
    #[schema(example = 42)]
    pub total: i64,
    /// Page count at the requested limit.
    #[schema(example = 5)]
    pub pages: i64,
    /// The page served.
    #[schema(example = 1)]
    pub current: i64,
}

impl From<Pagination> for PaginationDto {
    fn from(value: Pagination) -> Self {
        Self {
            total: value.total,
            pages: value.pages,
            current: value.current,
        }
    }
}

/// Course review as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    #[schema(example = 17)]
    pub id: i32,
    #[schema(example = "Operating Systems")]
    pub course_name: String,
    #[schema(example = "CS330")]
    pub course_code: String,
    pub student_id: i32,
    #[schema(example = "Ada Lovelace")]
    pub student_name: String,
    pub review_content: String,
    #[schema(minimum = 1, maximum = 5)]
    pub rating: i32,
    pub instructor_names: Vec<String>,
    pub institution: String,
    pub semester: String,
    pub tips: Option<String>,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CourseReviewView> for ReviewDto {
    fn from(value: CourseReviewView) -> Self {
        let CourseReviewView {
            review,
            student_name,
        } = value;
        Self {
            id: review.id.get(),
            course_name: review.course_name,
            course_code: review.course_code,
            student_id: review.student_id.get(),
            student_name,
            review_content: review.review_text,
            rating: review.experience_rating,
            instructor_names: review.instructor_names,
            institution: review.institution,
            semester: review.semester,
            tips: review.tips,
            like_count: review.likes_count,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

/// Author summary attached to an experience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    pub id: i32,
    pub name: String,
    /// Year of study, when the student recorded one.
    pub year: Option<i32>,
}

impl From<Student> for StudentDto {
    fn from(value: Student) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            year: value.year,
        }
    }
}

/// Interview experience as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceDto {
    pub id: i32,
    pub student: StudentDto,
    #[schema(example = "Initech")]
    pub company_name: String,
    pub position: String,
    pub interview_type: String,
    pub interview_rounds: i32,
    /// Process length in days.
    pub duration: Option<i32>,
    pub location: String,
    pub difficulty_level: String,
    pub questions: Option<String>,
    pub narrative: Option<String>,
    pub outcome: String,
    pub feedback: Option<String>,
    pub tips: Option<String>,
    pub prep_links: Vec<String>,
    pub resources: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ExperienceView> for ExperienceDto {
    fn from(value: ExperienceView) -> Self {
        let ExperienceView {
            experience,
            student,
        } = value;
        Self {
            id: experience.id.get(),
            student: student.into(),
            company_name: experience.company_name,
            position: experience.position,
            interview_type: experience.interview_type,
            interview_rounds: experience.interview_rounds,
            duration: experience.duration,
            location: experience.location,
            difficulty_level: experience.difficulty_level,
            questions: experience.questions,
            narrative: experience.narrative,
            outcome: experience.outcome,
            feedback: experience.feedback,
            tips: experience.tips,
            prep_links: experience.prep_links,
            resources: experience.resources,
            created_at: experience.created_at,
            updated_at: experience.updated_at,
        }
    }
}

/// Learning resource as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDto {
    pub id: i32,
    #[schema(example = "python")]
    pub skill_name: String,
    pub description: String,
    pub category: String,
    pub resource_links: Vec<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Resource> for ResourceDto {
    fn from(value: Resource) -> Self {
        Self {
            id: value.id.get(),
            skill_name: value.skill_name,
            description: value.description,
            category: value.category,
            resource_links: value.resource_links,
            tags: value.tags,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Review submission body.
///
/// `instructorNames` may be a JSON array, a JSON-array string or a
/// comma-separated string.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub course_name: Option<String>,
    pub course_code: Option<String>,
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub instructor_names: Value,
    pub institution: Option<String>,
    pub semester: Option<String>,
    /// Required; must match the signed-in student.
    pub student_id: Option<i64>,
    #[serde(alias = "experienceRating")]
    pub rating: Option<i64>,
    #[serde(alias = "reviewText")]
    pub review_content: Option<String>,
    pub tips: Option<String>,
}

impl ReviewRequest {
    /// Build the draft for `author`, the validated body `studentId`.
    pub fn into_draft(self, author: StudentId) -> ReviewDraft {
        ReviewDraft {
            course_name: self.course_name,
            course_code: self.course_code,
            instructor_names: RawJsonText::from_json(self.instructor_names),
            institution: self.institution,
            semester: self.semester,
            student_id: Some(author),
            rating: self.rating,
            review_text: self.review_content,
            tips: self.tips,
        }
    }
}

/// Interview experience submission body.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceRequest {
    /// Required; must match the signed-in student.
    pub student_id: Option<i64>,
    pub company_name: Option<String>,
    pub position: Option<String>,
    pub interview_type: Option<String>,
    pub interview_rounds: Option<i64>,
    pub duration: Option<i64>,
    #[serde(alias = "interviewLocation")]
    pub location: Option<String>,
    pub difficulty_level: Option<String>,
    #[serde(alias = "interviewQuestions")]
    pub questions: Option<String>,
    #[serde(alias = "interviewExperience")]
    pub narrative: Option<String>,
    pub outcome: Option<String>,
    pub feedback: Option<String>,
    pub tips: Option<String>,
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub prep_links: Value,
    pub resources: Option<String>,
}

impl ExperienceRequest {
    /// Build the draft for `author`, the validated body `studentId`.
    pub fn into_draft(self, author: StudentId) -> ExperienceDraft {
        ExperienceDraft {
            student_id: Some(author),
            company_name: self.company_name,
            position: self.position,
            interview_type: self.interview_type,
            interview_rounds: self.interview_rounds,
            duration: self.duration,
            location: self.location,
            difficulty_level: self.difficulty_level,
            questions: self.questions,
            narrative: self.narrative,
            outcome: self.outcome,
            feedback: self.feedback,
            tips: self.tips,
            prep_links: RawJsonText::from_json(self.prep_links),
            resources: self.resources,
        }
    }
}

/// Resource submission body.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequest {
    pub skill_name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub resource_links: Value,
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub tags: Value,
}

impl From<ResourceRequest> for ResourceDraft {
    fn from(value: ResourceRequest) -> Self {
        Self {
            skill_name: value.skill_name,
            description: value.description,
            category: value.category,
            resource_links: RawJsonText::from_json(value.resource_links),
            tags: RawJsonText::from_json(value.tags),
        }
    }
}

/// Body for appending links or tags to an existing resource.
///
/// REST takes the skill name from the path; the typed query layer reads it
/// from the input.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceExtensionRequest {
    pub skill_name: Option<String>,
    pub additional_links: Option<Vec<String>>,
    pub additional_tags: Option<Vec<String>>,
}

impl From<ResourceExtensionRequest> for ResourceExtensionDraft {
    fn from(value: ResourceExtensionRequest) -> Self {
        Self {
            skill_name: value.skill_name,
            additional_links: value.additional_links,
            additional_tags: value.additional_tags,
        }
    }
}

/// Body for the like toggle.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggleRequest {
    /// Required; must match the signed-in student.
    pub student_id: Option<i64>,
}

macro_rules! list_envelope {
    ($(#[$meta:meta])* $name:ident, $item:ty) => {
        $(#[$meta])*
        #[derive(Debug, Serialize, ToSchema)]
        pub struct $name {
            #[schema(example = "success")]
            pub status: &'static str,
            pub data: Vec<$item>,
            pub pagination: PaginationDto,
        }

        impl<T: Into<$item>> From<Paginated<T>> for $name {
            fn from(value: Paginated<T>) -> Self {
                Self {
                    status: SUCCESS,
                    data: value.data.into_iter().map(Into::into).collect(),
                    pagination: value.pagination.into(),
                }
            }
        }
    };
}

macro_rules! collection_envelope {
    ($(#[$meta:meta])* $name:ident, $item:ty) => {
        $(#[$meta])*
        #[derive(Debug, Serialize, ToSchema)]
        pub struct $name {
            #[schema(example = "success")]
            pub status: &'static str,
            pub data: Vec<$item>,
        }

        impl<T: Into<$item>> From<Vec<T>> for $name {
            fn from(value: Vec<T>) -> Self {
                Self {
                    status: SUCCESS,
                    data: value.into_iter().map(Into::into).collect(),
                }
            }
        }
    };
}

list_envelope!(
    /// One page of course reviews.
    ReviewPage,
    ReviewDto
);
list_envelope!(
    /// One page of interview experiences.
    ExperiencePage,
    ExperienceDto
);
list_envelope!(
    /// One page of learning resources.
    ResourcePage,
    ResourceDto
);
collection_envelope!(
    /// Every review for one course.
    ReviewCollection,
    ReviewDto
);
collection_envelope!(
    /// Every resource recorded under one skill name.
    ResourceCollection,
    ResourceDto
);

/// Response to a review submission.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewCreated {
    #[schema(example = "Course review added successfully")]
    pub message: &'static str,
    pub data: ReviewDto,
}

impl ReviewCreated {
    pub fn new(review: CourseReviewView) -> Self {
        Self {
            message: "Course review added successfully",
            data: review.into(),
        }
    }
}

/// Response to an experience submission.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExperienceCreated {
    #[schema(example = "Experience added successfully")]
    pub message: &'static str,
    pub data: ExperienceDto,
}

impl ExperienceCreated {
    pub fn new(experience: ExperienceView) -> Self {
        Self {
            message: "Experience added successfully",
            data: experience.into(),
        }
    }
}

/// Response to a resource creation or extension.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResourceSaved {
    #[schema(example = "success")]
    pub status: &'static str,
    #[schema(example = "Resource added successfully")]
    pub message: &'static str,
    pub data: ResourceDto,
}

impl ResourceSaved {
    pub fn added(resource: Resource) -> Self {
        Self {
            status: SUCCESS,
            message: "Resource added successfully",
            data: resource.into(),
        }
    }

    pub fn updated(resource: Resource) -> Self {
        Self {
            status: SUCCESS,
            message: "Resource updated successfully",
            data: resource.into(),
        }
    }
}

/// Outcome of a like toggle.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggleResponse {
    #[schema(example = "Review liked successfully")]
    pub message: &'static str,
    pub liked: bool,
    pub like_count: i64,
}

impl From<crate::domain::LikeToggle> for LikeToggleResponse {
    fn from(value: crate::domain::LikeToggle) -> Self {
        Self {
            message: value.message(),
            liked: value.liked,
            like_count: value.like_count,
        }
    }
}

/// Whether a student has liked a review.
#[derive(Debug, Serialize, ToSchema)]
pub struct LikeStatusResponse {
    pub liked: bool,
}
