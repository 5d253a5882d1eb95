//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::StudentId;
use crate::domain::ports::{
    CourseReviewCommand, CourseReviewQuery, ExperienceCommand, ExperienceQuery,
    FixtureCourseReviewCommand, FixtureCourseReviewQuery, FixtureExperiences, FixtureResources,
    FixtureReviewLikes, ResourceCommand, ResourceQuery, ReviewLikeCommand, ReviewLikeQuery,
};

/// Default administrator account.
pub const DEFAULT_ADMIN_STUDENT_ID: StudentId = StudentId::new(1);

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub reviews: Arc<dyn CourseReviewQuery>,
    pub review_commands: Arc<dyn CourseReviewCommand>,
    pub likes: Arc<dyn ReviewLikeCommand>,
    pub like_status: Arc<dyn ReviewLikeQuery>,
    pub experiences: Arc<dyn ExperienceQuery>,
    pub experience_commands: Arc<dyn ExperienceCommand>,
    pub resources: Arc<dyn ResourceQuery>,
    pub resource_commands: Arc<dyn ResourceCommand>,
}

impl Default for HttpStatePorts {
    fn default() -> Self {
        Self {
            reviews: Arc::new(FixtureCourseReviewQuery),
            review_commands: Arc::new(FixtureCourseReviewCommand),
            likes: Arc::new(FixtureReviewLikes),
            like_status: Arc::new(FixtureReviewLikes),
            experiences: Arc::new(FixtureExperiences),
            experience_commands: Arc::new(FixtureExperiences),
            resources: Arc::new(FixtureResources),
            resource_commands: Arc::new(FixtureResources),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub reviews: Arc<dyn CourseReviewQuery>,
    pub review_commands: Arc<dyn CourseReviewCommand>,
    pub likes: Arc<dyn ReviewLikeCommand>,
    pub like_status: Arc<dyn ReviewLikeQuery>,
    pub experiences: Arc<dyn ExperienceQuery>,
    pub experience_commands: Arc<dyn ExperienceCommand>,
    pub resources: Arc<dyn ResourceQuery>,
    pub resource_commands: Arc<dyn ResourceCommand>,
    /// Student allowed to curate resources.
    pub admin: StudentId,
}

impl HttpState {
    /// Construct state from ports and the administrator account.
    pub fn new(ports: HttpStatePorts, admin: StudentId) -> Self {
        let HttpStatePorts {
            reviews,
            review_commands,
            likes,
            like_status,
            experiences,
            experience_commands,
            resources,
            resource_commands,
        } = ports;
        Self {
            reviews,
            review_commands,
            likes,
            like_status,
            experiences,
            experience_commands,
            resources,
            resource_commands,
            admin,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports, DEFAULT_ADMIN_STUDENT_ID)
    }
}

impl Default for HttpState {
    fn default() -> Self {
        HttpStatePorts::default().into()
    }
}
