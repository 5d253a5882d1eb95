//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`StudentDirectory`]) are implemented by
//! outbound adapters and report their own error enums. Driving ports
//! (`*Query`, `*Command`) are what inbound adapters call; they speak the
//! domain [`Error`](crate::domain::Error). Each driving port ships a
//! `Fixture*` implementation for handler tests and database-less startup.

mod macros;
pub(crate) use macros::define_port_error;

mod course_review_repository;
mod course_reviews;
mod experience_repository;
mod experiences;
mod resource_repository;
mod resources;
mod review_like_repository;
mod review_likes;
mod student_directory;

#[cfg(test)]
pub use course_review_repository::MockCourseReviewRepository;
pub use course_review_repository::{CourseReviewRepository, CourseReviewRepositoryError};
pub use course_reviews::{
    CourseReviewCommand, CourseReviewQuery, FixtureCourseReviewCommand, FixtureCourseReviewQuery,
};
#[cfg(test)]
pub use experience_repository::MockExperienceRepository;
pub use experience_repository::{ExperienceRepository, ExperienceRepositoryError};
pub use experiences::{ExperienceCommand, ExperienceQuery, FixtureExperiences};
#[cfg(test)]
pub use resource_repository::MockResourceRepository;
pub use resource_repository::{ResourceRepository, ResourceRepositoryError};
pub use resources::{FixtureResources, ResourceCommand, ResourceQuery};
#[cfg(test)]
pub use review_like_repository::MockReviewLikeRepository;
pub use review_like_repository::{ReviewLikeRepository, ReviewLikeRepositoryError};
pub use review_likes::{FixtureReviewLikes, ReviewLikeCommand, ReviewLikeQuery};
#[cfg(test)]
pub use student_directory::MockStudentDirectory;
pub use student_directory::{FixtureStudentDirectory, StudentDirectory, StudentDirectoryError};
