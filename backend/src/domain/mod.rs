//! Domain primitives, ports and services.
//!
//! Purpose: hold the listing, aggregation and engagement rules independently
//! of actix and Diesel. Inbound adapters call the driving ports in
//! [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`] — transport-agnostic failures.
//! - [`json_text`] — decoding of list-valued text columns.
//! - [`listing`] — whitelisted sort keys and normalised paging.
//! - [`aggregation`] — batched owner lookup with the orphan policy.
//! - Entity modules for reviews, experiences and resources, each with a
//!   draft type whose `validate` runs before any store call.
//! - Services implementing the driving ports over the driven ones.

pub mod aggregation;
mod course_review;
mod course_review_service;
pub mod error;
mod experience;
mod experience_service;
mod ids;
pub mod json_text;
mod like_ledger_service;
pub mod listing;
pub mod ports;
mod resource;
mod resource_service;
mod student;
#[cfg(test)]
pub(crate) mod test_support;
pub mod trace_id;
mod validation;

pub use self::aggregation::OrphanPolicy;
pub use self::course_review::{
    CourseReview, CourseReviewView, LikeToggle, MAX_RATING, MIN_RATING, NewCourseReview,
    ReviewDraft,
};
pub use self::course_review_service::CourseReviewService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::experience::{Experience, ExperienceDraft, ExperienceView, NewExperience};
pub use self::experience_service::ExperienceService;
pub use self::ids::{ExperienceId, IdParseError, ResourceId, ReviewId, StudentId};
pub use self::like_ledger_service::LikeLedgerService;
pub use self::resource::{
    NewResource, Resource, ResourceDraft, ResourceExtension, ResourceExtensionDraft,
};
pub use self::resource_service::ResourceService;
pub use self::student::{Identity, Student};
pub use self::trace_id::TraceId;
pub use self::validation::ValidationError;

/// Header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
