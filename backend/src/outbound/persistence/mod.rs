//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain's driven ports, backed by
//! PostgreSQL through `diesel-async` and a `bb8` pool.
//!
//! - Repository implementations only translate between Diesel rows and
//!   domain types. Validation and aggregation live in the domain.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) never leave
//!   this module.
//! - Listing queries are assembled by `list_query.rs` from whitelisted
//!   identifiers and bound parameters.
//!
//! # Example
//!
//! ```ignore
//! use peerbridge::outbound::persistence::{DbPool, DieselCourseReviewRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/peerbridge")).await?;
//! let reviews = DieselCourseReviewRepository::new(pool);
//! ```

mod diesel_course_review_repository;
mod diesel_experience_repository;
mod diesel_resource_repository;
mod diesel_review_like_repository;
mod diesel_student_directory;
mod error_mapping;
mod list_query;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_course_review_repository::DieselCourseReviewRepository;
pub use diesel_experience_repository::DieselExperienceRepository;
pub use diesel_resource_repository::DieselResourceRepository;
pub use diesel_review_like_repository::DieselReviewLikeRepository;
pub use diesel_student_directory::DieselStudentDirectory;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
