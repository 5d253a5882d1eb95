//! Builders for HTTP state ports.

use std::sync::Arc;

use actix_web::web;

use peerbridge::domain::{
    CourseReviewService, ExperienceService, LikeLedgerService, OrphanPolicy, ResourceService,
};
use peerbridge::inbound::http::state::{HttpState, HttpStatePorts};
use peerbridge::outbound::persistence::{
    DbPool, DieselCourseReviewRepository, DieselExperienceRepository, DieselResourceRepository,
    DieselReviewLikeRepository, DieselStudentDirectory,
};

use super::ServerConfig;

/// Wire every port to its Diesel adapter.
fn diesel_ports(pool: &DbPool, orphan_policy: OrphanPolicy) -> HttpStatePorts {
    let students = Arc::new(DieselStudentDirectory::new(pool.clone()));

    let reviews = Arc::new(
        CourseReviewService::new(
            Arc::new(DieselCourseReviewRepository::new(pool.clone())),
            Arc::clone(&students),
        )
        .with_orphan_policy(orphan_policy),
    );
    let likes = Arc::new(LikeLedgerService::new(Arc::new(
        DieselReviewLikeRepository::new(pool.clone()),
    )));
    let experiences = Arc::new(
        ExperienceService::new(
            Arc::new(DieselExperienceRepository::new(pool.clone())),
            students,
        )
        .with_orphan_policy(orphan_policy),
    );
    let resources = Arc::new(ResourceService::new(Arc::new(
        DieselResourceRepository::new(pool.clone()),
    )));

    HttpStatePorts {
        reviews: reviews.clone(),
        review_commands: reviews,
        likes: likes.clone(),
        like_status: likes,
        experiences: experiences.clone(),
        experience_commands: experiences,
        resources: resources.clone(),
        resource_commands: resources,
    }
}

/// Build handler state, falling back to fixture ports without a pool.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => diesel_ports(pool, config.orphan_policy),
        None => HttpStatePorts::default(),
    };
    web::Data::new(HttpState::new(ports, config.admin))
}
