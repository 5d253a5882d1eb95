//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST route, the typed query endpoint, the
//! health probes, the shared DTO schemas and the session cookie security
//! scheme. Swagger UI serves it in debug builds; `openapi-dump` prints it for
//! external tooling.

use crate::inbound::http::dto::{
    ExperienceCreated, ExperienceDto, ExperiencePage, ExperienceRequest, LikeStatusResponse,
    LikeToggleRequest, LikeToggleResponse, PaginationDto, ResourceCollection, ResourceDto,
    ResourceExtensionRequest, ResourcePage, ResourceRequest, ResourceSaved, ReviewCollection,
    ReviewCreated, ReviewDto, ReviewPage, ReviewRequest, StudentDto,
};
use crate::inbound::http::query::{QueryData, QueryRequest, QueryResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Private session cookie issued by the campus sign-in service.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "peerbridge API",
        description = "Course reviews, interview experiences and learning resources shared between students."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::reviews::list_reviews,
        crate::inbound::http::reviews::reviews_for_course,
        crate::inbound::http::reviews::add_review,
        crate::inbound::http::reviews::toggle_like,
        crate::inbound::http::reviews::like_status,
        crate::inbound::http::experiences::list_experiences,
        crate::inbound::http::experiences::add_experience,
        crate::inbound::http::resources::list_resources,
        crate::inbound::http::resources::resources_by_skill,
        crate::inbound::http::resources::add_resource,
        crate::inbound::http::resources::extend_resource,
        crate::inbound::http::query::run_query,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        PaginationDto,
        ReviewDto,
        StudentDto,
        ExperienceDto,
        ResourceDto,
        ReviewRequest,
        ExperienceRequest,
        ResourceRequest,
        ResourceExtensionRequest,
        LikeToggleRequest,
        ReviewPage,
        ExperiencePage,
        ResourcePage,
        ReviewCollection,
        ResourceCollection,
        ReviewCreated,
        ExperienceCreated,
        ResourceSaved,
        LikeToggleResponse,
        LikeStatusResponse,
        QueryRequest,
        QueryResponse,
        QueryData,
    )),
    tags(
        (name = "reviews", description = "Course reviews and likes"),
        (name = "experiences", description = "Interview experiences"),
        (name = "resources", description = "Curated learning resources"),
        (name = "query", description = "Typed operation endpoint"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
