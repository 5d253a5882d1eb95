//! Learning resource handlers.
//!
//! Reads are public; creating and extending resources is reserved for the
//! configured administrator.
//!
//! ```text
//! GET  /api/v1/resources?category=Programming
//! GET  /api/v1/resources/{skillName}
//! POST /api/v1/resources
//! PUT  /api/v1/resources/{skillName} {"additionalLinks":["https://..."]}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::listing::{ListRequest, RawListParams, ResourceSort};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    ResourceCollection, ResourceExtensionRequest, ResourcePage, ResourceRequest, ResourceSaved,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Resource listing query; every value is read as text and coerced leniently.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ResourceListParams {
    /// Exact category filter.
    pub category: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    /// `createdAt`, `updatedAt` or `skillName`.
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    /// Case-insensitive match on the skill name.
    pub search: Option<String>,
}

impl ResourceListParams {
    fn to_request(&self) -> ListRequest<ResourceSort> {
        ListRequest::from_raw(RawListParams {
            filter: self.category.as_deref(),
            search: self.search.as_deref(),
            sort_by: self.sort_by.as_deref(),
            sort_order: self.sort_order.as_deref(),
            page: self.page.as_deref(),
            limit: self.limit.as_deref(),
        })
    }
}

/// List learning resources.
#[utoipa::path(
    get,
    path = "/api/v1/resources",
    params(ResourceListParams),
    responses(
        (status = 200, description = "Page of resources", body = ResourcePage),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["resources"],
    operation_id = "listResources",
    security([])
)]
#[get("/resources")]
pub async fn list_resources(
    state: web::Data<HttpState>,
    params: web::Query<ResourceListParams>,
) -> ApiResult<web::Json<ResourcePage>> {
    let page = state.resources.list(params.to_request()).await?;
    Ok(web::Json(page.into()))
}

/// Every resource recorded under a skill name.
#[utoipa::path(
    get,
    path = "/api/v1/resources/{skillName}",
    params(("skillName" = String, Path, description = "Skill name")),
    responses(
        (status = 200, description = "Resources for the skill", body = ResourceCollection),
        (status = 404, description = "Resource not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["resources"],
    operation_id = "resourcesBySkill",
    security([])
)]
#[get("/resources/{skillName}")]
pub async fn resources_by_skill(
    state: web::Data<HttpState>,
    skill_name: web::Path<String>,
) -> ApiResult<web::Json<ResourceCollection>> {
    let resources = state.resources.by_skill_name(&skill_name).await?;
    Ok(web::Json(resources.into()))
}

/// Create a resource.
#[utoipa::path(
    post,
    path = "/api/v1/resources",
    request_body = ResourceRequest,
    responses(
        (status = 201, description = "Resource stored", body = ResourceSaved),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Administrator access required", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["resources"],
    operation_id = "addResource",
    security(("SessionCookie" = []))
)]
#[post("/resources")]
pub async fn add_resource(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ResourceRequest>,
) -> ApiResult<HttpResponse> {
    session.require_admin(state.admin)?;
    let resource = state
        .resource_commands
        .add(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(ResourceSaved::added(resource)))
}

/// Append links or tags to the oldest resource with this skill name.
#[utoipa::path(
    put,
    path = "/api/v1/resources/{skillName}",
    params(("skillName" = String, Path, description = "Skill name")),
    request_body = ResourceExtensionRequest,
    responses(
        (status = 200, description = "Resource extended", body = ResourceSaved),
        (status = 400, description = "Nothing to append", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Administrator access required", body = ErrorSchema),
        (status = 404, description = "Resource not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["resources"],
    operation_id = "extendResource",
    security(("SessionCookie" = []))
)]
#[put("/resources/{skillName}")]
pub async fn extend_resource(
    state: web::Data<HttpState>,
    session: SessionContext,
    skill_name: web::Path<String>,
    payload: web::Json<ResourceExtensionRequest>,
) -> ApiResult<web::Json<ResourceSaved>> {
    session.require_admin(state.admin)?;
    let mut body = payload.into_inner();
    body.skill_name = Some(skill_name.into_inner());

    let resource = state.resource_commands.extend(body.into()).await?;
    Ok(web::Json(ResourceSaved::updated(resource)))
}
