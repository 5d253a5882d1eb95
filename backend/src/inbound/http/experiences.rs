//! Interview experience handlers.
//!
//! ```text
//! GET  /api/v1/experiences?companyName=Initech&sortBy=interviewRounds
//! POST /api/v1/experiences
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::listing::{ExperienceSort, ListRequest, RawListParams};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{ExperienceCreated, ExperiencePage, ExperienceRequest};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::{SessionContext, ensure_acting_as};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_student_id;

/// Experience listing query; every value is read as text and coerced leniently.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ExperienceListParams {
    /// Exact company name filter.
    pub company_name: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    /// `createdAt`, `updatedAt`, `interviewRounds` or `companyName`.
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    /// Case-insensitive match on company name or position.
    pub search: Option<String>,
}

impl ExperienceListParams {
    fn to_request(&self) -> ListRequest<ExperienceSort> {
        ListRequest::from_raw(RawListParams {
            filter: self.company_name.as_deref(),
            search: self.search.as_deref(),
            sort_by: self.sort_by.as_deref(),
            sort_order: self.sort_order.as_deref(),
            page: self.page.as_deref(),
            limit: self.limit.as_deref(),
        })
    }
}

/// List interview experiences with their authors.
#[utoipa::path(
    get,
    path = "/api/v1/experiences",
    params(ExperienceListParams),
    responses(
        (status = 200, description = "Page of experiences", body = ExperiencePage),
        (status = 422, description = "An experience references a missing student", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["experiences"],
    operation_id = "listExperiences",
    security([])
)]
#[get("/experiences")]
pub async fn list_experiences(
    state: web::Data<HttpState>,
    params: web::Query<ExperienceListParams>,
) -> ApiResult<web::Json<ExperiencePage>> {
    let page = state.experiences.list(params.to_request()).await?;
    Ok(web::Json(page.into()))
}

/// Share an interview experience as the signed-in student.
#[utoipa::path(
    post,
    path = "/api/v1/experiences",
    request_body = ExperienceRequest,
    responses(
        (status = 201, description = "Experience stored", body = ExperienceCreated),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "studentId names another student", body = ErrorSchema),
        (status = 422, description = "Unknown student", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["experiences"],
    operation_id = "addExperience",
    security(("SessionCookie" = []))
)]
#[post("/experiences")]
pub async fn add_experience(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ExperienceRequest>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_identity()?;
    let body = payload.into_inner();
    let author = parse_student_id(body.student_id)?;
    ensure_acting_as(identity, author)?;

    let experience = state.experience_commands.add(body.into_draft(author)).await?;
    Ok(HttpResponse::Created().json(ExperienceCreated::new(experience)))
}
