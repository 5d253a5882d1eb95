//! Typed query layer.
//!
//! A single `POST /api/v1/query` endpoint takes a named operation with JSON
//! variables and dispatches it to the same driving ports as the REST
//! handlers, so both surfaces return identical DTOs and error envelopes.
//!
//! ```text
//! POST /api/v1/query {"operation":"courseDetails","variables":{"courseCode":"CS330"}}
//! POST /api/v1/query {"operation":"allCourses","variables":{"page":"2","limit":5}}
//! ```

use actix_web::{post, web};
use pagination::PageRequest;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::listing::{
    ExperienceSort, ListRequest, ResourceSort, ReviewSort, SortDirection,
};
use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    ExperienceDto, ExperienceRequest, ResourceDto, ResourceExtensionRequest, ResourceRequest,
    ReviewDto, ReviewRequest,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::{SessionContext, ensure_acting_as};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_student_id};

/// Operation envelope.
#[derive(Debug, Deserialize, ToSchema)]
pub struct QueryRequest {
    /// Operation name such as `courseDetails` or `addSkill`.
    #[schema(example = "courseDetails")]
    pub operation: String,
    /// Operation variables; may be omitted for operations without any.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub variables: Value,
}

/// Operation result, shaped like the matching REST payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum QueryData {
    Reviews(Vec<ReviewDto>),
    Review(ReviewDto),
    Experiences(Vec<ExperienceDto>),
    Experience(ExperienceDto),
    Resources(Vec<ResourceDto>),
    Resource(ResourceDto),
}

/// Successful operation response.
#[derive(Debug, Serialize, ToSchema)]
pub struct QueryResponse {
    pub data: QueryData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CourseVariables {
    course_code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompanyVariables {
    company_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SkillVariables {
    skill_name: Option<String>,
}

/// Paging values may arrive as numbers or numeric strings.
#[derive(Debug, Default, Deserialize)]
struct PageVariables {
    page: Option<Value>,
    limit: Option<Value>,
}

impl PageVariables {
    fn page_request(&self) -> PageRequest {
        PageRequest::new(lenient_int(self.page.as_ref()), lenient_int(self.limit.as_ref()))
    }
}

#[derive(Debug, Deserialize)]
struct InputVariables<T> {
    input: T,
}

#[derive(Debug)]
enum Operation {
    CourseDetails(CourseVariables),
    AllCourses(PageVariables),
    ExperienceByCompany(CompanyVariables),
    Experiences(PageVariables),
    Resource(SkillVariables),
    Resources(PageVariables),
    AddCourse(ReviewRequest),
    AddExperience(ExperienceRequest),
    AddSkill(ResourceRequest),
    UpdateResourceByName(ResourceExtensionRequest),
}

impl Operation {
    fn parse(name: &str, variables: Value) -> Result<Self, Error> {
        let variables = if variables.is_null() {
            Value::Object(Map::new())
        } else {
            variables
        };
        let operation = match name {
            "courseDetails" => Self::CourseDetails(decode(name, variables)?),
            "allCourses" => Self::AllCourses(decode(name, variables)?),
            "experienceByCompany" => Self::ExperienceByCompany(decode(name, variables)?),
            "experiences" => Self::Experiences(decode(name, variables)?),
            "resource" => Self::Resource(decode(name, variables)?),
            "resources" => Self::Resources(decode(name, variables)?),
            "addCourse" => Self::AddCourse(decode_input(name, variables)?),
            "addExperience" => Self::AddExperience(decode_input(name, variables)?),
            "addSkill" => Self::AddSkill(decode_input(name, variables)?),
            "updateResourceByName" => Self::UpdateResourceByName(decode_input(name, variables)?),
            other => {
                return Err(Error::invalid_request(format!("Unknown operation: {other}")));
            }
        };
        Ok(operation)
    }
}

fn decode<T: DeserializeOwned>(operation: &str, variables: Value) -> Result<T, Error> {
    serde_json::from_value(variables).map_err(|err| {
        Error::invalid_request(format!("Invalid variables for {operation}: {err}"))
    })
}

fn decode_input<T: DeserializeOwned>(operation: &str, variables: Value) -> Result<T, Error> {
    decode::<InputVariables<T>>(operation, variables).map(|wrapper| wrapper.input)
}

fn lenient_int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, Error> {
    value
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| missing_field_error(FieldName::new(field)))
}

fn collect<T, D: From<T>>(items: Vec<T>) -> Vec<D> {
    items.into_iter().map(D::from).collect()
}

async fn execute(
    state: &HttpState,
    session: &SessionContext,
    operation: Operation,
) -> Result<QueryData, Error> {
    let data = match operation {
        Operation::CourseDetails(vars) => {
            let code = required(vars.course_code, "courseCode")?;
            QueryData::Reviews(collect(state.reviews.for_course(&code).await?))
        }
        Operation::AllCourses(vars) => {
            let request = ListRequest::paged(vars.page_request())
                .sorted_by(ReviewSort::CreatedAt, SortDirection::Desc);
            QueryData::Reviews(collect(state.reviews.list(request).await?.data))
        }
        Operation::ExperienceByCompany(vars) => {
            let company = required(vars.company_name, "companyName")?;
            QueryData::Experiences(collect(state.experiences.by_company(&company).await?))
        }
        Operation::Experiences(vars) => {
            let request = ListRequest::paged(vars.page_request())
                .sorted_by(ExperienceSort::CreatedAt, SortDirection::Desc);
            QueryData::Experiences(collect(state.experiences.list(request).await?.data))
        }
        Operation::Resource(vars) => {
            let skill = required(vars.skill_name, "skillName")?;
            QueryData::Resources(collect(state.resources.by_skill_name(&skill).await?))
        }
        Operation::Resources(vars) => {
            let request = ListRequest::paged(vars.page_request())
                .sorted_by(ResourceSort::CreatedAt, SortDirection::Desc);
            QueryData::Resources(collect(state.resources.list(request).await?.data))
        }
        Operation::AddCourse(input) => {
            let identity = session.require_identity()?;
            let author = parse_student_id(input.student_id)?;
            ensure_acting_as(identity, author)?;
            let review = state.review_commands.add(input.into_draft(author)).await?;
            QueryData::Review(review.into())
        }
        Operation::AddExperience(input) => {
            let identity = session.require_identity()?;
            let author = parse_student_id(input.student_id)?;
            ensure_acting_as(identity, author)?;
            let experience = state.experience_commands.add(input.into_draft(author)).await?;
            QueryData::Experience(experience.into())
        }
        Operation::AddSkill(input) => {
            session.require_admin(state.admin)?;
            QueryData::Resource(state.resource_commands.add(input.into()).await?.into())
        }
        Operation::UpdateResourceByName(input) => {
            session.require_admin(state.admin)?;
            QueryData::Resource(state.resource_commands.extend(input.into()).await?.into())
        }
    };
    Ok(data)
}

/// Run one named operation.
#[utoipa::path(
    post,
    path = "/api/v1/query",
    request_body = QueryRequest,
    responses(
        (status = 200, description = "Operation result", body = QueryResponse),
        (status = 400, description = "Unknown operation or invalid variables", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 422, description = "Missing related entity", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["query"],
    operation_id = "runQuery",
    security(("SessionCookie" = []))
)]
#[post("/query")]
pub async fn run_query(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<QueryRequest>,
) -> ApiResult<web::Json<QueryResponse>> {
    let QueryRequest {
        operation,
        variables,
    } = payload.into_inner();
    debug!(%operation, "typed query");
    let parsed = Operation::parse(&operation, variables)?;
    let data = execute(&state, &session, parsed).await?;
    Ok(web::Json(QueryResponse { data }))
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
