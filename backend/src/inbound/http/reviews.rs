//! Course review and like handlers.
//!
//! ```text
//! GET  /api/v1/reviews?courseCode=CS330&sortBy=likesCount&page=2
//! GET  /api/v1/reviews/course/{courseCode}
//! POST /api/v1/reviews
//! POST /api/v1/reviews/{reviewId}/toggle-like {"studentId":5}
//! GET  /api/v1/reviews/{reviewId}/like-status?studentId=5
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::listing::{ListRequest, RawListParams, ReviewSort};
use crate::domain::{ReviewId, StudentId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    LikeStatusResponse, LikeToggleRequest, LikeToggleResponse, ReviewCollection, ReviewCreated,
    ReviewPage, ReviewRequest,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::{SessionContext, ensure_acting_as};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_id, parse_required_id, parse_student_id,
};

/// Review listing query; every value is read as text and coerced leniently.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReviewListParams {
    /// Exact course code filter.
    pub course_code: Option<String>,
    /// 1-based page number; invalid values fall back to 1.
    pub page: Option<String>,
    /// Page size; invalid values fall back to 10, capped at 100.
    pub limit: Option<String>,
    /// `updatedAt`, `experienceRating` or `likesCount`.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub sort_order: Option<String>,
    /// Case-insensitive match on course name or code.
    pub search: Option<String>,
}

impl ReviewListParams {
    fn to_request(&self) -> ListRequest<ReviewSort> {
        ListRequest::from_raw(RawListParams {
            filter: self.course_code.as_deref(),
            search: self.search.as_deref(),
            sort_by: self.sort_by.as_deref(),
            sort_order: self.sort_order.as_deref(),
            page: self.page.as_deref(),
            limit: self.limit.as_deref(),
        })
    }
}

/// Query for the like status check.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LikeStatusParams {
    pub student_id: Option<String>,
}

/// List course reviews with filters, search, sorting and paging.
#[utoipa::path(
    get,
    path = "/api/v1/reviews",
    params(ReviewListParams),
    responses(
        (status = 200, description = "Page of reviews", body = ReviewPage),
        (status = 422, description = "A review references a missing student", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "listReviews",
    security([])
)]
#[get("/reviews")]
pub async fn list_reviews(
    state: web::Data<HttpState>,
    params: web::Query<ReviewListParams>,
) -> ApiResult<web::Json<ReviewPage>> {
    let page = state.reviews.list(params.to_request()).await?;
    Ok(web::Json(page.into()))
}

/// Every review for one course.
#[utoipa::path(
    get,
    path = "/api/v1/reviews/course/{courseCode}",
    params(("courseCode" = String, Path, description = "Course code")),
    responses(
        (status = 200, description = "Reviews for the course", body = ReviewCollection),
        (status = 404, description = "No reviews for the course", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "reviewsForCourse",
    security([])
)]
#[get("/reviews/course/{courseCode}")]
pub async fn reviews_for_course(
    state: web::Data<HttpState>,
    course_code: web::Path<String>,
) -> ApiResult<web::Json<ReviewCollection>> {
    let reviews = state.reviews.for_course(&course_code).await?;
    Ok(web::Json(reviews.into()))
}

/// Submit a review as the signed-in student.
#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    request_body = ReviewRequest,
    responses(
        (status = 201, description = "Review stored", body = ReviewCreated),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "studentId names another student", body = ErrorSchema),
        (status = 422, description = "Unknown student", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "addReview",
    security(("SessionCookie" = []))
)]
#[post("/reviews")]
pub async fn add_review(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ReviewRequest>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_identity()?;
    let body = payload.into_inner();
    let author = parse_student_id(body.student_id)?;
    ensure_acting_as(identity, author)?;

    let review = state.review_commands.add(body.into_draft(author)).await?;
    Ok(HttpResponse::Created().json(ReviewCreated::new(review)))
}

/// Like the review, or remove the like if one exists.
#[utoipa::path(
    post,
    path = "/api/v1/reviews/{reviewId}/toggle-like",
    params(("reviewId" = i32, Path, description = "Review id")),
    request_body = LikeToggleRequest,
    responses(
        (status = 200, description = "New like state", body = LikeToggleResponse),
        (status = 400, description = "Invalid review id or missing studentId", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "studentId names another student", body = ErrorSchema),
        (status = 404, description = "Review not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "toggleReviewLike",
    security(("SessionCookie" = []))
)]
#[post("/reviews/{reviewId}/toggle-like")]
pub async fn toggle_like(
    state: web::Data<HttpState>,
    session: SessionContext,
    review_id: web::Path<String>,
    payload: web::Json<LikeToggleRequest>,
) -> ApiResult<web::Json<LikeToggleResponse>> {
    let identity = session.require_identity()?;
    let review_id: ReviewId = parse_id(&review_id, FieldName::new("reviewId"))?;
    let student_id = parse_student_id(payload.student_id)?;
    ensure_acting_as(identity, student_id)?;

    let toggle = state.likes.toggle(review_id, student_id).await?;
    Ok(web::Json(toggle.into()))
}

/// Whether a student currently likes the review.
#[utoipa::path(
    get,
    path = "/api/v1/reviews/{reviewId}/like-status",
    params(("reviewId" = i32, Path, description = "Review id"), LikeStatusParams),
    responses(
        (status = 200, description = "Like status", body = LikeStatusResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "reviewLikeStatus",
    security([])
)]
#[get("/reviews/{reviewId}/like-status")]
pub async fn like_status(
    state: web::Data<HttpState>,
    review_id: web::Path<String>,
    params: web::Query<LikeStatusParams>,
) -> ApiResult<web::Json<LikeStatusResponse>> {
    let review_id: ReviewId = parse_id(&review_id, FieldName::new("reviewId"))?;
    let student_id: StudentId =
        parse_required_id(params.student_id.as_deref(), FieldName::new("studentId"))?;

    let liked = state.like_status.is_liked(review_id, student_id).await?;
    Ok(web::Json(LikeStatusResponse { liked }))
}

#[cfg(test)]
#[path = "reviews_tests.rs"]
mod tests;
