//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`; the
//! wrappers here mirror their wire form for the generated document.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No identity accompanies a request that needs one.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The identity is not allowed to perform the action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested entity does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A row references an owner that no longer exists.
    #[schema(rename = "missing_related_entity")]
    MissingRelatedEntity,
    /// The record store could not serve the request.
    #[schema(rename = "store_unavailable")]
    StoreUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable message returned to clients.
    #[schema(example = "Review 12 not found")]
    message: String,
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Underlying store message; only present for `store_unavailable`.
    error: Option<String>,
    /// Supplementary details such as the offending field.
    details: Option<serde_json::Value>,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
}
