//! Domain-level error types.
//!
//! Errors are transport agnostic. Inbound adapters map [`ErrorCode`] to a
//! status and serialise the payload; the domain only decides the category, a
//! client-safe message and optional structured details.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// No identity accompanies a request that needs one.
    Unauthorized,
    /// The identity is known but not allowed to perform the action.
    Forbidden,
    /// The requested entity does not exist.
    NotFound,
    /// A row references an owner that no longer exists.
    MissingRelatedEntity,
    /// The record store could not serve the request.
    StoreUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

impl ErrorCode {
    const fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid request",
            Self::Unauthorized => "Authentication required",
            Self::Forbidden => "Not allowed",
            Self::NotFound => "Not found",
            Self::MissingRelatedEntity => "Related entity not found",
            Self::StoreUnavailable => "Data store unavailable",
            Self::InternalError => "Internal server error",
        }
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
/// - `diagnostic` is only populated for [`ErrorCode::StoreUnavailable`] and
///   carries the underlying store message for operators.
///
/// The trace identifier in scope at construction time is captured so adapters
/// can correlate responses with logs.
///
/// # Examples
/// ```
/// use peerbridge::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Resource not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.to_string(), "Resource not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
    diagnostic: Option<String>,
    details: Option<Value>,
    trace_id: Option<String>,
}

/// Validation failures raised by the fallible constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The message was empty after trimming.
    #[error("error message must not be empty")]
    EmptyMessage,
    /// The trace identifier was empty after trimming.
    #[error("trace identifier must not be empty")]
    EmptyTraceId,
}

impl Error {
    /// Create an error, substituting the code's generic message when the
    /// supplied one is blank.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let text = message.into();
        let message = if text.trim().is_empty() {
            code.fallback_message().to_owned()
        } else {
            text
        };
        Self {
            code,
            message,
            diagnostic: None,
            details: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Fallible constructor that rejects blank messages.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let text = message.into();
        if text.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self::new(code, text))
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to clients.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Underlying store message, if any.
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Correlation identifier captured when the error was raised.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach structured details to the error.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Replace the trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Replace the trace identifier, rejecting blank values.
    pub fn try_with_trace_id(
        self,
        trace_id: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let id = trace_id.into();
        if id.trim().is_empty() {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        Ok(self.with_trace_id(id))
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// A `kind` row with identifier `id` is referenced but absent.
    ///
    /// ```
    /// use peerbridge::domain::{Error, ErrorCode};
    ///
    /// let err = Error::missing_related_entity("student", 42);
    /// assert_eq!(err.code(), ErrorCode::MissingRelatedEntity);
    /// assert_eq!(err.message(), "User not found for studentid: 42");
    /// ```
    pub fn missing_related_entity(kind: &'static str, id: impl std::fmt::Display) -> Self {
        let id_text = id.to_string();
        let label = if kind == "student" { "User" } else { kind };
        Self::new(
            ErrorCode::MissingRelatedEntity,
            format!("{label} not found for studentid: {id_text}"),
        )
        .with_details(json!({ "kind": kind, "id": id_text }))
    }

    /// The store failed; `diagnostic` is kept for operators.
    pub fn store_unavailable(diagnostic: impl Into<String>) -> Self {
        let mut error = Self::new(
            ErrorCode::StoreUnavailable,
            ErrorCode::StoreUnavailable.fallback_message(),
        );
        error.diagnostic = Some(diagnostic.into());
        error
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    message: String,
    code: ErrorCode,
    #[serde(default, rename = "error", skip_serializing_if = "Option::is_none")]
    diagnostic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            message: value.message,
            code: value.code,
            diagnostic: value.diagnostic,
            details: value.details,
            trace_id: value.trace_id,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        let ErrorDto {
            message,
            code,
            diagnostic,
            details,
            trace_id,
        } = value;

        let mut error = Self::try_new(code, message)?;
        error.diagnostic = diagnostic;
        error.details = details;
        error.trace_id = trace_id;
        Ok(error)
    }
}
