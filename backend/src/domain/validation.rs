//! Field checks shared by the mutation drafts.
//!
//! Every check runs before the store is touched. Field names use the external
//! camelCase spelling so clients can map an error back to their input.

use serde_json::json;

use super::Error;
use super::json_text::{RawJsonText, decode};

/// Why a draft was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was absent, blank or an empty list.
    #[error("missing required field: {field}")]
    MissingField {
        /// External field name.
        field: &'static str,
    },
    /// A numeric field fell outside its accepted range.
    #[error("{field} must be between {min} and {max}, got {actual}")]
    OutOfRange {
        /// External field name.
        field: &'static str,
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value.
        max: i64,
        /// Submitted value.
        actual: i64,
    },
}

impl ValidationError {
    /// External name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } | Self::OutOfRange { field, .. } => field,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::OutOfRange { .. } => "out_of_range",
        }
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        let details = match &err {
            ValidationError::MissingField { field } => json!({
                "field": field,
                "code": err.code(),
            }),
            ValidationError::OutOfRange {
                field, min, max, ..
            } => json!({
                "field": field,
                "code": err.code(),
                "min": min,
                "max": max,
            }),
        };
        Self::invalid_request(err.to_string()).with_details(details)
    }
}

pub(crate) fn required_text(
    field: &'static str,
    value: Option<String>,
) -> Result<String, ValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.trim().to_owned()),
        _ => Err(ValidationError::MissingField { field }),
    }
}

pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

pub(crate) fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField { field })
}

pub(crate) fn required_list(
    field: &'static str,
    raw: RawJsonText,
) -> Result<Vec<String>, ValidationError> {
    let items = decode(raw);
    if items.iter().all(|item| item.trim().is_empty()) {
        return Err(ValidationError::MissingField { field });
    }
    Ok(items)
}

pub(crate) fn in_range(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<i32, ValidationError> {
    let out_of_range = ValidationError::OutOfRange {
        field,
        min,
        max,
        actual: value,
    };
    if !(min..=max).contains(&value) {
        return Err(out_of_range);
    }
    i32::try_from(value).map_err(|_| out_of_range)
}
