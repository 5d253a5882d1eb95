//! Shared parsing helpers for inbound HTTP adapters.
//!
//! Path segments and identity fields arrive as untyped text or numbers; these
//! helpers turn them into domain ids or a `400 invalid_request` carrying the
//! offending field.

use std::str::FromStr;

use serde_json::json;

use crate::domain::{Error, IdParseError, StudentId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidId => "invalid_id",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

pub(crate) fn invalid_id_error(field: FieldName, value: impl Into<String>) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a positive integer")).with_details(json!({
        "field": field,
        "value": value.into(),
        "code": ErrorCode::InvalidId.as_str(),
    }))
}

/// Parse a textual id such as a path segment.
pub(crate) fn parse_id<T>(raw: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr<Err = IdParseError>,
{
    raw.parse::<T>().map_err(|_| invalid_id_error(field, raw))
}

/// Parse a required textual id, reporting absence separately.
pub(crate) fn parse_required_id<T>(raw: Option<&str>, field: FieldName) -> Result<T, Error>
where
    T: FromStr<Err = IdParseError>,
{
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => parse_id(value, field),
        None => Err(missing_field_error(field)),
    }
}

/// Parse the required numeric `studentId` from a JSON body.
pub(crate) fn parse_student_id(raw: Option<i64>) -> Result<StudentId, Error> {
    const FIELD: FieldName = FieldName::new("studentId");
    let value = raw.ok_or_else(|| missing_field_error(FIELD))?;
    match i32::try_from(value) {
        Ok(id) if id > 0 => Ok(StudentId::new(id)),
        _ => Err(invalid_id_error(FIELD, value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode as DomainCode, ReviewId};
    use rstest::rstest;

    #[rstest]
    #[case("7", Some(7))]
    #[case(" 12 ", Some(12))]
    #[case("0", None)]
    #[case("-4", None)]
    #[case("abc", None)]
    fn path_ids_must_be_positive_integers(#[case] raw: &str, #[case] expected: Option<i32>) {
        let parsed = parse_id::<ReviewId>(raw, FieldName::new("reviewId"));
        match expected {
            Some(id) => assert_eq!(parsed.expect("valid id"), ReviewId::new(id)),
            None => {
                let err = parsed.expect_err("invalid id");
                assert_eq!(err.code(), DomainCode::InvalidRequest);
                let details = err.details().expect("details");
                assert_eq!(details["field"], "reviewId");
                assert_eq!(details["code"], "invalid_id");
            }
        }
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("  "))]
    fn absent_required_ids_report_missing_field(#[case] raw: Option<&str>) {
        let err = parse_required_id::<StudentId>(raw, FieldName::new("studentId"))
            .expect_err("missing id");
        let details = err.details().expect("details");
        assert_eq!(details["code"], "missing_field");
    }

    #[rstest]
    #[case(Some(3), Ok(3))]
    #[case(None, Err("missing_field"))]
    #[case(Some(0), Err("invalid_id"))]
    #[case(Some(i64::from(i32::MAX) + 1), Err("invalid_id"))]
    fn body_student_ids(#[case] raw: Option<i64>, #[case] expected: Result<i32, &str>) {
        let parsed = parse_student_id(raw).map(StudentId::get).map_err(|err| {
            let details = err.details().expect("details");
            assert_eq!(details["field"], "studentId");
            details["code"].as_str().map(str::to_owned).unwrap_or_default()
        });
        assert_eq!(parsed, expected.map_err(str::to_owned));
    }
}
