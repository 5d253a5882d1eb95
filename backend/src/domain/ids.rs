//! Integer identifiers for stored entities.
//!
//! Each id is a distinct newtype so a review id cannot be passed where a
//! student id is expected. The store hands out positive integers; parsing
//! rejects anything else.

use std::fmt;
use std::str::FromStr;

/// Error raised when an identifier cannot be parsed from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} must be a positive integer, got {value:?}")]
pub struct IdParseError {
    kind: &'static str,
    value: String,
}

impl IdParseError {
    /// Human-readable name of the identifier that failed to parse.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw store value.
            pub const fn new(value: i32) -> Self {
                Self(value)
            }

            /// Raw store value.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().parse::<i32>() {
                    Ok(value) if value > 0 => Ok(Self(value)),
                    _ => Err(IdParseError {
                        kind: $label,
                        value: s.to_owned(),
                    }),
                }
            }
        }
    };
}

define_id!(
    /// Natural key of a student account.
    StudentId,
    "studentId"
);
define_id!(
    /// Surrogate key of a course review.
    ReviewId,
    "reviewId"
);
define_id!(
    /// Surrogate key of an interview experience.
    ExperienceId,
    "experienceId"
);
define_id!(
    /// Surrogate key of a learning resource.
    ResourceId,
    "resourceId"
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("7", 7)]
    #[case(" 42 ", 42)]
    fn parses_positive_ids(#[case] raw: &str, #[case] expected: i32) {
        let id: ReviewId = raw.parse().expect("valid id");
        assert_eq!(id.get(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("seven")]
    #[case("")]
    fn rejects_non_positive_or_text(#[case] raw: &str) {
        let err = raw.parse::<StudentId>().expect_err("invalid id");
        assert_eq!(err.kind(), "studentId");
    }
}
