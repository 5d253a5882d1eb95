//! Joins listing rows with the students who wrote them.
//!
//! A page is resolved with one [`StudentDirectory`] call for all distinct
//! owners on that page. What to do when an owner is missing is decided by
//! [`OrphanPolicy`], the only place that behaviour lives.

use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

use serde::Deserialize;
use tracing::warn;

use super::ports::{StudentDirectory, StudentDirectoryError};
use super::{CourseReview, Error, Experience, Student, StudentId};

/// Handling of rows whose owning student no longer exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    /// Fail the whole listing with `MissingRelatedEntity`.
    #[default]
    #[serde(alias = "fail")]
    FailListing,
    /// Drop the row and log a warning. Totals are not adjusted.
    #[serde(alias = "skip")]
    SkipAndLog,
}

/// Error raised when an orphan policy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown orphan policy {0:?}; expected fail or skip")]
pub struct OrphanPolicyParseError(String);

impl FromStr for OrphanPolicy {
    type Err = OrphanPolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" | "fail_listing" => Ok(Self::FailListing),
            "skip" | "skip_and_log" => Ok(Self::SkipAndLog),
            other => Err(OrphanPolicyParseError(other.to_owned())),
        }
    }
}

/// Rows that belong to a student.
pub trait OwnedByStudent {
    /// The owning student.
    fn owner(&self) -> StudentId;
}

impl OwnedByStudent for CourseReview {
    fn owner(&self) -> StudentId {
        self.student_id
    }
}

impl OwnedByStudent for Experience {
    fn owner(&self) -> StudentId {
        self.student_id
    }
}

/// Pair each row with its owner, keeping row order.
///
/// # Errors
/// `StoreUnavailable` when the directory fails, `MissingRelatedEntity` for
/// the first orphan under [`OrphanPolicy::FailListing`].
pub async fn assemble<T, D>(
    rows: Vec<T>,
    directory: &D,
    policy: OrphanPolicy,
) -> Result<Vec<(T, Student)>, Error>
where
    T: OwnedByStudent + Send,
    D: StudentDirectory + ?Sized,
{
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<StudentId> = rows
        .iter()
        .map(OwnedByStudent::owner)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let students: HashMap<StudentId, Student> = directory
        .find_by_ids(&ids)
        .await
        .map_err(map_directory_error)?
        .into_iter()
        .map(|student| (student.id, student))
        .collect();

    let mut assembled = Vec::with_capacity(rows.len());
    for row in rows {
        let owner = row.owner();
        match (students.get(&owner), policy) {
            (Some(student), _) => assembled.push((row, student.clone())),
            (None, OrphanPolicy::FailListing) => {
                return Err(Error::missing_related_entity("student", owner));
            }
            (None, OrphanPolicy::SkipAndLog) => {
                warn!(student_id = owner.get(), "dropping row with missing owner");
            }
        }
    }
    Ok(assembled)
}

pub(crate) fn map_directory_error(error: StudentDirectoryError) -> Error {
    Error::store_unavailable(error.to_string())
}
