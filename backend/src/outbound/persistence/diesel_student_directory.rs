//! PostgreSQL-backed student directory.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StudentDirectory, StudentDirectoryError};
use crate::domain::{Student, StudentId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::StudentRow;
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of [`StudentDirectory`].
#[derive(Clone)]
pub struct DieselStudentDirectory {
    pool: DbPool,
}

impl DieselStudentDirectory {
    /// Create a directory backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentDirectory for DieselStudentDirectory {
    async fn find_by_ids(&self, ids: &[StudentId]) -> Result<Vec<Student>, StudentDirectoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw_ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();

        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| map_pool_error(error, StudentDirectoryError::connection))?;

        let rows = users::table
            .filter(users::student_id.eq_any(raw_ids))
            .select(StudentRow::as_select())
            .load::<StudentRow>(&mut conn)
            .await
            .map_err(|error| {
                map_diesel_error(
                    error,
                    StudentDirectoryError::query,
                    StudentDirectoryError::connection,
                )
            })?;

        Ok(rows.into_iter().map(Student::from).collect())
    }
}
