//! Interview experience services.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Paginated;
use tracing::error;

use crate::domain::aggregation::{OrphanPolicy, assemble};
use crate::domain::listing::{ExperienceSort, ListRequest};
use crate::domain::ports::{
    ExperienceCommand, ExperienceQuery, ExperienceRepository, ExperienceRepositoryError,
    StudentDirectory,
};
use crate::domain::{Error, Experience, ExperienceDraft, ExperienceView, Student};

fn map_repository_error(err: ExperienceRepositoryError) -> Error {
    match err {
        ExperienceRepositoryError::MissingStudent { student_id } => {
            Error::missing_related_entity("student", student_id)
        }
        ExperienceRepositoryError::Connection { .. } | ExperienceRepositoryError::Query { .. } => {
            error!(error = %err, "experience store failed");
            Error::store_unavailable(err.to_string())
        }
    }
}

fn into_view((experience, student): (Experience, Student)) -> ExperienceView {
    ExperienceView {
        experience,
        student,
    }
}

/// Experience service implementing the experience driving ports.
#[derive(Clone)]
pub struct ExperienceService<R, D> {
    experiences: Arc<R>,
    students: Arc<D>,
    orphan_policy: OrphanPolicy,
}

impl<R, D> ExperienceService<R, D> {
    /// Create a service that fails listings on orphaned rows.
    pub fn new(experiences: Arc<R>, students: Arc<D>) -> Self {
        Self {
            experiences,
            students,
            orphan_policy: OrphanPolicy::default(),
        }
    }

    /// Override the orphan policy.
    #[must_use]
    pub fn with_orphan_policy(mut self, orphan_policy: OrphanPolicy) -> Self {
        self.orphan_policy = orphan_policy;
        self
    }
}

#[async_trait]
impl<R, D> ExperienceQuery for ExperienceService<R, D>
where
    R: ExperienceRepository,
    D: StudentDirectory,
{
    async fn list(
        &self,
        request: ListRequest<ExperienceSort>,
    ) -> Result<Paginated<ExperienceView>, Error> {
        let Paginated { data, pagination } = self
            .experiences
            .list(&request)
            .await
            .map_err(map_repository_error)?;
        let rows = assemble(data, self.students.as_ref(), self.orphan_policy).await?;
        Ok(Paginated {
            data: rows.into_iter().map(into_view).collect(),
            pagination,
        })
    }

    async fn by_company(&self, company_name: &str) -> Result<Vec<ExperienceView>, Error> {
        let company = company_name.trim();
        if company.is_empty() {
            return Err(Error::invalid_request("companyName is required"));
        }
        let rows = self
            .experiences
            .by_company(company)
            .await
            .map_err(map_repository_error)?;
        let assembled = assemble(rows, self.students.as_ref(), self.orphan_policy).await?;
        Ok(assembled.into_iter().map(into_view).collect())
    }
}

#[async_trait]
impl<R, D> ExperienceCommand for ExperienceService<R, D>
where
    R: ExperienceRepository,
    D: StudentDirectory,
{
    async fn add(&self, draft: ExperienceDraft) -> Result<ExperienceView, Error> {
        let experience = draft.validate()?;
        let stored = self
            .experiences
            .insert(&experience)
            .await
            .map_err(map_repository_error)?;
        let mut rows =
            assemble(vec![stored], self.students.as_ref(), OrphanPolicy::FailListing).await?;
        rows.pop()
            .map(into_view)
            .ok_or_else(|| Error::missing_related_entity("student", experience.student_id))
    }
}

#[cfg(test)]
mod tests {
    //! Service coverage with mocked repositories.

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockExperienceRepository, MockStudentDirectory};
    use crate::domain::test_support::{at, experience, student};
    use crate::domain::{ExperienceId, StudentId};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn by_company_returns_authors() {
        let mut repo = MockExperienceRepository::new();
        repo.expect_by_company()
            .withf(|company| company.to_string() == "Initech")
            .return_once(|_| Ok(vec![experience(1, 5, "Initech")]));
        let mut directory = MockStudentDirectory::new();
        directory
            .expect_find_by_ids()
            .return_once(|_| Ok(vec![student(5, "Grace")]));

        let service = ExperienceService::new(Arc::new(repo), Arc::new(directory));
        let views = service.by_company("Initech ").await.expect("lookup succeeds");
        assert_eq!(views.len(), 1);
        assert_eq!(views.first().map(|v| v.student.name.as_str()), Some("Grace"));
    }

    #[rstest]
    #[tokio::test]
    async fn by_company_with_no_rows_is_empty_not_error() {
        let mut repo = MockExperienceRepository::new();
        repo.expect_by_company().return_once(|_| Ok(Vec::new()));
        let mut directory = MockStudentDirectory::new();
        directory.expect_find_by_ids().times(0);

        let service = ExperienceService::new(Arc::new(repo), Arc::new(directory));
        assert!(service.by_company("Nowhere").await.expect("lookup").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn add_rejects_missing_fields_without_store_calls() {
        let mut repo = MockExperienceRepository::new();
        repo.expect_insert().times(0);
        let service = ExperienceService::new(Arc::new(repo), Arc::new(MockStudentDirectory::new()));

        let err = service
            .add(ExperienceDraft {
                student_id: Some(StudentId::new(5)),
                ..ExperienceDraft::default()
            })
            .await
            .expect_err("incomplete draft");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&serde_json::json!({"field": "companyName", "code": "missing_field"}))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn add_stores_and_attaches_author() {
        let mut repo = MockExperienceRepository::new();
        repo.expect_insert()
            .times(1)
            .return_once(|new| Ok(new.clone().into_stored(ExperienceId::new(3), at(4))));
        let mut directory = MockStudentDirectory::new();
        directory
            .expect_find_by_ids()
            .return_once(|_| Ok(vec![student(5, "Grace")]));

        let service = ExperienceService::new(Arc::new(repo), Arc::new(directory));
        let draft = ExperienceDraft {
            student_id: Some(StudentId::new(5)),
            company_name: Some("Initech".to_owned()),
            position: Some("SRE".to_owned()),
            interview_type: Some("Onsite".to_owned()),
            interview_rounds: Some(4),
            location: Some("Austin".to_owned()),
            difficulty_level: Some("Hard".to_owned()),
            outcome: Some("Rejected".to_owned()),
            ..ExperienceDraft::default()
        };
        let view = service.add(draft).await.expect("stored");
        assert_eq!(view.experience.id, ExperienceId::new(3));
        assert_eq!(view.student.name, "Grace");
    }
}
