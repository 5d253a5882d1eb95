//! Driving ports for interview experiences.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::Paginated;

use crate::domain::listing::{ExperienceSort, ListRequest};
use crate::domain::{Error, ExperienceDraft, ExperienceId, ExperienceView, Student};

/// Experience listing use cases.
#[async_trait]
pub trait ExperienceQuery: Send + Sync {
    /// Filtered, sorted page of experiences with their authors.
    async fn list(
        &self,
        request: ListRequest<ExperienceSort>,
    ) -> Result<Paginated<ExperienceView>, Error>;

    /// Every experience at one company. An empty list is a valid answer.
    async fn by_company(&self, company_name: &str) -> Result<Vec<ExperienceView>, Error>;
}

/// Experience submission use case.
#[async_trait]
pub trait ExperienceCommand: Send + Sync {
    /// Validate and store an experience.
    async fn add(&self, draft: ExperienceDraft) -> Result<ExperienceView, Error>;
}

/// Fixture with no stored experiences.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureExperiences;

#[async_trait]
impl ExperienceQuery for FixtureExperiences {
    async fn list(
        &self,
        request: ListRequest<ExperienceSort>,
    ) -> Result<Paginated<ExperienceView>, Error> {
        Ok(Paginated::new(Vec::new(), request.page, 0))
    }

    async fn by_company(&self, _company_name: &str) -> Result<Vec<ExperienceView>, Error> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl ExperienceCommand for FixtureExperiences {
    async fn add(&self, draft: ExperienceDraft) -> Result<ExperienceView, Error> {
        let experience = draft
            .validate()?
            .into_stored(ExperienceId::new(1), DateTime::<Utc>::default());
        let student = Student::new(
            experience.student_id,
            "Fixture Student",
            "fixture@example.edu",
        );
        Ok(ExperienceView {
            experience,
            student,
        })
    }
}
