//! Interview experiences shared by students.

use chrono::{DateTime, Utc};

use super::json_text::{RawJsonText, decode};
use super::validation::{ValidationError, in_range, optional_text, required, required_text};
use super::{ExperienceId, Student, StudentId};

/// Stored interview experience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Experience {
    /// Surrogate key.
    pub id: ExperienceId,
    /// Author.
    pub student_id: StudentId,
    /// Company interviewed with.
    pub company_name: String,
    /// Role applied for.
    pub position: String,
    /// Interview format, e.g. on-campus or virtual.
    pub interview_type: String,
    /// Number of rounds, at least one.
    pub interview_rounds: i32,
    /// Process length in days.
    pub duration: Option<i32>,
    /// Where the interview happened.
    pub location: String,
    /// Free-form difficulty label.
    pub difficulty_level: String,
    /// Questions asked.
    pub questions: Option<String>,
    /// Narrative of the experience.
    pub narrative: Option<String>,
    /// Result, e.g. offer or rejection.
    pub outcome: String,
    /// Feedback received.
    pub feedback: Option<String>,
    /// Advice for others.
    pub tips: Option<String>,
    /// Preparation links, in submission order.
    pub prep_links: Vec<String>,
    /// Free-text resource notes.
    pub resources: Option<String>,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Last edit time.
    pub updated_at: DateTime<Utc>,
}

/// An experience joined with its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceView {
    /// The stored experience.
    pub experience: Experience,
    /// Author account.
    pub student: Student,
}

/// Unvalidated experience submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperienceDraft {
    /// Claimed author.
    pub student_id: Option<StudentId>,
    /// Company.
    pub company_name: Option<String>,
    /// Role.
    pub position: Option<String>,
    /// Interview format.
    pub interview_type: Option<String>,
    /// Number of rounds.
    pub interview_rounds: Option<i64>,
    /// Process length in days.
    pub duration: Option<i64>,
    /// Location.
    pub location: Option<String>,
    /// Difficulty label.
    pub difficulty_level: Option<String>,
    /// Questions asked.
    pub questions: Option<String>,
    /// Narrative.
    pub narrative: Option<String>,
    /// Result.
    pub outcome: Option<String>,
    /// Feedback.
    pub feedback: Option<String>,
    /// Advice.
    pub tips: Option<String>,
    /// Preparation links in any accepted list encoding.
    pub prep_links: RawJsonText,
    /// Resource notes.
    pub resources: Option<String>,
}

/// Experience that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExperience {
    /// Author.
    pub student_id: StudentId,
    /// Company.
    pub company_name: String,
    /// Role.
    pub position: String,
    /// Interview format.
    pub interview_type: String,
    /// Rounds, at least one.
    pub interview_rounds: i32,
    /// Non-negative duration.
    pub duration: Option<i32>,
    /// Location.
    pub location: String,
    /// Difficulty label.
    pub difficulty_level: String,
    /// Questions asked.
    pub questions: Option<String>,
    /// Narrative.
    pub narrative: Option<String>,
    /// Result.
    pub outcome: String,
    /// Feedback.
    pub feedback: Option<String>,
    /// Advice.
    pub tips: Option<String>,
    /// Decoded preparation links.
    pub prep_links: Vec<String>,
    /// Resource notes.
    pub resources: Option<String>,
}

impl NewExperience {
    /// Stored form after the store assigned `id` at `at`.
    pub fn into_stored(self, id: ExperienceId, at: DateTime<Utc>) -> Experience {
        Experience {
            id,
            student_id: self.student_id,
            company_name: self.company_name,
            position: self.position,
            interview_type: self.interview_type,
            interview_rounds: self.interview_rounds,
            duration: self.duration,
            location: self.location,
            difficulty_level: self.difficulty_level,
            questions: self.questions,
            narrative: self.narrative,
            outcome: self.outcome,
            feedback: self.feedback,
            tips: self.tips,
            prep_links: self.prep_links,
            resources: self.resources,
            created_at: at,
            updated_at: at,
        }
    }
}

impl ExperienceDraft {
    /// Check required fields in submission order, then numeric ranges.
    pub fn validate(self) -> Result<NewExperience, ValidationError> {
        let student_id = required("studentId", self.student_id)?;
        let company_name = required_text("companyName", self.company_name)?;
        let position = required_text("position", self.position)?;
        let interview_type = required_text("interviewType", self.interview_type)?;
        let rounds = required("interviewRounds", self.interview_rounds)?;
        let location = required_text("location", self.location)?;
        let difficulty_level = required_text("difficultyLevel", self.difficulty_level)?;
        let outcome = required_text("outcome", self.outcome)?;

        let interview_rounds = in_range("interviewRounds", rounds, 1, i64::from(i32::MAX))?;
        let duration = self
            .duration
            .map(|days| in_range("duration", days, 0, i64::from(i32::MAX)))
            .transpose()?;

        Ok(NewExperience {
            student_id,
            company_name,
            position,
            interview_type,
            interview_rounds,
            duration,
            location,
            difficulty_level,
            questions: optional_text(self.questions),
            narrative: optional_text(self.narrative),
            outcome,
            feedback: optional_text(self.feedback),
            tips: optional_text(self.tips),
            prep_links: decode(self.prep_links),
            resources: optional_text(self.resources),
        })
    }
}
