//! Learning resources grouped by skill.

use chrono::{DateTime, Utc};

use super::ResourceId;
use super::json_text::{RawJsonText, decode};
use super::validation::{ValidationError, required_list, required_text};

/// Stored learning resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Surrogate key.
    pub id: ResourceId,
    /// Skill name; unique by convention only.
    pub skill_name: String,
    /// What the skill covers.
    pub description: String,
    /// Grouping such as `Programming`.
    pub category: String,
    /// Links in submission order.
    pub resource_links: Vec<String>,
    /// Tags in submission order.
    pub tags: Vec<String>,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Last edit time.
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    /// Links and tags after appending an extension.
    pub fn extended_lists(&self, extension: &ResourceExtension) -> (Vec<String>, Vec<String>) {
        let links = self
            .resource_links
            .iter()
            .chain(&extension.additional_links)
            .cloned()
            .collect();
        let tags = self
            .tags
            .iter()
            .chain(&extension.additional_tags)
            .cloned()
            .collect();
        (links, tags)
    }
}

/// Unvalidated resource submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceDraft {
    /// Skill name.
    pub skill_name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Category.
    pub category: Option<String>,
    /// Links in any accepted list encoding.
    pub resource_links: RawJsonText,
    /// Tags in any accepted list encoding.
    pub tags: RawJsonText,
}

/// Resource that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResource {
    /// Skill name.
    pub skill_name: String,
    /// Description.
    pub description: String,
    /// Category.
    pub category: String,
    /// At least one link.
    pub resource_links: Vec<String>,
    /// Possibly empty tags.
    pub tags: Vec<String>,
}

impl NewResource {
    /// Stored form after the store assigned `id` at `at`.
    pub fn into_stored(self, id: ResourceId, at: DateTime<Utc>) -> Resource {
        Resource {
            id,
            skill_name: self.skill_name,
            description: self.description,
            category: self.category,
            resource_links: self.resource_links,
            tags: self.tags,
            created_at: at,
            updated_at: at,
        }
    }
}

impl ResourceDraft {
    /// Check required fields in submission order.
    pub fn validate(self) -> Result<NewResource, ValidationError> {
        Ok(NewResource {
            skill_name: required_text("skillName", self.skill_name)?,
            description: required_text("description", self.description)?,
            category: required_text("category", self.category)?,
            resource_links: required_list("resourceLinks", self.resource_links)?,
            tags: decode(self.tags),
        })
    }
}

/// Request to append links and tags to an existing resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceExtensionDraft {
    /// Skill to extend.
    pub skill_name: Option<String>,
    /// Links to append.
    pub additional_links: Option<Vec<String>>,
    /// Tags to append.
    pub additional_tags: Option<Vec<String>>,
}

/// Validated extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceExtension {
    /// Skill to extend.
    pub skill_name: String,
    /// Links to append.
    pub additional_links: Vec<String>,
    /// Tags to append.
    pub additional_tags: Vec<String>,
}

impl ResourceExtensionDraft {
    /// Require a skill name and at least one list to append.
    pub fn validate(self) -> Result<ResourceExtension, ValidationError> {
        let skill_name = required_text("skillName", self.skill_name)?;
        if self.additional_links.is_none() && self.additional_tags.is_none() {
            return Err(ValidationError::MissingField {
                field: "additionalLinks",
            });
        }
        Ok(ResourceExtension {
            skill_name,
            additional_links: self.additional_links.unwrap_or_default(),
            additional_tags: self.additional_tags.unwrap_or_default(),
        })
    }
}
