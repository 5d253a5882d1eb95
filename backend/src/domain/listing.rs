//! Client-controlled listing parameters, reduced to whitelisted values.
//!
//! Handlers receive raw query strings; [`ListRequest::from_raw`] maps them to
//! a closed set of sort keys and a normalised page window. Unknown sort keys
//! and directions fall back to defaults instead of failing the request.

use pagination::PageRequest;

/// Ordering direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest or newest first.
    #[default]
    Desc,
}

impl SortDirection {
    /// Only a case-insensitive `asc` sorts ascending.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.trim().eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }
}

/// Closed set of sortable fields for one listing.
pub trait SortField: Copy + Default {
    /// Recognise a client-supplied key.
    fn parse(raw: &str) -> Option<Self>;

    /// Recognise a key, falling back to the default.
    fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(|value| Self::parse(value.trim())).unwrap_or_default()
    }
}

/// Sortable course review fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewSort {
    /// Last edit time.
    #[default]
    UpdatedAt,
    /// Star rating.
    ExperienceRating,
    /// Number of likes.
    LikesCount,
    /// Submission time; used by the typed query layer, not client-selectable.
    CreatedAt,
}

impl SortField for ReviewSort {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "updatedAt" | "updated_at" => Some(Self::UpdatedAt),
            "experienceRating" | "experience_rating" => Some(Self::ExperienceRating),
            "likesCount" | "likes_count" => Some(Self::LikesCount),
            _ => None,
        }
    }
}

/// Sortable interview experience fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExperienceSort {
    /// Submission time.
    #[default]
    CreatedAt,
    /// Last edit time.
    UpdatedAt,
    /// Number of interview rounds.
    InterviewRounds,
    /// Company name, alphabetically.
    CompanyName,
}

impl SortField for ExperienceSort {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "createdAt" | "created_at" => Some(Self::CreatedAt),
            "updatedAt" | "updated_at" => Some(Self::UpdatedAt),
            "interviewRounds" | "interview_rounds" => Some(Self::InterviewRounds),
            "companyName" | "company_name" => Some(Self::CompanyName),
            _ => None,
        }
    }
}

/// Sortable learning resource fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceSort {
    /// Submission time.
    #[default]
    CreatedAt,
    /// Last edit time.
    UpdatedAt,
    /// Skill name, alphabetically.
    SkillName,
}

impl SortField for ResourceSort {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "createdAt" | "created_at" => Some(Self::CreatedAt),
            "updatedAt" | "updated_at" => Some(Self::UpdatedAt),
            "skillName" | "skill_name" => Some(Self::SkillName),
            _ => None,
        }
    }
}

/// Raw query values as received from a client.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawListParams<'a> {
    /// Exact-match filter (course code, company name or category).
    pub filter: Option<&'a str>,
    /// Free-text search term.
    pub search: Option<&'a str>,
    /// Requested sort key.
    pub sort_by: Option<&'a str>,
    /// Requested sort direction.
    pub sort_order: Option<&'a str>,
    /// Requested page number.
    pub page: Option<&'a str>,
    /// Requested page size.
    pub limit: Option<&'a str>,
}

/// Normalised listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest<S> {
    /// Exact-match filter value; `None` matches every row.
    pub filter: Option<String>,
    /// Trimmed, non-empty search term.
    pub search: Option<String>,
    /// Whitelisted sort key.
    pub sort: S,
    /// Sort direction.
    pub direction: SortDirection,
    /// Page window.
    pub page: PageRequest,
}

impl<S: SortField> Default for ListRequest<S> {
    fn default() -> Self {
        Self {
            filter: None,
            search: None,
            sort: S::default(),
            direction: SortDirection::Desc,
            page: PageRequest::default(),
        }
    }
}

impl<S: SortField> ListRequest<S> {
    /// Normalise raw query values.
    ///
    /// ```
    /// use peerbridge::domain::listing::{ListRequest, RawListParams, ReviewSort, SortDirection};
    ///
    /// let request = ListRequest::<ReviewSort>::from_raw(RawListParams {
    ///     sort_by: Some("password"),
    ///     sort_order: Some("ASC"),
    ///     page: Some("0"),
    ///     ..RawListParams::default()
    /// });
    /// assert_eq!(request.sort, ReviewSort::UpdatedAt);
    /// assert_eq!(request.direction, SortDirection::Asc);
    /// assert_eq!(request.page.page(), 1);
    /// ```
    pub fn from_raw(raw: RawListParams<'_>) -> Self {
        Self {
            filter: non_blank(raw.filter),
            search: non_blank(raw.search),
            sort: S::parse_lenient(raw.sort_by),
            direction: SortDirection::parse_lenient(raw.sort_order),
            page: PageRequest::from_raw(raw.page, raw.limit),
        }
    }

    /// Plain paged listing in default order.
    pub fn paged(page: PageRequest) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Replace the sort key.
    #[must_use]
    pub fn sorted_by(mut self, sort: S, direction: SortDirection) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}
