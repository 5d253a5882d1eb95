//! Page/limit normalisation and pagination envelopes for listing endpoints.
//!
//! Clients send `page` and `limit` as free-form query values. Listings never
//! reject them: anything unusable is replaced by a default so every request
//! resolves to a concrete window `page >= 1`, `1 <= limit <= MAX_LIMIT`.
//!
//! ```
//! use pagination::{PageRequest, Pagination};
//!
//! let request = PageRequest::from_raw(Some("2"), Some("abc"));
//! assert_eq!(request.page(), 2);
//! assert_eq!(request.limit(), 10);
//! assert_eq!(request.offset(), 10);
//!
//! let meta = Pagination::new(request, 25);
//! assert_eq!(meta.pages, 3);
//! assert_eq!(meta.current, 2);
//! ```

use serde::{Deserialize, Serialize};

/// Page number used when the client omits or garbles `page`.
pub const DEFAULT_PAGE: i64 = 1;
/// Page size used when the client omits or garbles `limit`.
pub const DEFAULT_LIMIT: i64 = 10;
/// Largest page size a listing will serve.
pub const MAX_LIMIT: i64 = 100;

/// Normalised page window.
///
/// Construction is infallible: values below one fall back to defaults and
/// limits above [`MAX_LIMIT`] are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Normalise already-parsed values.
    #[must_use]
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: match page {
                Some(value) if value >= 1 => value,
                _ => DEFAULT_PAGE,
            },
            limit: match limit {
                Some(value) if value >= 1 => value.min(MAX_LIMIT),
                _ => DEFAULT_LIMIT,
            },
        }
    }

    /// Normalise raw query-string values.
    ///
    /// Non-numeric input is treated as absent.
    #[must_use]
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(page.and_then(parse_lenient), limit.and_then(parse_lenient))
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> i64 {
        self.page
    }

    /// Rows per page.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit
    }

    /// Number of rows to skip before this page.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

fn parse_lenient(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Pagination metadata returned next to a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Rows matching the listing filters across all pages.
    pub total: i64,
    /// Number of pages at the requested limit.
    pub pages: i64,
    /// The page that was served.
    pub current: i64,
}

impl Pagination {
    /// Derive metadata for `request` given the filtered row count.
    #[must_use]
    pub const fn new(request: PageRequest, total: i64) -> Self {
        let clamped = if total < 0 { 0 } else { total };
        Self {
            total: clamped,
            pages: ceil_div(clamped, request.limit),
            current: request.page,
        }
    }
}

const fn ceil_div(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    let whole = total.div_euclid(limit);
    if total.rem_euclid(limit) == 0 {
        whole
    } else {
        whole + 1
    }
}

/// A page of items with its pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginated<T> {
    /// Items on the served page, in listing order.
    pub data: Vec<T>,
    /// Metadata describing where this page sits in the listing.
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    /// Wrap `data` with metadata for `request`.
    #[must_use]
    pub const fn new(data: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            data,
            pagination: Pagination::new(request, total),
        }
    }

    /// Transform every item while keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
