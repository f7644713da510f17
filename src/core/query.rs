//! Listing query parameters and pagination

use serde::{Deserialize, Serialize};

/// `?query=&page=` on the invoice listing
///
/// # Example
/// ```text
/// GET /dashboard/invoices
/// GET /dashboard/invoices?query=lee&page=2
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SearchParams {
    /// Free-text search term; absent means "match everything"
    pub query: Option<String>,

    /// Page number (starts at 1); unparsable values fall back to 1
    #[serde(deserialize_with = "lenient_page")]
    pub page: Option<usize>,
}

fn lenient_page<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}

impl SearchParams {
    pub fn new(query: impl Into<String>, page: usize) -> Self {
        Self {
            query: Some(query.into()),
            page: Some(page),
        }
    }

    /// Search term with surrounding whitespace removed
    pub fn term(&self) -> &str {
        self.query.as_deref().map(str::trim).unwrap_or("")
    }

    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub per_page: usize,

    /// Total number of matching items
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,
}

impl PaginationMeta {
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        Self {
            page,
            per_page,
            total,
            total_pages: total_pages(total, per_page),
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// `ceil(total / per_page)`
pub fn total_pages(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// Offset of the first row on `page`
pub fn offset(page: usize, per_page: usize) -> usize {
    page.saturating_sub(1).saturating_mul(per_page)
}

/// Page links to show for the pagination widget
///
/// Returns `None` entries for ellipses. Up to seven pages are listed in
/// full; beyond that the first and last pages stay visible around the
/// current one.
pub fn page_window(current: usize, total_pages: usize) -> Vec<Option<usize>> {
    if total_pages <= 7 {
        return (1..=total_pages).map(Some).collect();
    }
    if current <= 3 {
        return vec![Some(1), Some(2), Some(3), None, Some(total_pages - 1), Some(total_pages)];
    }
    if current >= total_pages - 2 {
        return vec![
            Some(1),
            Some(2),
            None,
            Some(total_pages - 2),
            Some(total_pages - 1),
            Some(total_pages),
        ];
    }
    vec![
        Some(1),
        None,
        Some(current - 1),
        Some(current),
        Some(current + 1),
        None,
        Some(total_pages),
    ]
}
