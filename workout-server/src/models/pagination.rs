//! Pagination types
//!
//! Envelope: `{items, total, page, size, pages}`.

use serde::{Deserialize, Serialize};

/// Maximum items per page
const MAX_SIZE: u32 = 100;

/// Default items per page
const DEFAULT_SIZE: u32 = 50;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page (max 100)
    pub size: u32,
}

impl Pagination {
    /// Create pagination with validation.
    ///
    /// - Page is clamped to minimum of 1
    /// - Size is clamped to 1..=100
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size: size.clamp(1, MAX_SIZE),
        }
    }

    /// Calculate SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        (u64::from(self.page - 1) * u64::from(self.size)) as i64
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_SIZE,
        }
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Items for current page
    pub items: Vec<T>,
    /// Total count across all pages
    pub total: i64,
    /// Current page number
    pub page: u32,
    /// Items per page
    pub size: u32,
    /// Total number of pages (0 when there are no items)
    pub pages: u32,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: i64, page: Pagination) -> Self {
        Self {
            items,
            total,
            page: page.page,
            size: page.size,
            pages: total_pages(total, page.size),
        }
    }

    /// Convert the items while keeping the envelope.
    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
            pages: self.pages,
        }
    }
}

fn total_pages(total: i64, size: u32) -> u32 {
    if total <= 0 {
        return 0;
    }
    let size = i64::from(size.max(1));
    ((total + size - 1) / size) as u32
}

/// Query parameters for pagination
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        Self::new(params.page.unwrap_or(1), params.size.unwrap_or(DEFAULT_SIZE))
    }
}
