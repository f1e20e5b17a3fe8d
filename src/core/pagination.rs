//! Pagination utilities

use serde::Serialize;

/// Number of items per listing page
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Maximum number of page buttons rendered by pagination controls
pub const DEFAULT_PAGE_WINDOW: usize = 5;

/// Paginated response structure
///
/// This structure wraps the visible slice with metadata about pagination state.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// The visible items
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number after clamping (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages, never below 1
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata, clamping `page` into `[1, total_pages]`
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        // Ensure limit is at least 1 to avoid division by zero
        let limit = limit.max(1);
        let total_pages = total.div_ceil(limit).max(1);
        let page = page.clamp(1, total_pages);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index range of the visible slice within the filtered list
    pub fn bounds(&self) -> std::ops::Range<usize> {
        let start = ((self.page - 1) * self.limit).min(self.total);
        let end = (start + self.limit).min(self.total);
        start..end
    }

    /// Page numbers to render as buttons: at most `width` contiguous pages
    /// centred on the current one, shifted to stay inside `[1, total_pages]`
    pub fn window(&self, width: usize) -> Vec<usize> {
        let width = width.max(1);
        let half = width / 2;
        let latest_start = self.total_pages.saturating_sub(width - 1).max(1);
        let start = self.page.saturating_sub(half).min(latest_start).max(1);
        let end = (start + width - 1).min(self.total_pages);
        (start..=end).collect()
    }
}
