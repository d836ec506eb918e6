//! Page math for the feed.

use serde::{Deserialize, Serialize};

/// Items per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Number of pages needed to show `total` items, never less than 1.
pub fn total_pages(total: u32, page_size: u32) -> u32 {
    let page_size = page_size.max(1);
    total.div_ceil(page_size).max(1)
}

/// Clamp a requested page into `[1, total_pages]`.
pub fn clamp_page(requested: i64, total_pages: u32) -> u32 {
    requested.clamp(1, i64::from(total_pages.max(1))) as u32
}

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    /// Total number of items.
    pub total: u32,
    /// Total number of pages.
    pub total_pages: u32,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info. `page` is clamped into range.
    pub fn new(page: u32, page_size: u32, total: u32) -> Self {
        let total_pages = total_pages(total, page_size);
        let page = clamp_page(i64::from(page), total_pages);

        Self {
            page,
            page_size: page_size.max(1),
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Get start item number (1-indexed).
    pub fn start_item(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> u32 {
        (self.page * self.page_size).min(self.total)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE, 0)
    }
}
