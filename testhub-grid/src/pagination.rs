//! Pagination controller.
//!
//! The [`Pager`] tracks the current page over a known number of items and
//! computes which slice of the data is visible. In [`PaginationMode::Manual`]
//! the caller hands over one page of rows at a time and supplies the totals;
//! in [`PaginationMode::Automatic`] the pager slices the full dataset itself.

use std::ops::Range;

use crate::error::GridError;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of page buttons shown on each side of the current page.
const PAGE_WINDOW_RADIUS: usize = 2;

/// Who slices the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationMode {
    /// The caller supplies an already-paginated slice plus totals.
    #[default]
    Manual,
    /// The caller supplies the full dataset; the pager slices it.
    Automatic,
}

/// Snapshot of pagination state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Current 1-based page.
    pub current_page: usize,
    /// Rows per page (always > 0).
    pub page_size: usize,
    /// Total number of items across all pages.
    pub total_items: usize,
    /// `ceil(total_items / page_size)`.
    pub total_pages: usize,
}

/// Number of pages needed for `total_items` rows of `page_size`.
///
/// A `page_size` of zero yields zero pages rather than dividing by zero;
/// [`Pager::new`] rejects that size up front.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Pagination state and navigation.
///
/// Navigation never fails: moving past either end is a no-op and jumps are
/// clamped to the valid range.
///
/// # Example
///
/// ```
/// use testhub_grid::{Pager, PaginationMode};
///
/// let mut pager = Pager::new(PaginationMode::Automatic, 1, 10, 25).unwrap();
/// assert_eq!(pager.total_pages(), 3);
///
/// assert_eq!(pager.go_to_page(5), Some(3));
/// assert!(pager.is_last_page());
/// assert_eq!(pager.go_to_page(9), None);
/// assert_eq!(pager.go_to_next_page(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    mode: PaginationMode,
    page: usize,
    page_size: usize,
    total_items: usize,
}

impl Pager {
    /// Create a pager.
    ///
    /// Rejects a zero page size or a zero page. A page past the end is
    /// clamped to the last page.
    pub fn new(
        mode: PaginationMode,
        page: usize,
        page_size: usize,
        total_items: usize,
    ) -> Result<Self, GridError> {
        if page_size == 0 {
            return Err(GridError::InvalidPageSize(page_size));
        }
        if page == 0 {
            return Err(GridError::InvalidPage(page));
        }

        let mut pager = Self {
            mode,
            page,
            page_size,
            total_items,
        };
        pager.clamp();
        Ok(pager)
    }

    fn clamp(&mut self) {
        let total = self.total_pages();
        self.page = if total == 0 {
            1
        } else {
            self.page.clamp(1, total)
        };
    }

    /// Pagination mode.
    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total number of items.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Total number of pages.
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size)
    }

    /// Snapshot of the current state.
    pub fn info(&self) -> PageInfo {
        PageInfo {
            current_page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages(),
        }
    }

    /// True on page 1, or when there are no pages at all.
    pub fn is_first_page(&self) -> bool {
        self.total_pages() == 0 || self.page == 1
    }

    /// True on the last page, or when there are no pages at all.
    pub fn is_last_page(&self) -> bool {
        let total = self.total_pages();
        total == 0 || self.page >= total
    }

    /// Advance one page. Returns the new page, or `None` on the last page.
    pub fn go_to_next_page(&mut self) -> Option<usize> {
        if self.is_last_page() {
            return None;
        }
        self.page += 1;
        Some(self.page)
    }

    /// Go back one page. Returns the new page, or `None` on the first page.
    pub fn go_to_previous_page(&mut self) -> Option<usize> {
        if self.is_first_page() {
            return None;
        }
        self.page -= 1;
        Some(self.page)
    }

    /// Jump to page `n`, clamped to `[1, total_pages]`.
    ///
    /// Returns the clamped page when it differs from the current one, and
    /// `None` when the page does not move or there are no pages.
    pub fn go_to_page(&mut self, n: usize) -> Option<usize> {
        let total = self.total_pages();
        if total == 0 {
            return None;
        }
        let page = n.clamp(1, total);
        if page == self.page {
            return None;
        }
        self.page = page;
        Some(page)
    }

    /// Caller-driven page update (a new `page` prop). Clamped, never reported.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
        self.clamp();
    }

    /// Caller-driven total update (new data or a new `total_docs`).
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.clamp();
    }

    /// Absolute index of the first row on the current page.
    pub fn row_offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Index range of the visible rows within data of length `data_len`.
    ///
    /// Manual mode shows the supplied slice as-is.
    pub fn visible_range(&self, data_len: usize) -> Range<usize> {
        match self.mode {
            PaginationMode::Manual => 0..data_len,
            PaginationMode::Automatic => {
                let start = self.row_offset().min(data_len);
                let end = start.saturating_add(self.page_size).min(data_len);
                start..end
            }
        }
    }

    /// The visible rows of `data`.
    pub fn visible<'a, R>(&self, data: &'a [R]) -> &'a [R] {
        &data[self.visible_range(data.len())]
    }

    /// Page numbers to offer as direct jumps: up to two either side of the
    /// current page. Empty when there are no pages.
    pub fn page_window(&self) -> Vec<usize> {
        let total = self.total_pages();
        if total == 0 {
            return Vec::new();
        }
        let start = self.page.saturating_sub(PAGE_WINDOW_RADIUS).max(1);
        let end = self.page.saturating_add(PAGE_WINDOW_RADIUS).min(total);
        (start..=end).collect()
    }

    /// 1-based `(first, last)` item numbers shown on this page, for a
    /// "Showing first-last of total" summary. `(0, 0)` when nothing is visible.
    pub fn item_range(&self, visible_len: usize) -> (usize, usize) {
        if visible_len == 0 || self.total_items == 0 {
            return (0, 0);
        }
        let start = self.row_offset() + 1;
        let end = (self.row_offset() + visible_len)
            .min(self.total_items)
            .max(start);
        (start, end)
    }
}
