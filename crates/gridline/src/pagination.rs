//! Page window and serial numbering.

use serde::{Deserialize, Serialize};

/// Rows-per-page choices offered by the pagination control.
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [5, 10, 25, 50, 100];

/// Current page window, as supplied by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page number.
    pub page_no: usize,
    pub page_size: usize,
    /// Total number of pages, when the host tracks it.
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub total_records: usize,
}

impl Pagination {
    pub fn new(page_no: usize, page_size: usize, total_records: usize) -> Self {
        let mut pagination = Pagination {
            page_no,
            page_size,
            total: 0,
            total_records,
        };
        pagination.total = pagination.page_count();
        pagination
    }

    /// Number of pages needed for all records.
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.total_records.div_ceil(self.page_size)
        }
    }

    /// Number of rows skipped before this page. Saturates on huge page numbers.
    pub fn offset(&self) -> usize {
        self.page_size.saturating_mul(self.page_no.saturating_sub(1))
    }

    /// Update emitted when the user picks a page (0-based control index).
    pub fn page_change(&self, page_index: usize) -> PaginationUpdate {
        PaginationUpdate {
            page_no: Some(page_index + 1),
            page_size: Some(self.page_size),
        }
    }

    /// Update emitted when the user picks a page size; jumps back to page 1.
    pub fn rows_per_page_change(&self, page_size: usize) -> PaginationUpdate {
        PaginationUpdate {
            page_no: Some(1),
            page_size: Some(page_size),
        }
    }

    /// Apply a partial update, as a host would on receiving it.
    pub fn apply(&mut self, update: &PaginationUpdate) {
        if let Some(page_no) = update.page_no {
            self.page_no = page_no;
        }
        if let Some(page_size) = update.page_size {
            self.page_size = page_size;
            self.total = self.page_count();
        }
    }

    /// Inclusive 1-based record range shown on this page, e.g. `(11, 20)`.
    pub fn visible_range(&self) -> (usize, usize) {
        if self.total_records == 0 {
            return (0, 0);
        }
        let first = self.offset().saturating_add(1).min(self.total_records);
        let last = self
            .offset()
            .saturating_add(self.page_size)
            .min(self.total_records);
        (first, last)
    }
}

/// Partial pagination change reported to the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_no: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

/// Display serial number for the row at `index` within the current page.
pub fn serial_number(pagination: Option<&Pagination>, index: usize) -> usize {
    match pagination {
        Some(p) => p.offset().saturating_add(index).saturating_add(1),
        None => index.saturating_add(1),
    }
}
