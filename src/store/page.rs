//! Page windows over the identifier-ordered record sequence

use serde::Serialize;

use super::errors::{StoreError, StoreResult};

/// A validated 1-indexed page request.
///
/// The window covers positions `offset() .. offset() + page_size` of the
/// records sorted by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: usize,
    page_size: usize,
}

impl PageWindow {
    /// Default page size when the caller gives none
    pub const DEFAULT_PAGE_SIZE: usize = 10;

    /// Create a window; both inputs must be at least 1
    pub fn new(page: usize, page_size: usize) -> StoreResult<Self> {
        if page == 0 || page_size == 0 {
            return Err(StoreError::InvalidPage { page, page_size });
        }
        Ok(Self { page, page_size })
    }

    /// Returns the 1-indexed page number
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Position of the first record in the window, saturating
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of records together with the total they were cut from.
///
/// Serializes as `page`, `page_size`, `total` and a generic `items` list.
/// A transport that wants a record-specific key such as `tasks` maps it
/// itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination<R> {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub items: Vec<R>,
}

impl<R> Pagination<R> {
    /// Returns true if a later page could hold records
    pub fn has_more(&self) -> bool {
        self.page
            .checked_mul(self.page_size)
            .is_some_and(|end| end < self.total)
    }
}
