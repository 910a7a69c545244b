//! Pagination metadata for service request listings.
//!
//! The server reports paging through `page-*` response headers. When they are
//! missing (plain GeoReport servers), the listing is treated as one page.

#[cfg(test)]
#[path = "pagination_test.rs"]
mod pagination_test;

use serde::{Deserialize, Serialize};

pub const PAGE_NUMBER_HEADER: &str = "page-pagenumber";
pub const PAGE_SIZE_HEADER: &str = "page-size";
pub const TOTAL_PAGES_HEADER: &str = "page-totalpages";
pub const TOTAL_SIZE_HEADER: &str = "page-totalsize";
pub const OFFSET_HEADER: &str = "page-offset";

/// Position of a listing within the full result set. Page numbers are zero-based.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_size: u64,
    pub offset: u64,
}

pub const EMPTY_PAGINATION: Pagination = Pagination { page_number: 0, page_size: 0, total_pages: 0, total_size: 0, offset: 0 };

impl Pagination {
    /// Read pagination from response headers; `None` unless every header is
    /// present and numeric.
    pub fn from_headers<F>(header: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |name: &str| header(name).and_then(|raw| raw.trim().parse::<u64>().ok());
        Some(Self {
            page_number: u32::try_from(number(PAGE_NUMBER_HEADER)?).ok()?,
            page_size: u32::try_from(number(PAGE_SIZE_HEADER)?).ok()?,
            total_pages: u32::try_from(number(TOTAL_PAGES_HEADER)?).ok()?,
            total_size: number(TOTAL_SIZE_HEADER)?,
            offset: number(OFFSET_HEADER)?,
        })
    }

    /// A listing of `len` items that is the only page.
    #[must_use]
    pub fn single_page(len: usize) -> Self {
        let len = u32::try_from(len).unwrap_or(u32::MAX);
        Self {
            page_number: 0,
            page_size: len,
            total_pages: u32::from(len > 0),
            total_size: u64::from(len),
            offset: 0,
        }
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.page_number.saturating_add(1) < self.total_pages
    }

    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.page_number > 0
    }
}
