//! Common functionality for paging the transaction listing.

use serde::Serialize;

/// The config that controls how transaction listings are paged.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of transactions per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// The pagination metadata returned alongside a page of transactions.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// The page that was returned.
    pub current_page: u64,
    /// The number of pages the filtered set spans.
    pub total_pages: u64,
    /// The number of transactions matching the filter across all pages.
    pub total_transactions: u64,
    /// Whether a later page exists.
    pub has_next_page: bool,
    /// Whether an earlier page exists.
    pub has_prev_page: bool,
}

impl Pagination {
    /// Compute the metadata for the page `current_page` of `page_size`
    /// records over a filtered set of `total_transactions`.
    pub fn new(current_page: u64, page_size: u64, total_transactions: u64) -> Self {
        let total_pages = total_transactions.div_ceil(page_size.max(1));

        Self {
            current_page,
            total_pages,
            total_transactions,
            has_next_page: current_page < total_pages,
            has_prev_page: current_page > 1,
        }
    }
}
