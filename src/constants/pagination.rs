//! Pagination constants for list endpoints.

/// Default number of items per page when neither `limit` nor `PAGE_SIZE` is given.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Upper bound applied to any client-supplied `limit`.
pub const MAX_PAGE_SIZE: u64 = 10_000;

/// Query parameter selecting the page number.
pub const PAGE_QUERY_PARAM: &str = "page";

/// Query parameter selecting the page size.
pub const PAGE_SIZE_QUERY_PARAM: &str = "limit";

/// Page values that resolve to the final page.
pub const LAST_PAGE_STRINGS: [&str; 1] = ["last"];
