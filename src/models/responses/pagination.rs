//! Pagination response models.

use serde::Serialize;
use utoipa::ToSchema;

/// One page of a list endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T: Serialize> {
    /// Total number of items across all pages
    pub count: u64,
    /// URL of the next page, if any
    pub next: Option<String>,
    /// URL of the previous page, if any
    pub previous: Option<String>,
    /// Items on this page
    pub results: Vec<T>,
}
