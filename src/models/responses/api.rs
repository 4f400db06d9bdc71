//! Generic API response models.

use serde::Serialize;
use utoipa::ToSchema;

use crate::utils::hyperlinks::Links;

/// Entry point listing the collection endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiRootResponse {
    /// URL of the user list
    #[schema(example = "http://localhost:8080/api/users/")]
    pub users: String,
    /// URL of the group list
    #[schema(example = "http://localhost:8080/api/groups/")]
    pub groups: String,
}

impl ApiRootResponse {
    pub fn new(links: &Links) -> Self {
        Self {
            users: links.users(),
            groups: links.groups(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status
    #[schema(example = "OK")]
    pub status: String,
    /// Status message
    #[schema(example = "Server is running")]
    pub message: String,
}
