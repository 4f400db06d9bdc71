//! Group-related request models.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for creating or replacing a group
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GroupRequest {
    /// Unique group name (1-150 characters)
    #[validate(length(min = 1, max = 150, message = "Name must be between 1 and 150 characters"))]
    #[schema(example = "editors")]
    pub name: String,
}

impl GroupRequest {
    pub fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }
}
