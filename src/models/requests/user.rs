//! User-related request models.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::validators::{validate_optional_email, validate_username_format};

/// Request payload for creating or replacing a user
///
/// `email` and `groups` may be omitted. On create they default to blank and
/// no groups; on update the stored values are kept.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    /// Unique username (1-150 characters: letters, digits and @/./+/-/_)
    #[validate(
        length(min = 1, max = 150, message = "Username must be between 1 and 150 characters"),
        custom(function = "validate_username_format")
    )]
    #[schema(example = "johndoe")]
    pub username: String,
    /// Email address (at most 254 characters), may be blank
    #[validate(
        length(max = 254, message = "Email must be at most 254 characters"),
        custom(function = "validate_optional_email")
    )]
    #[schema(example = "john@example.com")]
    pub email: Option<String>,
    /// Hyperlinks of the groups the user belongs to
    #[schema(example = json!(["http://localhost:8080/api/groups/507f1f77bcf86cd799439011/"]))]
    pub groups: Option<Vec<String>>,
}

impl UserRequest {
    /// Strip surrounding whitespace from the text fields.
    pub fn normalize(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self.email = self.email.map(|email| email.trim().to_string());
        self
    }
}
