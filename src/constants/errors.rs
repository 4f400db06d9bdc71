//! Error message constants used throughout the application.

// Request errors
pub const ERR_INVALID_HOST: &str = "Invalid host header.";

// Lookup errors
pub const ERR_NOT_FOUND: &str = "Not found.";
pub const ERR_INVALID_PAGE: &str = "Invalid page.";

// Uniqueness errors
pub const ERR_USERNAME_EXISTS: &str = "A user with that username already exists.";
pub const ERR_GROUP_NAME_EXISTS: &str = "group with this name already exists.";

// Hyperlink errors
pub const ERR_HYPERLINK_NO_MATCH: &str = "Invalid hyperlink - No URL match.";
pub const ERR_HYPERLINK_DOES_NOT_EXIST: &str = "Invalid hyperlink - Object does not exist.";

// Validation errors
pub const ERR_VALIDATION_FAILED: &str = "Validation failed";
pub const ERR_INVALID_USERNAME_FORMAT: &str =
    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";
pub const ERR_INVALID_EMAIL: &str = "Enter a valid email address.";
