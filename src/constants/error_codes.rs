//! Error code constants for API responses.
//!
//! These codes provide a machine-readable identifier for each error type,
//! making it easier for API clients to handle errors programmatically.

// Request errors
pub const CODE_BAD_REQUEST: &str = "BAD_REQUEST";

// Validation errors
pub const CODE_VALIDATION_FAILED: &str = "VALIDATION_FAILED";
pub const CODE_INVALID_JSON: &str = "INVALID_JSON";

// Lookup errors
pub const CODE_NOT_FOUND: &str = "NOT_FOUND";
pub const CODE_INVALID_PAGE: &str = "INVALID_PAGE";

// Uniqueness errors
pub const CODE_USERNAME_EXISTS: &str = "USERNAME_EXISTS";
pub const CODE_GROUP_NAME_EXISTS: &str = "GROUP_NAME_EXISTS";

// Generic errors
pub const CODE_INTERNAL_ERROR: &str = "INTERNAL_ERROR";
