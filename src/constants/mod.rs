//! Application constants module.
//!
//! This module centralizes the constant strings used throughout the application,
//! including error messages, error codes, collection names, route segments and
//! pagination defaults.

pub mod collections;
pub mod error_codes;
pub mod errors;
pub mod pagination;
pub mod routes;

pub use collections::*;
pub use error_codes::*;
pub use errors::*;
pub use pagination::*;
pub use routes::*;
