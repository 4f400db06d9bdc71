//! Request models for API endpoints.

pub mod group;
pub mod user;

pub use group::*;
pub use user::*;
