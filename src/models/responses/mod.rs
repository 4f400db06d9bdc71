//! Response models for API endpoints.

pub mod api;
pub mod group;
pub mod pagination;
pub mod user;

pub use api::*;
pub use group::*;
pub use pagination::*;
pub use user::*;
