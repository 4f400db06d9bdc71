//! HTTP request handlers organized by domain.

pub mod group_handler;
pub mod root_handler;
pub mod user_handler;

pub use group_handler::*;
pub use root_handler::*;
pub use user_handler::*;
