//! Services organized by domain concern.

pub mod group_service;
pub mod user_service;

pub use group_service::GroupService;
pub use user_service::UserService;

use mongodb::bson::oid::ObjectId;

use crate::constants::{CODE_NOT_FOUND, ERR_NOT_FOUND};
use crate::errors::ApiError;

/// Ids in detail routes that are not ObjectIds cannot name anything.
fn parse_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| not_found())
}

fn not_found() -> ApiError {
    ApiError::not_found(CODE_NOT_FOUND, ERR_NOT_FOUND)
}
