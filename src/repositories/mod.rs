//! Repository layer for database operations.
//!
//! Services talk to storage through the [`UserStore`] and [`GroupStore`]
//! traits. MongoDB backs them in production; [`MemoryStore`] keeps everything
//! in process for local runs and tests.

pub mod group_repository;
pub mod memory;
pub mod user_repository;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};

use crate::errors::ApiError;
use crate::models::{Group, User};

pub use group_repository::GroupRepository;
pub use memory::MemoryStore;
pub use user_repository::UserRepository;

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

/// Map a driver error on a write, turning unique index violations into
/// `conflict`.
pub(crate) fn write_error(err: MongoError, conflict: impl FnOnce() -> ApiError) -> ApiError {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY => conflict(),
        _ => err.into(),
    }
}

/// Storage operations for users. Listings are ordered by id ascending.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create indexes or other storage structures. Called once at startup.
    async fn create_indexes(&self) -> Result<(), ApiError> {
        Ok(())
    }

    async fn count(&self) -> Result<u64, ApiError>;

    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<User>, ApiError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, ApiError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError>;

    /// Fails with a conflict when the username is taken.
    async fn insert(&self, user: &User) -> Result<(), ApiError>;

    /// Returns false when no user with that id exists. Fails with a conflict
    /// when another user holds the username.
    async fn replace(&self, user: &User) -> Result<bool, ApiError>;

    /// Returns false when no user with that id exists.
    async fn delete(&self, id: ObjectId) -> Result<bool, ApiError>;

    /// Drop a group from every user's memberships, returning how many users changed.
    async fn remove_group(&self, group_id: ObjectId) -> Result<u64, ApiError>;
}

/// Storage operations for groups. Listings are ordered by id ascending.
#[async_trait]
pub trait GroupStore: Send + Sync {
    async fn create_indexes(&self) -> Result<(), ApiError> {
        Ok(())
    }

    async fn count(&self) -> Result<u64, ApiError>;

    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<Group>, ApiError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Group>, ApiError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Group>, ApiError>;

    /// Fails with a conflict when the name is taken.
    async fn insert(&self, group: &Group) -> Result<(), ApiError>;

    async fn replace(&self, group: &Group) -> Result<bool, ApiError>;

    async fn delete(&self, id: ObjectId) -> Result<bool, ApiError>;
}
