//! User repository for all MongoDB operations related to users.

use async_trait::async_trait;
use futures::TryStreamExt;
use log::{debug, info};
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};

use crate::constants::{COLLECTION_USERS, CODE_USERNAME_EXISTS, ERR_USERNAME_EXISTS};
use crate::errors::ApiError;
use crate::models::User;

use super::{write_error, UserStore};

fn username_taken() -> ApiError {
    ApiError::conflict(CODE_USERNAME_EXISTS, ERR_USERNAME_EXISTS)
}

/// MongoDB-backed user storage.
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_USERS),
        }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    /// Creates a unique index on `username` and an index on `groups` for
    /// membership cleanup.
    async fn create_indexes(&self) -> Result<(), ApiError> {
        info!("Creating database indexes for users collection...");

        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "username": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder().keys(doc! { "groups": 1 }).build(),
        ];

        self.collection.create_indexes(indexes).await?;
        info!("User indexes created successfully");
        Ok(())
    }

    async fn count(&self) -> Result<u64, ApiError> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<User>, ApiError> {
        debug!("Repository: Finding users skip={} limit={}", skip, limit);
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .skip(skip)
            .limit(limit as i64)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, ApiError> {
        debug!("Repository: Finding user by ID: {}", id);
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .collection
            .find_one(doc! { "username": username })
            .await?)
    }

    async fn insert(&self, user: &User) -> Result<(), ApiError> {
        self.collection
            .insert_one(user)
            .await
            .map_err(|e| write_error(e, username_taken))?;
        Ok(())
    }

    async fn replace(&self, user: &User) -> Result<bool, ApiError> {
        let result = self
            .collection
            .replace_one(doc! { "_id": user.id }, user)
            .await
            .map_err(|e| write_error(e, username_taken))?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, ApiError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn remove_group(&self, group_id: ObjectId) -> Result<u64, ApiError> {
        let result = self
            .collection
            .update_many(
                doc! { "groups": group_id },
                doc! { "$pull": { "groups": group_id } },
            )
            .await?;
        Ok(result.modified_count)
    }
}
