//! Group repository for all MongoDB operations related to groups.

use async_trait::async_trait;
use futures::TryStreamExt;
use log::{debug, info};
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};

use crate::constants::{COLLECTION_GROUPS, CODE_GROUP_NAME_EXISTS, ERR_GROUP_NAME_EXISTS};
use crate::errors::ApiError;
use crate::models::Group;

use super::{write_error, GroupStore};

fn name_taken() -> ApiError {
    ApiError::conflict(CODE_GROUP_NAME_EXISTS, ERR_GROUP_NAME_EXISTS)
}

/// MongoDB-backed group storage.
pub struct GroupRepository {
    collection: Collection<Group>,
}

impl GroupRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_GROUPS),
        }
    }
}

#[async_trait]
impl GroupStore for GroupRepository {
    async fn create_indexes(&self) -> Result<(), ApiError> {
        info!("Creating database indexes for groups collection...");
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index).await?;
        info!("Group indexes created successfully");
        Ok(())
    }

    async fn count(&self) -> Result<u64, ApiError> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<Group>, ApiError> {
        debug!("Repository: Finding groups skip={} limit={}", skip, limit);
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .skip(skip)
            .limit(limit as i64)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Group>, ApiError> {
        debug!("Repository: Finding group by ID: {}", id);
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Group>, ApiError> {
        Ok(self.collection.find_one(doc! { "name": name }).await?)
    }

    async fn insert(&self, group: &Group) -> Result<(), ApiError> {
        self.collection
            .insert_one(group)
            .await
            .map_err(|e| write_error(e, name_taken))?;
        Ok(())
    }

    async fn replace(&self, group: &Group) -> Result<bool, ApiError> {
        let result = self
            .collection
            .replace_one(doc! { "_id": group.id }, group)
            .await
            .map_err(|e| write_error(e, name_taken))?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, ApiError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
