//! Group service for listing, retrieving and writing groups.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::constants::{CODE_GROUP_NAME_EXISTS, ERR_GROUP_NAME_EXISTS};
use crate::errors::ApiError;
use crate::models::{Group, GroupRequest};
use crate::pagination::{PageNumberPagination, PageParams, PageWindow};
use crate::repositories::{GroupStore, UserStore};

use super::{not_found, parse_id};

pub struct GroupService {
    groups: Arc<dyn GroupStore>,
    users: Arc<dyn UserStore>,
}

impl GroupService {
    pub fn new(groups: Arc<dyn GroupStore>, users: Arc<dyn UserStore>) -> Self {
        Self { groups, users }
    }

    pub async fn list_groups(
        &self,
        pagination: &PageNumberPagination,
        params: &PageParams,
    ) -> Result<(PageWindow, Vec<Group>), ApiError> {
        let total = self.groups.count().await?;
        let window = pagination.window(params, total)?;
        debug!(
            "Listing groups page {}/{} (size {})",
            window.number, window.num_pages, window.page_size
        );

        let groups = self
            .groups
            .find_page(window.offset(), window.page_size)
            .await?;
        Ok((window, groups))
    }

    pub async fn get_group(&self, id: &str) -> Result<Group, ApiError> {
        let object_id = parse_id(id)?;
        self.groups.find_by_id(object_id).await?.ok_or_else(|| {
            warn!("Group not found with id: {}", id);
            not_found()
        })
    }

    pub async fn create_group(&self, req: GroupRequest) -> Result<Group, ApiError> {
        if self.groups.find_by_name(&req.name).await?.is_some() {
            warn!("Create failed: group name {} already taken", req.name);
            return Err(ApiError::conflict(CODE_GROUP_NAME_EXISTS, ERR_GROUP_NAME_EXISTS));
        }

        let group = Group::new(req.name);
        self.groups.insert(&group).await?;
        info!("Created group {} ({})", group.name, group.id);
        Ok(group)
    }

    pub async fn update_group(&self, id: &str, req: GroupRequest) -> Result<Group, ApiError> {
        let mut group = self.get_group(id).await?;

        if let Some(other) = self.groups.find_by_name(&req.name).await? {
            if other.id != group.id {
                warn!("Update failed: group name {} already taken", req.name);
                return Err(ApiError::conflict(CODE_GROUP_NAME_EXISTS, ERR_GROUP_NAME_EXISTS));
            }
        }

        group.name = req.name;
        if !self.groups.replace(&group).await? {
            return Err(not_found());
        }
        info!("Updated group: {}", id);
        Ok(group)
    }

    /// Delete a group and drop it from every member's memberships.
    pub async fn delete_group(&self, id: &str) -> Result<(), ApiError> {
        let object_id = parse_id(id)?;
        if !self.groups.delete(object_id).await? {
            warn!("Delete failed: group not found with id: {}", id);
            return Err(not_found());
        }

        let members = self.users.remove_group(object_id).await?;
        info!("Deleted group {} and removed it from {} user(s)", id, members);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::repositories::MemoryStore;

    fn service() -> (GroupService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (GroupService::new(store.clone(), store.clone()), store)
    }

    fn request(name: &str) -> GroupRequest {
        GroupRequest {
            name: name.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_create_and_rename() {
        let (service, _) = service();
        let group = service.create_group(request("staff")).await.unwrap();

        let renamed = service
            .update_group(&group.id.to_hex(), request("editors"))
            .await
            .unwrap();
        assert_eq!(renamed.id, group.id);
        assert_eq!(service.get_group(&group.id.to_hex()).await.unwrap().name, "editors");

        // Renaming to its own name is not a conflict.
        assert!(service
            .update_group(&group.id.to_hex(), request("editors"))
            .await
            .is_ok());
    }

    #[actix_web::test]
    async fn test_duplicate_names_conflict() {
        let (service, _) = service();
        service.create_group(request("staff")).await.unwrap();
        let other = service.create_group(request("editors")).await.unwrap();

        assert!(matches!(
            service.create_group(request("staff")).await.unwrap_err(),
            ApiError::Conflict { .. }
        ));
        assert!(matches!(
            service
                .update_group(&other.id.to_hex(), request("staff"))
                .await
                .unwrap_err(),
            ApiError::Conflict { .. }
        ));
    }

    #[actix_web::test]
    async fn test_delete_removes_memberships() {
        let (service, store) = service();
        let group = service.create_group(request("staff")).await.unwrap();
        let user = User::new("alice".into(), String::new(), vec![group.id]);
        UserStore::insert(store.as_ref(), &user).await.unwrap();

        service.delete_group(&group.id.to_hex()).await.unwrap();

        let reloaded = UserStore::find_by_id(store.as_ref(), user.id)
            .await
            .unwrap()
            .unwrap();
        assert!(reloaded.groups.is_empty());
        assert!(matches!(
            service.delete_group(&group.id.to_hex()).await.unwrap_err(),
            ApiError::NotFound { .. }
        ));
    }
}
