//! User service for listing, retrieving and writing users.

use std::sync::Arc;

use log::{debug, info, warn};
use mongodb::bson::oid::ObjectId;

use crate::constants::{
    CODE_USERNAME_EXISTS, CODE_VALIDATION_FAILED, ERR_HYPERLINK_DOES_NOT_EXIST,
    ERR_HYPERLINK_NO_MATCH, ERR_USERNAME_EXISTS,
};
use crate::errors::ApiError;
use crate::models::{User, UserRequest};
use crate::pagination::{PageNumberPagination, PageParams, PageWindow};
use crate::repositories::{GroupStore, UserStore};
use crate::utils::hyperlinks::parse_group_link;
use crate::utils::log_sanitizer::{mask_email, mask_username};

use super::{not_found, parse_id};

pub struct UserService {
    users: Arc<dyn UserStore>,
    groups: Arc<dyn GroupStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, groups: Arc<dyn GroupStore>) -> Self {
        Self { users, groups }
    }

    /// Resolve the requested page and load the users on it.
    pub async fn list_users(
        &self,
        pagination: &PageNumberPagination,
        params: &PageParams,
    ) -> Result<(PageWindow, Vec<User>), ApiError> {
        let total = self.users.count().await?;
        let window = pagination.window(params, total)?;
        debug!(
            "Listing users page {}/{} (size {})",
            window.number, window.num_pages, window.page_size
        );

        let users = self
            .users
            .find_page(window.offset(), window.page_size)
            .await?;
        Ok((window, users))
    }

    pub async fn get_user(&self, id: &str) -> Result<User, ApiError> {
        debug!("Fetching user by ID: {}", id);
        let object_id = parse_id(id)?;
        self.users.find_by_id(object_id).await?.ok_or_else(|| {
            warn!("User not found with id: {}", id);
            not_found()
        })
    }

    pub async fn create_user(&self, req: UserRequest) -> Result<User, ApiError> {
        if self.users.find_by_username(&req.username).await?.is_some() {
            warn!(
                "Create failed: username {} already taken",
                mask_username(&req.username)
            );
            return Err(ApiError::conflict(CODE_USERNAME_EXISTS, ERR_USERNAME_EXISTS));
        }

        let groups = self
            .resolve_groups(req.groups.as_deref().unwrap_or_default())
            .await?;
        let mut user = User::new(req.username, req.email.unwrap_or_default(), groups);
        self.users.insert(&user).await?;
        self.drop_vanished_groups(&mut user).await?;

        info!(
            "Created user {} ({}) with {} group(s)",
            mask_username(&user.username),
            mask_email(&user.email),
            user.groups.len()
        );
        Ok(user)
    }

    /// Replace a user's username, email and memberships. An omitted email or
    /// group list keeps the stored value.
    pub async fn update_user(&self, id: &str, req: UserRequest) -> Result<User, ApiError> {
        let mut user = self.get_user(id).await?;

        if req.username != user.username {
            if let Some(other) = self.users.find_by_username(&req.username).await? {
                if other.id != user.id {
                    warn!(
                        "Update failed: username {} already taken by another user",
                        mask_username(&req.username)
                    );
                    return Err(ApiError::conflict(CODE_USERNAME_EXISTS, ERR_USERNAME_EXISTS));
                }
            }
        }

        let groups = match &req.groups {
            Some(links) => self.resolve_groups(links).await?,
            None => user.groups.clone(),
        };
        let email = req.email.unwrap_or_else(|| user.email.clone());
        user.apply(req.username, email, groups);

        if !self.users.replace(&user).await? {
            return Err(not_found());
        }
        self.drop_vanished_groups(&mut user).await?;
        info!("Updated user: {}", id);
        Ok(user)
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        let object_id = parse_id(id)?;
        if !self.users.delete(object_id).await? {
            warn!("Delete failed: user not found with id: {}", id);
            return Err(not_found());
        }
        info!("Deleted user: {}", id);
        Ok(())
    }

    /// Undo memberships of groups deleted while `user` was being written.
    ///
    /// A group removed between link resolution and the write has already
    /// run its membership cleanup, so it is pulled again here.
    async fn drop_vanished_groups(&self, user: &mut User) -> Result<(), ApiError> {
        let mut vanished = Vec::new();
        for id in &user.groups {
            if self.groups.find_by_id(*id).await?.is_none() {
                vanished.push(*id);
            }
        }
        for id in &vanished {
            warn!("Group {} was deleted during write of user {}", id, user.id);
            self.users.remove_group(*id).await?;
        }
        user.groups.retain(|id| !vanished.contains(id));
        Ok(())
    }

    /// Turn group hyperlinks into ids, reporting every link that does not resolve.
    async fn resolve_groups(&self, links: &[String]) -> Result<Vec<ObjectId>, ApiError> {
        let mut ids = Vec::with_capacity(links.len());
        let mut errors = Vec::new();

        for link in links {
            let Some(id) = parse_group_link(link) else {
                errors.push(format!("groups: {}", ERR_HYPERLINK_NO_MATCH));
                continue;
            };
            if self.groups.find_by_id(id).await?.is_none() {
                errors.push(format!("groups: {}", ERR_HYPERLINK_DOES_NOT_EXIST));
                continue;
            }
            ids.push(id);
        }

        if !errors.is_empty() {
            warn!("Rejected group hyperlinks: {:?}", errors);
            return Err(ApiError::validation(CODE_VALIDATION_FAILED, errors));
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Group;
    use crate::repositories::MemoryStore;
    use crate::utils::hyperlinks::Links;

    fn service() -> (UserService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (UserService::new(store.clone(), store.clone()), store)
    }

    fn request(username: &str, groups: Vec<String>) -> UserRequest {
        UserRequest {
            username: username.to_string(),
            email: Some(format!("{}@example.com", username)),
            groups: Some(groups),
        }
    }

    #[actix_web::test]
    async fn test_create_resolves_group_links() {
        let (service, store) = service();
        let group = Group::new("staff".into());
        GroupStore::insert(store.as_ref(), &group).await.unwrap();
        let link = Links::new("http://testserver").group(&group.id);

        let user = service
            .create_user(request("alice", vec![link.clone(), link]))
            .await
            .unwrap();

        assert_eq!(user.groups, vec![group.id]);
        assert_eq!(service.get_user(&user.id.to_hex()).await.unwrap(), user);
    }

    #[actix_web::test]
    async fn test_create_rejects_duplicate_username() {
        let (service, _) = service();
        service.create_user(request("alice", vec![])).await.unwrap();

        let err = service.create_user(request("alice", vec![])).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict { .. }));
    }

    #[actix_web::test]
    async fn test_create_reports_each_bad_link() {
        let (service, _) = service();
        let missing = Links::new("http://testserver").group(&ObjectId::new());

        let err = service
            .create_user(request("alice", vec!["http://testserver/nope/".into(), missing]))
            .await
            .unwrap_err();

        match err {
            ApiError::ValidationError { errors, .. } => {
                assert_eq!(
                    errors,
                    vec![
                        format!("groups: {}", ERR_HYPERLINK_NO_MATCH),
                        format!("groups: {}", ERR_HYPERLINK_DOES_NOT_EXIST),
                    ]
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(UserStore::count(&*service.users).await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_update_keeps_own_username() {
        let (service, _) = service();
        let user = service.create_user(request("alice", vec![])).await.unwrap();

        let mut req = request("alice", vec![]);
        req.email = Some(String::new());
        let updated = service.update_user(&user.id.to_hex(), req).await.unwrap();

        assert_eq!(updated.id, user.id);
        assert_eq!(updated.email, "");
    }

    #[actix_web::test]
    async fn test_create_defaults_omitted_fields() {
        let (service, _) = service();
        let req = UserRequest {
            username: "alice".into(),
            email: None,
            groups: None,
        };

        let user = service.create_user(req).await.unwrap();
        assert_eq!(user.email, "");
        assert!(user.groups.is_empty());
    }

    #[actix_web::test]
    async fn test_update_keeps_omitted_fields() {
        let (service, store) = service();
        let group = Group::new("staff".into());
        GroupStore::insert(store.as_ref(), &group).await.unwrap();
        let link = Links::new("http://testserver").group(&group.id);
        let user = service
            .create_user(request("alice", vec![link]))
            .await
            .unwrap();

        let req = UserRequest {
            username: "alice2".into(),
            email: None,
            groups: None,
        };
        let updated = service.update_user(&user.id.to_hex(), req).await.unwrap();

        assert_eq!(updated.username, "alice2");
        assert_eq!(updated.email, "alice@example.com");
        assert_eq!(updated.groups, vec![group.id]);
        assert_eq!(service.get_user(&user.id.to_hex()).await.unwrap(), updated);
    }

    #[actix_web::test]
    async fn test_update_clears_given_fields() {
        let (service, store) = service();
        let group = Group::new("staff".into());
        GroupStore::insert(store.as_ref(), &group).await.unwrap();
        let link = Links::new("http://testserver").group(&group.id);
        let user = service
            .create_user(request("alice", vec![link]))
            .await
            .unwrap();

        let req = UserRequest {
            username: "alice".into(),
            email: Some(String::new()),
            groups: Some(vec![]),
        };
        let updated = service.update_user(&user.id.to_hex(), req).await.unwrap();

        assert_eq!(updated.email, "");
        assert!(updated.groups.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_keep_username_unique() {
        for _ in 0..50 {
            let store = Arc::new(MemoryStore::new());
            let service = Arc::new(UserService::new(store.clone(), store.clone()));

            let tasks: Vec<_> = (0..8)
                .map(|_| {
                    let service = service.clone();
                    tokio::spawn(async move { service.create_user(request("alice", vec![])).await })
                })
                .collect();

            let mut created = 0;
            for task in tasks {
                match task.await.unwrap() {
                    Ok(_) => created += 1,
                    Err(err) => assert!(matches!(err, ApiError::Conflict { .. })),
                }
            }
            assert_eq!(created, 1);
            assert_eq!(UserStore::count(store.as_ref()).await.unwrap(), 1);
        }
    }

    #[actix_web::test]
    async fn test_write_drops_group_deleted_mid_request() {
        let (service, store) = service();
        let kept = Group::new("kept".into());
        let doomed = Group::new("doomed".into());
        GroupStore::insert(store.as_ref(), &kept).await.unwrap();
        GroupStore::insert(store.as_ref(), &doomed).await.unwrap();

        // Links already resolved when the group goes away.
        let mut user = User::new("alice".into(), String::new(), vec![kept.id, doomed.id]);
        GroupStore::delete(store.as_ref(), doomed.id).await.unwrap();
        store.remove_group(doomed.id).await.unwrap();
        UserStore::insert(store.as_ref(), &user).await.unwrap();

        service.drop_vanished_groups(&mut user).await.unwrap();

        assert_eq!(user.groups, vec![kept.id]);
        let stored = UserStore::find_by_id(store.as_ref(), user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.groups, vec![kept.id]);
    }

    #[actix_web::test]
    async fn test_update_rejects_taken_username() {
        let (service, _) = service();
        service.create_user(request("alice", vec![])).await.unwrap();
        let bob = service.create_user(request("bob", vec![])).await.unwrap();

        let err = service
            .update_user(&bob.id.to_hex(), request("alice", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict { .. }));
    }

    #[actix_web::test]
    async fn test_unknown_and_malformed_ids_are_not_found() {
        let (service, _) = service();

        for id in ["not-an-id".to_string(), ObjectId::new().to_hex()] {
            assert!(matches!(
                service.get_user(&id).await.unwrap_err(),
                ApiError::NotFound { .. }
            ));
            assert!(matches!(
                service.delete_user(&id).await.unwrap_err(),
                ApiError::NotFound { .. }
            ));
        }
    }

    #[actix_web::test]
    async fn test_list_users_pages() {
        let (service, _) = service();
        for i in 0..7 {
            service
                .create_user(request(&format!("user{}", i), vec![]))
                .await
                .unwrap();
        }
        let pagination = PageNumberPagination::default();
        let params = pagination.params("limit=3&page=last");

        let (window, users) = service.list_users(&pagination, &params).await.unwrap();

        assert_eq!(window.number, 3);
        assert_eq!(window.count, 7);
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "user6");
    }
}
