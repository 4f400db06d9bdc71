//! In-process storage used with `STORAGE_BACKEND=memory` and in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::constants::{
    CODE_GROUP_NAME_EXISTS, CODE_USERNAME_EXISTS, ERR_GROUP_NAME_EXISTS, ERR_USERNAME_EXISTS,
};
use crate::errors::ApiError;
use crate::models::{Group, User};

use super::{GroupStore, UserStore};

/// Users and groups kept in id-ordered maps.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<BTreeMap<ObjectId, User>>,
    groups: RwLock<BTreeMap<ObjectId, Group>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn page<T: Clone>(items: &BTreeMap<ObjectId, T>, skip: u64, limit: u64) -> Vec<T> {
    items
        .values()
        .skip(skip as usize)
        .take(limit as usize)
        .cloned()
        .collect()
}

/// Unique username, checked under the write lock.
fn username_taken(users: &BTreeMap<ObjectId, User>, user: &User) -> bool {
    users
        .values()
        .any(|u| u.id != user.id && u.username == user.username)
}

fn name_taken(groups: &BTreeMap<ObjectId, Group>, group: &Group) -> bool {
    groups
        .values()
        .any(|g| g.id != group.id && g.name == group.name)
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn count(&self) -> Result<u64, ApiError> {
        Ok(self.users.read().await.len() as u64)
    }

    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<User>, ApiError> {
        Ok(page(&*self.users.read().await, skip, limit))
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, ApiError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), ApiError> {
        let mut users = self.users.write().await;
        if username_taken(&users, user) {
            return Err(ApiError::conflict(CODE_USERNAME_EXISTS, ERR_USERNAME_EXISTS));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn replace(&self, user: &User) -> Result<bool, ApiError> {
        let mut users = self.users.write().await;
        if username_taken(&users, user) {
            return Err(ApiError::conflict(CODE_USERNAME_EXISTS, ERR_USERNAME_EXISTS));
        }
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, ApiError> {
        Ok(self.users.write().await.remove(&id).is_some())
    }

    async fn remove_group(&self, group_id: ObjectId) -> Result<u64, ApiError> {
        let mut changed = 0;
        for user in self.users.write().await.values_mut() {
            let before = user.groups.len();
            user.groups.retain(|id| *id != group_id);
            if user.groups.len() != before {
                changed += 1;
            }
        }
        Ok(changed)
    }
}

#[async_trait]
impl GroupStore for MemoryStore {
    async fn count(&self) -> Result<u64, ApiError> {
        Ok(self.groups.read().await.len() as u64)
    }

    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<Group>, ApiError> {
        Ok(page(&*self.groups.read().await, skip, limit))
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Group>, ApiError> {
        Ok(self.groups.read().await.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Group>, ApiError> {
        Ok(self
            .groups
            .read()
            .await
            .values()
            .find(|g| g.name == name)
            .cloned())
    }

    async fn insert(&self, group: &Group) -> Result<(), ApiError> {
        let mut groups = self.groups.write().await;
        if name_taken(&groups, group) {
            return Err(ApiError::conflict(CODE_GROUP_NAME_EXISTS, ERR_GROUP_NAME_EXISTS));
        }
        groups.insert(group.id, group.clone());
        Ok(())
    }

    async fn replace(&self, group: &Group) -> Result<bool, ApiError> {
        let mut groups = self.groups.write().await;
        if name_taken(&groups, group) {
            return Err(ApiError::conflict(CODE_GROUP_NAME_EXISTS, ERR_GROUP_NAME_EXISTS));
        }
        match groups.get_mut(&group.id) {
            Some(existing) => {
                *existing = group.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, ApiError> {
        Ok(self.groups.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_user_pages_follow_id_order() {
        let store = MemoryStore::new();
        for name in ["a", "b", "c", "d", "e"] {
            let user = User::new(name.to_string(), String::new(), vec![]);
            UserStore::insert(&store, &user).await.unwrap();
        }

        assert_eq!(UserStore::count(&store).await.unwrap(), 5);
        let names: Vec<String> = UserStore::find_page(&store, 1, 2)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, vec!["b", "c"]);
        assert!(UserStore::find_page(&store, 5, 2).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_remove_group_updates_members_only() {
        let store = MemoryStore::new();
        let group = Group::new("staff".into());
        GroupStore::insert(&store, &group).await.unwrap();

        let member = User::new("member".into(), String::new(), vec![group.id]);
        let outsider = User::new("outsider".into(), String::new(), vec![]);
        UserStore::insert(&store, &member).await.unwrap();
        UserStore::insert(&store, &outsider).await.unwrap();

        assert_eq!(store.remove_group(group.id).await.unwrap(), 1);
        let reloaded = UserStore::find_by_id(&store, member.id)
            .await
            .unwrap()
            .unwrap();
        assert!(reloaded.groups.is_empty());
    }

    #[actix_web::test]
    async fn test_writes_reject_taken_names() {
        let store = MemoryStore::new();
        let alice = User::new("alice".into(), String::new(), vec![]);
        let mut bob = User::new("bob".into(), String::new(), vec![]);
        UserStore::insert(&store, &alice).await.unwrap();
        UserStore::insert(&store, &bob).await.unwrap();

        let twin = User::new("alice".into(), String::new(), vec![]);
        assert!(matches!(
            UserStore::insert(&store, &twin).await.unwrap_err(),
            ApiError::Conflict { .. }
        ));
        bob.username = "alice".into();
        assert!(matches!(
            UserStore::replace(&store, &bob).await.unwrap_err(),
            ApiError::Conflict { .. }
        ));
        assert!(UserStore::replace(&store, &alice).await.unwrap());
        assert_eq!(UserStore::count(&store).await.unwrap(), 2);

        let staff = Group::new("staff".into());
        GroupStore::insert(&store, &staff).await.unwrap();
        assert!(matches!(
            GroupStore::insert(&store, &Group::new("staff".into())).await.unwrap_err(),
            ApiError::Conflict { .. }
        ));
        assert_eq!(GroupStore::count(&store).await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_replace_and_delete_missing() {
        let store = MemoryStore::new();
        let group = Group::new("ghost".into());

        assert!(!GroupStore::replace(&store, &group).await.unwrap());
        assert!(!GroupStore::delete(&store, group.id).await.unwrap());
        assert!(store.find_by_name("ghost").await.unwrap().is_none());
    }
}
