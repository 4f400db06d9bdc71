//! User document model.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// User document stored in the `users` collection
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    /// Ids of the groups this user belongs to, distinct and sorted
    #[serde(default)]
    pub groups: Vec<ObjectId>,
}

impl User {
    /// Build a new user with a freshly generated id.
    pub fn new(username: String, email: String, mut groups: Vec<ObjectId>) -> Self {
        normalize_memberships(&mut groups);
        Self {
            id: ObjectId::new(),
            username,
            email,
            groups,
        }
    }

    /// Replace the writable fields, keeping the id.
    pub fn apply(&mut self, username: String, email: String, mut groups: Vec<ObjectId>) {
        normalize_memberships(&mut groups);
        self.username = username;
        self.email = email;
        self.groups = groups;
    }
}

fn normalize_memberships(groups: &mut Vec<ObjectId>) {
    groups.sort();
    groups.dedup();
}
