//! Group document model.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Group document stored in the `groups` collection
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Group {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
}

impl Group {
    pub fn new(name: String) -> Self {
        Self {
            id: ObjectId::new(),
            name,
        }
    }
}
