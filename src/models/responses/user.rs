//! Hyperlinked user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::User;
use crate::utils::hyperlinks::Links;

/// User data returned in API responses
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct UserResponse {
    /// Absolute URL of this user
    #[schema(example = "http://localhost:8080/api/users/507f1f77bcf86cd799439011/")]
    pub url: String,
    /// User's username
    #[schema(example = "johndoe")]
    pub username: String,
    /// User's email address, may be blank
    #[schema(example = "john@example.com")]
    pub email: String,
    /// Absolute URLs of the user's groups
    #[schema(example = json!(["http://localhost:8080/api/groups/507f1f77bcf86cd799439012/"]))]
    pub groups: Vec<String>,
}

impl UserResponse {
    pub fn new(user: User, links: &Links) -> Self {
        Self {
            url: links.user(&user.id),
            groups: user.groups.iter().map(|id| links.group(id)).collect(),
            username: user.username,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_exposes_exactly_user_fields() {
        let links = Links::new("http://testserver");
        let group_id = ObjectId::new();
        let user = User::new("alice".into(), "alice@example.com".into(), vec![group_id]);
        let user_id = user.id;

        let value = serde_json::to_value(UserResponse::new(user, &links)).unwrap();
        let object = value.as_object().unwrap();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();

        assert_eq!(keys.len(), 4);
        for key in ["url", "username", "email", "groups"] {
            assert!(object.contains_key(key), "missing {}", key);
        }
        assert_eq!(
            value["url"],
            format!("http://testserver/api/users/{}/", user_id.to_hex())
        );
        assert_eq!(
            value["groups"][0],
            format!("http://testserver/api/groups/{}/", group_id.to_hex())
        );
    }

    #[test]
    fn test_blank_email_is_kept() {
        let links = Links::new("http://testserver");
        let user = User::new("bob".into(), String::new(), vec![]);

        let response = UserResponse::new(user, &links);
        assert_eq!(response.email, "");
        assert!(response.groups.is_empty());
    }
}
