//! Hyperlinked group representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Group;
use crate::utils::hyperlinks::Links;

/// Group data returned in API responses
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct GroupResponse {
    /// Absolute URL of this group
    #[schema(example = "http://localhost:8080/api/groups/507f1f77bcf86cd799439012/")]
    pub url: String,
    /// Group name
    #[schema(example = "editors")]
    pub name: String,
}

impl GroupResponse {
    pub fn new(group: Group, links: &Links) -> Self {
        Self {
            url: links.group(&group.id),
            name: group.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exposes_exactly_group_fields() {
        let links = Links::new("https://api.example.com/");
        let group = Group::new("editors".into());
        let id = group.id;

        let value = serde_json::to_value(GroupResponse::new(group, &links)).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 2);
        assert_eq!(
            object["url"],
            format!("https://api.example.com/api/groups/{}/", id.to_hex())
        );
        assert_eq!(object["name"], "editors");
    }
}
