//! Route segments shared by the router and the hyperlink builder.

pub const API_PREFIX: &str = "/api";
pub const USERS_SEGMENT: &str = "users";
pub const GROUPS_SEGMENT: &str = "groups";
