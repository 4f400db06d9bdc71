use utoipa::OpenApi;

use crate::errors::ErrorResponse;
use crate::models::{
    ApiRootResponse, GroupRequest, GroupResponse, HealthResponse, PaginatedResponse,
    UserRequest, UserResponse,
};

/// OpenAPI documentation for the user and group API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "GAR API",
        version = "0.1.0",
        description = "Hyperlinked REST API exposing users and groups, paginated by page number with a client-selectable `limit`.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "Root", description = "API entry point"),
        (name = "Health", description = "Health check endpoints"),
        (name = "Users", description = "Hyperlinked user resources"),
        (name = "Groups", description = "Hyperlinked group resources")
    ),
    paths(
        crate::handlers::api_root,
        crate::handlers::health_check,
        crate::handlers::list_users,
        crate::handlers::get_user,
        crate::handlers::create_user,
        crate::handlers::update_user,
        crate::handlers::delete_user,
        crate::handlers::list_groups,
        crate::handlers::get_group,
        crate::handlers::create_group,
        crate::handlers::update_group,
        crate::handlers::delete_group
    ),
    components(
        schemas(
            UserRequest,
            GroupRequest,
            UserResponse,
            GroupResponse,
            PaginatedResponse<UserResponse>,
            PaginatedResponse<GroupResponse>,
            ApiRootResponse,
            HealthResponse,
            ErrorResponse
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_list_endpoints_with_limit() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).unwrap();

        let params = &json["paths"]["/api/users/"]["get"]["parameters"];
        let names: Vec<&str> = params
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|p| p["name"].as_str())
            .collect();
        assert_eq!(names, vec!["page", "limit"]);
        assert!(json["paths"]["/api/groups/{id}/"]["delete"].is_object());
    }
}
