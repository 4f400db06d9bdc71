//! Group handlers: paginated listing plus retrieve/create/replace/delete.

use actix_web::{web, HttpRequest, HttpResponse};
use log::info;
use validator::Validate;

use crate::errors::ApiError;
use crate::models::{GroupRequest, GroupResponse};
use crate::pagination::PageNumberPagination;
use crate::services::GroupService;
use crate::utils::hyperlinks::{request_url, Links};
use crate::validators::validation_errors_to_api_error;

/// List groups, one page at a time
#[utoipa::path(
    get,
    path = "/api/groups/",
    tag = "Groups",
    params(
        ("page" = Option<String>, Query, description = "Page number, or 'last' (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: PAGE_SIZE, max: 10000)")
    ),
    responses(
        (status = 200, description = "One page of groups", body = crate::models::PaginatedResponse<GroupResponse>),
        (status = 404, description = "Invalid page", body = crate::errors::ErrorResponse)
    )
)]
pub async fn list_groups(
    req: HttpRequest,
    group_service: web::Data<GroupService>,
    pagination: web::Data<PageNumberPagination>,
) -> Result<HttpResponse, ApiError> {
    let params = pagination.params(req.query_string());
    let (window, groups) = group_service.list_groups(&pagination, &params).await?;

    let links = Links::from_request(&req);
    let results: Vec<GroupResponse> = groups
        .into_iter()
        .map(|group| GroupResponse::new(group, &links))
        .collect();

    Ok(HttpResponse::Ok().json(pagination.response(&window, results, &request_url(&req)?)))
}

/// Get a specific group by ID
#[utoipa::path(
    get,
    path = "/api/groups/{id}/",
    tag = "Groups",
    params(
        ("id" = String, Path, description = "Group ID")
    ),
    responses(
        (status = 200, description = "Group found", body = GroupResponse),
        (status = 404, description = "Group not found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn get_group(
    req: HttpRequest,
    group_service: web::Data<GroupService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let group = group_service.get_group(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(GroupResponse::new(group, &Links::from_request(&req))))
}

/// Create a group
#[utoipa::path(
    post,
    path = "/api/groups/",
    tag = "Groups",
    request_body = GroupRequest,
    responses(
        (status = 201, description = "Group created", body = GroupResponse),
        (status = 400, description = "Validation error", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already taken", body = crate::errors::ErrorResponse)
    )
)]
pub async fn create_group(
    req: HttpRequest,
    group_service: web::Data<GroupService>,
    body: web::Json<GroupRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner().normalize();
    body.validate().map_err(validation_errors_to_api_error)?;

    let group = group_service.create_group(body).await?;
    let response = GroupResponse::new(group, &Links::from_request(&req));

    info!("Created group at {}", response.url);
    Ok(HttpResponse::Created()
        .insert_header(("Location", response.url.clone()))
        .json(response))
}

/// Rename a group
#[utoipa::path(
    put,
    path = "/api/groups/{id}/",
    tag = "Groups",
    params(
        ("id" = String, Path, description = "Group ID")
    ),
    request_body = GroupRequest,
    responses(
        (status = 200, description = "Group updated", body = GroupResponse),
        (status = 400, description = "Validation error", body = crate::errors::ErrorResponse),
        (status = 404, description = "Group not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already taken", body = crate::errors::ErrorResponse)
    )
)]
pub async fn update_group(
    req: HttpRequest,
    group_service: web::Data<GroupService>,
    path: web::Path<String>,
    body: web::Json<GroupRequest>,
) -> Result<HttpResponse, ApiError> {
    let group_id = path.into_inner();
    let body = body.into_inner().normalize();
    body.validate().map_err(validation_errors_to_api_error)?;

    let group = group_service.update_group(&group_id, body).await?;
    Ok(HttpResponse::Ok().json(GroupResponse::new(group, &Links::from_request(&req))))
}

/// Delete a group, removing it from its members
#[utoipa::path(
    delete,
    path = "/api/groups/{id}/",
    tag = "Groups",
    params(
        ("id" = String, Path, description = "Group ID")
    ),
    responses(
        (status = 204, description = "Group deleted"),
        (status = 404, description = "Group not found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn delete_group(
    group_service: web::Data<GroupService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    group_service.delete_group(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
