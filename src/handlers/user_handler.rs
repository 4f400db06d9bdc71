//! User handlers: paginated listing plus retrieve/create/replace/delete.

use actix_web::{web, HttpRequest, HttpResponse};
use log::{debug, info};
use validator::Validate;

use crate::errors::ApiError;
use crate::models::{UserRequest, UserResponse};
use crate::pagination::PageNumberPagination;
use crate::services::UserService;
use crate::utils::hyperlinks::{request_url, Links};
use crate::validators::validation_errors_to_api_error;

/// List users, one page at a time
#[utoipa::path(
    get,
    path = "/api/users/",
    tag = "Users",
    params(
        ("page" = Option<String>, Query, description = "Page number, or 'last' (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: PAGE_SIZE, max: 10000)")
    ),
    responses(
        (status = 200, description = "One page of users", body = crate::models::PaginatedResponse<UserResponse>),
        (status = 404, description = "Invalid page", body = crate::errors::ErrorResponse)
    )
)]
pub async fn list_users(
    req: HttpRequest,
    user_service: web::Data<UserService>,
    pagination: web::Data<PageNumberPagination>,
) -> Result<HttpResponse, ApiError> {
    let params = pagination.params(req.query_string());
    let (window, users) = user_service.list_users(&pagination, &params).await?;

    let links = Links::from_request(&req);
    let results: Vec<UserResponse> = users
        .into_iter()
        .map(|user| UserResponse::new(user, &links))
        .collect();

    Ok(HttpResponse::Ok().json(pagination.response(&window, results, &request_url(&req)?)))
}

/// Get a specific user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}/",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn get_user(
    req: HttpRequest,
    user_service: web::Data<UserService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let user = user_service.get_user(&user_id).await?;

    debug!("Successfully fetched user: {}", user_id);
    Ok(HttpResponse::Ok().json(UserResponse::new(user, &Links::from_request(&req))))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users/",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error", body = crate::errors::ErrorResponse),
        (status = 409, description = "Username already taken", body = crate::errors::ErrorResponse)
    )
)]
pub async fn create_user(
    req: HttpRequest,
    user_service: web::Data<UserService>,
    body: web::Json<UserRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner().normalize();
    body.validate().map_err(validation_errors_to_api_error)?;

    let user = user_service.create_user(body).await?;
    let response = UserResponse::new(user, &Links::from_request(&req));

    info!("Created user at {}", response.url);
    Ok(HttpResponse::Created()
        .insert_header(("Location", response.url.clone()))
        .json(response))
}

/// Replace a user's username, email and groups
#[utoipa::path(
    put,
    path = "/api/users/{id}/",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error", body = crate::errors::ErrorResponse),
        (status = 404, description = "User not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Username already taken", body = crate::errors::ErrorResponse)
    )
)]
pub async fn update_user(
    req: HttpRequest,
    user_service: web::Data<UserService>,
    path: web::Path<String>,
    body: web::Json<UserRequest>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let body = body.into_inner().normalize();
    body.validate().map_err(validation_errors_to_api_error)?;

    let user = user_service.update_user(&user_id, body).await?;
    Ok(HttpResponse::Ok().json(UserResponse::new(user, &Links::from_request(&req))))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}/",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn delete_user(
    user_service: web::Data<UserService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    user_service.delete_user(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
