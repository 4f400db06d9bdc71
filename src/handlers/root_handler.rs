//! API root, health check and OpenAPI document.

use actix_web::{HttpRequest, HttpResponse};
use utoipa::OpenApi;

use crate::models::{ApiRootResponse, HealthResponse};
use crate::openapi::ApiDoc;
use crate::utils::hyperlinks::Links;

/// Links to the collection endpoints
#[utoipa::path(
    get,
    path = "/api/",
    tag = "Root",
    responses(
        (status = 200, description = "Collection URLs", body = ApiRootResponse)
    )
)]
pub async fn api_root(req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().json(ApiRootResponse::new(&Links::from_request(&req)))
}

/// Health check
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: "Server is running".to_string(),
    })
}

pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
