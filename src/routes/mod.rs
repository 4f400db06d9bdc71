use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::constants::{API_PREFIX, CODE_INVALID_JSON};
use crate::errors::ApiError;
use crate::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(API_PREFIX)
            // API root
            .route("/", web::get().to(handlers::api_root))
            // Health check
            .route("/health", web::get().to(handlers::health_check))
            // OpenAPI document
            .route("/openapi.json", web::get().to(handlers::openapi_json))
            // Users
            .service(
                web::resource("/users/")
                    .route(web::get().to(handlers::list_users))
                    .route(web::post().to(handlers::create_user)),
            )
            .service(
                web::resource("/users/{id}/")
                    .route(web::get().to(handlers::get_user))
                    .route(web::put().to(handlers::update_user))
                    .route(web::delete().to(handlers::delete_user)),
            )
            // Groups
            .service(
                web::resource("/groups/")
                    .route(web::get().to(handlers::list_groups))
                    .route(web::post().to(handlers::create_group)),
            )
            .service(
                web::resource("/groups/{id}/")
                    .route(web::get().to(handlers::get_group))
                    .route(web::put().to(handlers::update_group))
                    .route(web::delete().to(handlers::delete_group)),
            ),
    );
}

/// JSON extractor settings: malformed bodies come back in the API error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        ApiError::bad_request(CODE_INVALID_JSON, err.to_string()).into()
    })
}
