mod config;
mod constants;
mod errors;
mod handlers;
mod models;
mod openapi;
mod pagination;
mod repositories;
mod routes;
mod services;
mod utils;
mod validators;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use mongodb::bson::doc;
use mongodb::Client;

use crate::config::{StorageBackend, CONFIG};
use crate::errors::ApiError;
use crate::pagination::PageNumberPagination;
use crate::repositories::{
    GroupRepository, GroupStore, MemoryStore, UserRepository, UserStore,
};
use crate::services::{GroupService, UserService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment variables and logger
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let (users, groups) = open_stores()
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    // Initialize services
    let user_service = web::Data::new(UserService::new(users.clone(), groups.clone()));
    let group_service = web::Data::new(GroupService::new(groups, users));
    let pagination = web::Data::new(PageNumberPagination::new(CONFIG.page_size));
    info!(
        "Pagination: default page size {}, max {} via '{}'",
        pagination.page_size, pagination.max_page_size, pagination.page_size_query_param
    );

    // Start HTTP server
    let server_addr = format!("{}:{}", CONFIG.server_host, CONFIG.server_port);
    info!("Starting server at http://{}", server_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(routes::json_config())
            .app_data(user_service.clone())
            .app_data(group_service.clone())
            .app_data(pagination.clone())
            .configure(routes::configure_routes)
    })
    .bind(&server_addr)?
    .run()
    .await
}

async fn open_stores() -> Result<(Arc<dyn UserStore>, Arc<dyn GroupStore>), ApiError> {
    info!("Storage backend: {}", CONFIG.storage_backend);
    match CONFIG.storage_backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on restart");
            let store = Arc::new(MemoryStore::new());
            let users: Arc<dyn UserStore> = store.clone();
            let groups: Arc<dyn GroupStore> = store;
            Ok((users, groups))
        }
        StorageBackend::MongoDb => {
            info!("Connecting to MongoDB...");
            let client = Client::with_uri_str(&CONFIG.mongodb_uri).await?;
            let db = client.database(&CONFIG.database_name);

            // Test MongoDB connection
            db.run_command(doc! { "ping": 1 }).await?;
            info!("Connected to MongoDB successfully!");

            let users = Arc::new(UserRepository::new(&db));
            let groups = Arc::new(GroupRepository::new(&db));
            users.create_indexes().await?;
            groups.create_indexes().await?;

            let users: Arc<dyn UserStore> = users;
            let groups: Arc<dyn GroupStore> = groups;
            Ok((users, groups))
        }
    }
}
