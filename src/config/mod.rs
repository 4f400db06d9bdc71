use std::env;
use std::fmt;

use lazy_static::lazy_static;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

lazy_static! {
    pub static ref CONFIG: Config = Config::from_env();
}

/// Which store backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    MongoDb,
    Memory,
}

impl StorageBackend {
    /// Parse a backend name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "mongodb" | "mongo" => Some(StorageBackend::MongoDb),
            "memory" => Some(StorageBackend::Memory),
            _ => None,
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::MongoDb => write!(f, "mongodb"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
    pub storage_backend: StorageBackend,
    pub page_size: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let page_size: u64 = env::var("PAGE_SIZE")
            .unwrap_or_else(|_| DEFAULT_PAGE_SIZE.to_string())
            .parse()
            .expect("PAGE_SIZE must be a valid number");
        assert!(
            (1..=MAX_PAGE_SIZE).contains(&page_size),
            "PAGE_SIZE must be between 1 and {}",
            MAX_PAGE_SIZE
        );

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a valid number"),
            mongodb_uri: env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database_name: env::var("DATABASE_NAME").unwrap_or_else(|_| "gar".to_string()),
            storage_backend: StorageBackend::parse(
                &env::var("STORAGE_BACKEND").unwrap_or_else(|_| "mongodb".to_string()),
            )
            .expect("STORAGE_BACKEND must be either 'mongodb' or 'memory'"),
            page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_parse() {
        assert_eq!(StorageBackend::parse("mongodb"), Some(StorageBackend::MongoDb));
        assert_eq!(StorageBackend::parse(" Memory "), Some(StorageBackend::Memory));
        assert_eq!(StorageBackend::parse("postgres"), None);
    }
}
