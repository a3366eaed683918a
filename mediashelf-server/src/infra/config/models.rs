use std::path::PathBuf;
use std::time::Duration;

use mediashelf_core::catalog::CatalogSettings;

use crate::infra::constants::{DEFAULT_JWT_SECRET, DEFAULT_PASSWORD_PEPPER};

/// Fully resolved configuration handed to the running server.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub catalog: CatalogConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
    pub dev_mode: bool,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    /// `None` runs on the in-memory stores (dev mode only).
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub tmdb_api_key: String,
    pub tmdb_language: Option<String>,
    pub google_books_api_key: Option<String>,
    pub tmdb_base_url: Option<String>,
    pub google_books_base_url: Option<String>,
    pub request_timeout: Option<Duration>,
}

impl CatalogConfig {
    pub fn settings(&self) -> CatalogSettings {
        CatalogSettings {
            tmdb_api_key: self.tmdb_api_key.clone(),
            tmdb_language: self.tmdb_language.clone(),
            google_books_api_key: self.google_books_api_key.clone(),
            tmdb_base_url: self.tmdb_base_url.clone(),
            google_books_base_url: self.google_books_base_url.clone(),
            request_timeout: self.request_timeout,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub password_pepper: String,
    pub token_ttl: chrono::Duration,
}

impl AuthConfig {
    pub fn is_default_jwt_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }

    pub fn is_default_pepper(&self) -> bool {
        self.password_pepper == DEFAULT_PASSWORD_PEPPER
    }
}

#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn is_wildcard_included(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin.trim() == "*")
    }
}

/// Where the configuration came from, for startup logging.
#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
