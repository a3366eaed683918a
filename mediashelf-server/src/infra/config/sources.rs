use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub database: FileDatabaseConfig,
    #[serde(default)]
    pub catalog: FileCatalogConfig,
    #[serde(default)]
    pub auth: FileAuthConfig,
    #[serde(default)]
    pub cors: FileCorsConfig,
    pub dev_mode: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCatalogConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_books_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_books_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileAuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwt_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_pepper: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_ttl_hours: Option<i64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCorsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub database_url: Option<String>,
    pub tmdb_api_key: Option<String>,
    pub tmdb_language: Option<String>,
    pub google_books_api_key: Option<String>,
    pub tmdb_base_url: Option<String>,
    pub google_books_base_url: Option<String>,
    pub catalog_timeout_secs: Option<u64>,
    pub jwt_secret: Option<String>,
    pub password_pepper: Option<String>,
    pub token_ttl_hours: Option<i64>,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub dev_mode: Option<bool>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self {
            config_path: non_empty_var("MEDIASHELF_CONFIG").map(PathBuf::from),
            server_host: non_empty_var("SERVER_HOST"),
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|s| s.parse().ok()),
            database_url: non_empty_var("DATABASE_URL"),
            tmdb_api_key: non_empty_var("TMDB_API_KEY"),
            tmdb_language: non_empty_var("TMDB_LANGUAGE"),
            google_books_api_key: non_empty_var("GOOGLE_BOOKS_API_KEY"),
            tmdb_base_url: non_empty_var("TMDB_BASE_URL"),
            google_books_base_url: non_empty_var("GOOGLE_BOOKS_BASE_URL"),
            catalog_timeout_secs: std::env::var("CATALOG_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok()),
            jwt_secret: non_empty_var("JWT_SECRET"),
            password_pepper: non_empty_var("AUTH_PASSWORD_PEPPER"),
            token_ttl_hours: std::env::var("TOKEN_TTL_HOURS")
                .ok()
                .and_then(|s| s.parse().ok()),
            cors_allowed_origins: parse_csv_var("CORS_ALLOWED_ORIGINS"),
            dev_mode: parse_bool_var("DEV_MODE"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_csv_var(name: &str) -> Option<Vec<String>> {
    std::env::var(name).ok().map(|raw| split_csv(&raw))
}

pub(crate) fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|part| {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

fn parse_bool_var(name: &str) -> Option<bool> {
    std::env::var(name).ok().and_then(|raw| parse_bool(&raw))
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
