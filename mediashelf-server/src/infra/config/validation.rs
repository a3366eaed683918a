use thiserror::Error;

use super::models::{AuthConfig, Config};

const MIN_SECRET_LENGTH: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("authentication secret {field} {reason}")]
    WeakSecret { field: &'static str, reason: String },
    #[error("CORS wildcard origins are not allowed when DEV_MODE is false")]
    DangerousCorsWildcard,
    #[error("DATABASE_URL is required when DEV_MODE is false")]
    MissingDatabase,
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(&mut self, message: S, hint: H) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.items.iter().any(|warning| warning.message.contains(needle))
    }
}

/// Reject unsafe production settings; downgrade them to warnings in dev mode.
pub fn apply_guard_rails(config: &Config) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if config.dev_mode {
        if config.auth.is_default_jwt_secret() || config.auth.is_default_pepper() {
            warnings.push_with_hint(
                "Using built-in development secrets",
                "Set JWT_SECRET and AUTH_PASSWORD_PEPPER before exposing this server",
            );
        }
        if config.database.url.is_none() {
            warnings.push_with_hint(
                "DATABASE_URL not configured; tracking data lives in memory and is lost on restart",
                "Set DATABASE_URL to a PostgreSQL instance to persist accounts and tracking",
            );
        }
    } else {
        enforce_secrets(&config.auth)?;
        if config.cors.is_wildcard_included() {
            return Err(ConfigGuardRailError::DangerousCorsWildcard);
        }
        if config.database.url.is_none() {
            return Err(ConfigGuardRailError::MissingDatabase);
        }
    }

    if config.catalog.google_books_api_key.is_none() {
        warnings.push_with_hint(
            "GOOGLE_BOOKS_API_KEY not configured; book search uses the anonymous quota",
            "Create a Books API key in the Google Cloud console",
        );
    }

    Ok(warnings)
}

fn enforce_secrets(auth: &AuthConfig) -> Result<(), ConfigGuardRailError> {
    if auth.is_default_jwt_secret() {
        return Err(ConfigGuardRailError::WeakSecret {
            field: "JWT_SECRET",
            reason: "uses the default placeholder value".into(),
        });
    }

    if auth.jwt_secret.len() < MIN_SECRET_LENGTH {
        return Err(ConfigGuardRailError::WeakSecret {
            field: "JWT_SECRET",
            reason: format!("must be at least {MIN_SECRET_LENGTH} characters"),
        });
    }

    if auth.is_default_pepper() {
        return Err(ConfigGuardRailError::WeakSecret {
            field: "AUTH_PASSWORD_PEPPER",
            reason: "uses the default placeholder value".into(),
        });
    }

    if auth.password_pepper.len() < MIN_SECRET_LENGTH {
        return Err(ConfigGuardRailError::WeakSecret {
            field: "AUTH_PASSWORD_PEPPER",
            reason: format!("must be at least {MIN_SECRET_LENGTH} characters"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::models::{
        CatalogConfig, ConfigMetadata, CorsConfig, DatabaseConfig, ServerConfig,
    };
    use crate::infra::constants::{DEFAULT_JWT_SECRET, DEFAULT_PASSWORD_PEPPER};

    fn config(dev_mode: bool) -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: Some("postgres://localhost/mediashelf".into()),
            },
            catalog: CatalogConfig {
                tmdb_api_key: "tmdb".into(),
                tmdb_language: None,
                google_books_api_key: Some("books".into()),
                tmdb_base_url: None,
                google_books_base_url: None,
                request_timeout: None,
            },
            auth: AuthConfig {
                jwt_secret: "j".repeat(MIN_SECRET_LENGTH),
                password_pepper: "p".repeat(MIN_SECRET_LENGTH),
                token_ttl: chrono::Duration::days(7),
            },
            cors: CorsConfig {
                allowed_origins: vec!["https://shelf.example.com".into()],
            },
            dev_mode,
            metadata: ConfigMetadata::default(),
        }
    }

    #[test]
    fn hardened_production_config_has_no_warnings() {
        assert!(apply_guard_rails(&config(false)).unwrap().is_empty());
    }

    #[test]
    fn short_secrets_are_rejected_outside_dev_mode() {
        let mut config = config(false);
        config.auth.password_pepper = "short".into();
        assert!(matches!(
            apply_guard_rails(&config),
            Err(ConfigGuardRailError::WeakSecret {
                field: "AUTH_PASSWORD_PEPPER",
                ..
            })
        ));
    }

    #[test]
    fn wildcard_cors_is_rejected_outside_dev_mode() {
        let mut config = config(false);
        config.cors.allowed_origins.push(" * ".into());
        assert!(matches!(
            apply_guard_rails(&config),
            Err(ConfigGuardRailError::DangerousCorsWildcard)
        ));
    }

    #[test]
    fn dev_mode_downgrades_problems_to_warnings() {
        let mut config = config(true);
        config.auth.jwt_secret = DEFAULT_JWT_SECRET.into();
        config.auth.password_pepper = DEFAULT_PASSWORD_PEPPER.into();
        config.database.url = None;
        config.catalog.google_books_api_key = None;

        let warnings = apply_guard_rails(&config).unwrap();
        assert_eq!(warnings.items.len(), 3);
        assert!(warnings.items.iter().all(|warning| warning.hint.is_some()));
    }
}
