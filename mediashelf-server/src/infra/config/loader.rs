use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use thiserror::Error;
use url::Url;

use super::{
    models::{
        AuthConfig, CatalogConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig,
        ServerConfig,
    },
    sources::{EnvConfig, FileConfig},
    validation::{self, ConfigGuardRailError, ConfigWarnings},
};
use crate::infra::constants::{
    DEFAULT_HOST, DEFAULT_JWT_SECRET, DEFAULT_PASSWORD_PEPPER, DEFAULT_PORT,
    DEFAULT_TOKEN_TTL_HOURS,
};

const DEFAULT_CONFIG_LOCATIONS: [&str; 2] = ["mediashelf.toml", "config/mediashelf.toml"];

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    /// Use these values instead of reading the process environment. No
    /// `.env` file is loaded when set.
    pub env: Option<EnvConfig>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn with_env(mut self, env: EnvConfig) -> Self {
        self.options.env = Some(env);
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let (env_config, env_file_loaded) = match &self.options.env {
            Some(env) => (env.clone(), false),
            None => {
                let loaded = self.load_env_file()?;
                (EnvConfig::gather(), loaded)
            }
        };

        let (file_config, config_path) = self.load_file_config(&env_config)?;
        let (config, warnings) =
            self.compose_config(file_config, env_config, config_path, env_file_loaded)?;

        Ok(ConfigLoad { config, warnings })
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        let result = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true),
            None => dotenvy::dotenv().map(|_| true),
        };
        result.or_else(|err| match err {
            dotenvy::Error::Io(_) => Ok(false),
            _ => Err(err.into()),
        })
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env_config.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
            {
                Some(path) => path,
                None => return Ok((None, None)),
            },
        };

        let contents = fs::read_to_string(&path).map_err(|source| ConfigLoadError::Io {
            path: path.clone(),
            source,
        })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
                path: path.clone(),
                source,
            })?;

        Ok((Some(file_config), Some(path)))
    }

    fn compose_config(
        &self,
        file_config: Option<FileConfig>,
        env: EnvConfig,
        config_path: Option<PathBuf>,
        env_file_loaded: bool,
    ) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
        let mut warnings = ConfigWarnings::default();

        if file_config.is_none() {
            warnings.push_with_hint(
                "No mediashelf.toml detected; using environment variables only",
                "Set MEDIASHELF_CONFIG or create mediashelf.toml to keep settings in a file",
            );
        }

        let FileConfig {
            server: file_server,
            database: file_database,
            catalog: file_catalog,
            auth: file_auth,
            cors: file_cors,
            dev_mode: file_dev_mode,
        } = file_config.unwrap_or_default();

        let server = ServerConfig {
            host: env
                .server_host
                .or(file_server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: env.server_port.or(file_server.port).unwrap_or(DEFAULT_PORT),
        };

        let database_url = env
            .database_url
            .or(file_database.url)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        if let Some(url) = database_url.as_deref() {
            check_url("DATABASE_URL", url)?;
        }
        let database = DatabaseConfig { url: database_url };

        let tmdb_api_key = env
            .tmdb_api_key
            .or(file_catalog.tmdb_api_key)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigLoadError::MissingSetting {
                field: "TMDB_API_KEY",
            })?;

        let tmdb_base_url = env.tmdb_base_url.or(file_catalog.tmdb_base_url);
        if let Some(url) = tmdb_base_url.as_deref() {
            check_url("TMDB_BASE_URL", url)?;
        }
        let google_books_base_url = env
            .google_books_base_url
            .or(file_catalog.google_books_base_url);
        if let Some(url) = google_books_base_url.as_deref() {
            check_url("GOOGLE_BOOKS_BASE_URL", url)?;
        }

        let catalog = CatalogConfig {
            tmdb_api_key,
            tmdb_language: env.tmdb_language.or(file_catalog.tmdb_language),
            google_books_api_key: env
                .google_books_api_key
                .or(file_catalog.google_books_api_key)
                .filter(|key| !key.trim().is_empty()),
            tmdb_base_url,
            google_books_base_url,
            request_timeout: env
                .catalog_timeout_secs
                .or(file_catalog.request_timeout_secs)
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        };

        let token_ttl_hours = env
            .token_ttl_hours
            .or(file_auth.token_ttl_hours)
            .unwrap_or(DEFAULT_TOKEN_TTL_HOURS);
        let token_ttl = chrono::Duration::try_hours(token_ttl_hours)
            .filter(|ttl| *ttl > chrono::Duration::zero())
            .ok_or_else(|| ConfigLoadError::InvalidSetting {
                field: "TOKEN_TTL_HOURS",
                reason: "must be a positive number of hours".into(),
            })?;

        let auth = AuthConfig {
            jwt_secret: env
                .jwt_secret
                .or(file_auth.jwt_secret)
                .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string()),
            password_pepper: env
                .password_pepper
                .or(file_auth.password_pepper)
                .unwrap_or_else(|| DEFAULT_PASSWORD_PEPPER.to_string()),
            token_ttl,
        };

        let cors = CorsConfig {
            allowed_origins: env
                .cors_allowed_origins
                .or(file_cors.allowed_origins)
                .unwrap_or_else(default_cors_origins),
        };

        let config = Config {
            server,
            database,
            catalog,
            auth,
            cors,
            dev_mode: env.dev_mode.or(file_dev_mode).unwrap_or(false),
            metadata: ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        };

        warnings.extend(validation::apply_guard_rails(&config)?);
        Ok((config, warnings))
    }
}

fn check_url(field: &'static str, raw: &str) -> Result<(), ConfigLoadError> {
    Url::parse(raw)
        .map(|_| ())
        .map_err(|source| ConfigLoadError::InvalidUrl { field, source })
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{field} is required")]
    MissingSetting { field: &'static str },
    #[error("{field} {reason}")]
    InvalidSetting { field: &'static str, reason: String },
    #[error("{field} is not a valid URL")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

impl ConfigLoadError {
    pub fn config_path(&self) -> Option<&Path> {
        match self {
            ConfigLoadError::MissingConfig { path }
            | ConfigLoadError::Io { path, .. }
            | ConfigLoadError::Parse { path, .. } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn dev_env() -> EnvConfig {
        EnvConfig {
            tmdb_api_key: Some("tmdb-key".into()),
            dev_mode: Some(true),
            ..EnvConfig::default()
        }
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn dev_mode_defaults_load_with_warnings() {
        let ConfigLoad { config, warnings } =
            ConfigLoader::new().with_env(dev_env()).load().unwrap();

        assert_eq!(config.server.port, DEFAULT_PORT);
        assert!(config.database.url.is_none());
        assert_eq!(config.auth.token_ttl, chrono::Duration::days(7));
        assert!(warnings.contains("development secrets"));
        assert!(warnings.contains("DATABASE_URL"));
        assert!(warnings.contains("GOOGLE_BOOKS_API_KEY"));
    }

    #[test]
    fn missing_tmdb_key_is_an_error() {
        let env = EnvConfig {
            dev_mode: Some(true),
            ..EnvConfig::default()
        };
        assert!(matches!(
            ConfigLoader::new().with_env(env).load(),
            Err(ConfigLoadError::MissingSetting {
                field: "TMDB_API_KEY"
            })
        ));
    }

    #[test]
    fn environment_overrides_file_values() {
        let file = write_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [catalog]
            tmdb_api_key = "from-file"
            tmdb_language = "pt-BR"
            google_books_api_key = "books"
            "#,
        );

        let env = EnvConfig {
            server_port: Some(9090),
            ..dev_env()
        };
        let ConfigLoad { config, .. } = ConfigLoader::new()
            .with_config_path(file.path())
            .with_env(env)
            .load()
            .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.catalog.tmdb_api_key, "tmdb-key");
        assert_eq!(config.catalog.tmdb_language.as_deref(), Some("pt-BR"));
        assert_eq!(config.metadata.config_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn production_rejects_placeholder_secrets() {
        let env = EnvConfig {
            dev_mode: Some(false),
            database_url: Some("postgres://localhost/mediashelf".into()),
            ..dev_env()
        };
        assert!(matches!(
            ConfigLoader::new().with_env(env).load(),
            Err(ConfigLoadError::GuardRail(ConfigGuardRailError::WeakSecret { .. }))
        ));
    }

    #[test]
    fn production_requires_a_database() {
        let env = EnvConfig {
            dev_mode: Some(false),
            jwt_secret: Some("j".repeat(40)),
            password_pepper: Some("p".repeat(40)),
            ..dev_env()
        };
        assert!(matches!(
            ConfigLoader::new().with_env(env).load(),
            Err(ConfigLoadError::GuardRail(ConfigGuardRailError::MissingDatabase))
        ));
    }

    #[test]
    fn out_of_range_token_ttl_is_rejected() {
        for hours in [0, -1, i64::MAX] {
            let env = EnvConfig {
                token_ttl_hours: Some(hours),
                ..dev_env()
            };
            assert!(
                matches!(
                    ConfigLoader::new().with_env(env).load(),
                    Err(ConfigLoadError::InvalidSetting {
                        field: "TOKEN_TTL_HOURS",
                        ..
                    })
                ),
                "{hours} hours should be rejected"
            );
        }
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let loader = ConfigLoader::new()
            .with_config_path("/definitely/not/here/mediashelf.toml")
            .with_env(dev_env());
        let err = loader.load().unwrap_err();
        assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));
        assert!(err.config_path().is_some());
    }

    #[test]
    fn malformed_toml_is_reported_with_its_path() {
        let file = write_config("[server\nport = 1");
        let err = ConfigLoader::new()
            .with_config_path(file.path())
            .with_env(dev_env())
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse { .. }));
    }
}
