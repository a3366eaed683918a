//! Layered server configuration: `.env`, optional TOML file, environment,
//! then CLI overrides applied by the entry point.

pub mod loader;
pub mod models;
pub mod sources;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions};
pub use models::{
    AuthConfig, CatalogConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig,
    ServerConfig,
};
pub use sources::{EnvConfig, FileConfig};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
