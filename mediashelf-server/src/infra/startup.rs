use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::infra::{app_state::AppState, config::Config};
use mediashelf_core::auth::{AuthCrypto, TokenSigner};
use mediashelf_core::catalog::CatalogAggregator;
use mediashelf_core::database::{
    InMemoryTrackingStore, InMemoryUserRepository, PostgresDatabase, TrackingStore,
    UserRepository,
};

/// Connect to PostgreSQL and apply migrations, or return `None` when no
/// database is configured.
pub async fn connect_database(config: &Config) -> Result<Option<PostgresDatabase>> {
    let Some(url) = config.database.url.as_deref() else {
        return Ok(None);
    };

    let database = PostgresDatabase::connect(url)
        .await
        .context("failed to connect to PostgreSQL")?;
    database
        .migrate()
        .await
        .context("database migration failed")?;
    Ok(Some(database))
}

/// Wire catalog adapters, stores and auth helpers into an [`AppState`].
pub fn build_state(config: Arc<Config>, database: Option<&PostgresDatabase>) -> Result<AppState> {
    let catalog = CatalogAggregator::from_settings(&config.catalog.settings())
        .context("failed to configure catalog providers")?;

    let (users, tracking): (Arc<dyn UserRepository>, Arc<dyn TrackingStore>) = match database {
        Some(database) => (Arc::new(database.users()), Arc::new(database.tracking())),
        None => {
            warn!("running on in-memory stores; accounts and tracking are not persisted");
            (
                Arc::new(InMemoryUserRepository::default()),
                Arc::new(InMemoryTrackingStore::default()),
            )
        }
    };

    let crypto = AuthCrypto::new(&config.auth.password_pepper)
        .context("failed to initialise password hashing")?;
    let tokens = TokenSigner::new(&config.auth.jwt_secret, config.auth.token_ttl)
        .context("failed to initialise token signing")?;

    info!(
        token_ttl_hours = config.auth.token_ttl.num_hours(),
        tmdb_language = config.catalog.tmdb_language.as_deref().unwrap_or("default"),
        google_books_key = config.catalog.google_books_api_key.is_some(),
        "application state ready"
    );

    Ok(AppState::new(
        config,
        Arc::new(catalog),
        users,
        tracking,
        Arc::new(crypto),
        Arc::new(tokens),
    ))
}

/// Resolves on Ctrl-C (and SIGTERM on unix).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
