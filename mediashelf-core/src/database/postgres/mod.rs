//! PostgreSQL adapters implementing the database ports.

mod tracking;
mod users;

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::error::Result;

pub use tracking::PostgresTrackingStore;
pub use users::PostgresUserRepository;

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Owns the connection pool. The process entry point connects, migrates
/// and finally closes it; repositories hold cheap pool clones.
#[derive(Debug, Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
}

impl PostgresDatabase {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await?;
        info!(max_connections = MAX_CONNECTIONS, "connected to PostgreSQL");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the embedded SQL migrations.
    pub async fn migrate(&self) -> Result<()> {
        crate::MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|err| crate::ShelfError::Database(err.into()))?;
        info!("database migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn users(&self) -> PostgresUserRepository {
        PostgresUserRepository::new(self.pool.clone())
    }

    pub fn tracking(&self) -> PostgresTrackingStore {
        PostgresTrackingStore::new(self.pool.clone())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("database pool closed");
    }
}
