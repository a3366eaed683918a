//! Persistence for accounts and tracking records.
//!
//! Handlers depend only on the traits in [`ports`]. The PostgreSQL adapters
//! are the production backend; the in-memory adapters back tests and
//! database-less development runs.

pub mod memory;
pub mod ports;

#[cfg(feature = "database")]
pub mod postgres;

pub use memory::{InMemoryTrackingStore, InMemoryUserRepository};
pub use ports::{TrackingStore, UserRecord, UserRepository};

#[cfg(feature = "database")]
pub use postgres::PostgresDatabase;
