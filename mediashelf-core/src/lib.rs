//! # mediashelf core
//!
//! Domain logic for the mediashelf tracking service.
//!
//! ## Overview
//!
//! - **Catalog search**: one query against TMDB (movies, series) or Google
//!   Books (books), normalized into [`mediashelf_model::NormalizedResult`]
//! - **Accounts**: Argon2id password hashing and HS256 session tokens
//! - **Tracking**: per-user status/rating/review storage keyed by
//!   `(user, unique id)`
//!
//! ## Feature Flags
//!
//! - `database`: PostgreSQL adapters for the store ports (SQLx)
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use mediashelf_core::catalog::{CatalogAggregator, CatalogSettings};
//!
//! async fn find_matrix() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = CatalogSettings::new("tmdb-api-key");
//!     let catalog = Arc::new(CatalogAggregator::from_settings(&settings)?);
//!     let results = catalog.search(Some("matrix"), Some("movie")).await?;
//!     for hit in results {
//!         println!("{} ({})", hit.title, hit.release_year);
//!     }
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Password hashing, session tokens, and account flows
pub mod auth;

/// Upstream catalog adapters and the search aggregator
pub mod catalog;

/// Store ports with in-memory and PostgreSQL adapters
pub mod database;

/// Error types and error handling utilities
pub mod error;

#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use error::{Result, ShelfError};
