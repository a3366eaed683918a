//! Catalog search across upstream sources.
//!
//! [`CatalogAggregator`] validates a query, routes it to exactly one
//! [`CatalogProvider`] (TMDB for movies and series, Google Books for books)
//! and returns that provider's normalized results in upstream order.

pub mod error;
pub mod google_books;
pub mod normalize;
pub mod tmdb;
mod upstream;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mediashelf_model::{MediaKind, NormalizedResult};
use reqwest::Client;
use tracing::info;

pub use error::CatalogError;
pub use google_books::GoogleBooksCatalog;
pub use tmdb::TmdbCatalog;

pub const MISSING_PARAMS_MESSAGE: &str =
    "The 'query' and 'type' parameters are required.";
pub const INVALID_KIND_MESSAGE: &str =
    "Invalid media type. Use 'movie', 'series' or 'book'.";

/// One upstream catalog.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Display name used in logs and error messages
    fn name(&self) -> &'static str;

    /// Run a single upstream search and normalize the hits.
    async fn search(
        &self,
        query: &str,
        kind: MediaKind,
    ) -> Result<Vec<NormalizedResult>, CatalogError>;
}

/// Validated search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub kind: MediaKind,
}

impl SearchRequest {
    /// Validate raw query-string values. Whitespace-only queries count as
    /// missing; the query is forwarded trimmed.
    pub fn parse(
        query: Option<&str>,
        kind: Option<&str>,
    ) -> Result<Self, CatalogError> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        let kind = kind.map(str::trim).filter(|k| !k.is_empty());

        let (Some(query), Some(kind)) = (query, kind) else {
            return Err(CatalogError::BadRequest(
                MISSING_PARAMS_MESSAGE.to_string(),
            ));
        };

        let kind = kind.parse::<MediaKind>().map_err(|_| {
            CatalogError::BadRequest(INVALID_KIND_MESSAGE.to_string())
        })?;

        Ok(Self {
            query: query.to_string(),
            kind,
        })
    }
}

/// Connection settings for the upstream catalogs.
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub tmdb_api_key: String,
    pub tmdb_language: Option<String>,
    pub google_books_api_key: Option<String>,
    pub tmdb_base_url: Option<String>,
    pub google_books_base_url: Option<String>,
    pub request_timeout: Option<Duration>,
}

impl CatalogSettings {
    pub fn new(tmdb_api_key: impl Into<String>) -> Self {
        Self {
            tmdb_api_key: tmdb_api_key.into(),
            tmdb_language: None,
            google_books_api_key: None,
            tmdb_base_url: None,
            google_books_base_url: None,
            request_timeout: None,
        }
    }
}

pub struct CatalogAggregator {
    screen: Arc<dyn CatalogProvider>,
    books: Arc<dyn CatalogProvider>,
}

impl std::fmt::Debug for CatalogAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogAggregator")
            .field("screen", &self.screen.name())
            .field("books", &self.books.name())
            .finish()
    }
}

impl CatalogAggregator {
    /// `screen` serves movies and series, `books` serves books.
    pub fn new(
        screen: Arc<dyn CatalogProvider>,
        books: Arc<dyn CatalogProvider>,
    ) -> Self {
        Self { screen, books }
    }

    /// Build the TMDB and Google Books adapters over one shared HTTP client.
    pub fn from_settings(settings: &CatalogSettings) -> Result<Self, CatalogError> {
        if settings.tmdb_api_key.trim().is_empty() {
            return Err(CatalogError::Internal(
                "TMDB API key is not configured".to_string(),
            ));
        }

        let mut builder = Client::builder().user_agent(concat!(
            "mediashelf/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|err| {
            CatalogError::Internal(format!("failed to build HTTP client: {err}"))
        })?;

        let mut tmdb = TmdbCatalog::new(client.clone(), settings.tmdb_api_key.clone())
            .with_language(settings.tmdb_language.clone());
        if let Some(base_url) = &settings.tmdb_base_url {
            tmdb = tmdb.with_base_url(base_url.clone());
        }

        let mut books =
            GoogleBooksCatalog::new(client, settings.google_books_api_key.clone());
        if let Some(base_url) = &settings.google_books_base_url {
            books = books.with_base_url(base_url.clone());
        }

        Ok(Self::new(Arc::new(tmdb), Arc::new(books)))
    }

    /// Validate raw inputs, then search. Invalid input never reaches an
    /// upstream.
    pub async fn search(
        &self,
        query: Option<&str>,
        kind: Option<&str>,
    ) -> Result<Vec<NormalizedResult>, CatalogError> {
        let request = SearchRequest::parse(query, kind)?;
        self.run(&request).await
    }

    pub async fn run(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<NormalizedResult>, CatalogError> {
        let provider = self.provider_for(request.kind);
        let results = provider.search(&request.query, request.kind).await?;
        info!(
            provider = provider.name(),
            kind = %request.kind,
            query = %request.query,
            results = results.len(),
            "catalog search completed"
        );
        Ok(results)
    }

    fn provider_for(&self, kind: MediaKind) -> &dyn CatalogProvider {
        match kind {
            MediaKind::Movie | MediaKind::Series => self.screen.as_ref(),
            MediaKind::Book => self.books.as_ref(),
        }
    }
}
