#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Duration;
use mediashelf_core::{
    auth::{AuthCrypto, TokenSigner},
    catalog::{CatalogAggregator, CatalogError, CatalogProvider},
    database::{InMemoryTrackingStore, InMemoryUserRepository},
};
use mediashelf_model::{MediaKind, NormalizedResult, UniqueId};
use mediashelf_server::{
    AppState, create_app,
    infra::config::{
        AuthConfig, CatalogConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig,
        ServerConfig,
    },
};
use serde_json::{Value, json};

pub const TEST_JWT_SECRET: &str = "integration-test-jwt-secret-0123456789";
pub const TEST_PEPPER: &str = "integration-test-pepper-0123456789";

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseConfig { url: None },
        catalog: CatalogConfig {
            tmdb_api_key: "test-tmdb-key".into(),
            tmdb_language: None,
            google_books_api_key: None,
            tmdb_base_url: None,
            google_books_base_url: None,
            request_timeout: None,
        },
        auth: AuthConfig {
            jwt_secret: TEST_JWT_SECRET.into(),
            password_pepper: TEST_PEPPER.into(),
            token_ttl: Duration::days(7),
        },
        cors: CorsConfig::default(),
        dev_mode: true,
        metadata: ConfigMetadata::default(),
    }
}

/// Catalog provider that records calls and returns canned results.
#[derive(Debug, Default)]
pub struct StubCatalog {
    calls: AtomicUsize,
    results: Vec<NormalizedResult>,
}

impl StubCatalog {
    pub fn with_results(results: Vec<NormalizedResult>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            results,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogProvider for StubCatalog {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn search(
        &self,
        _query: &str,
        kind: MediaKind,
    ) -> Result<Vec<NormalizedResult>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .results
            .iter()
            .filter(|result| result.kind == kind)
            .cloned()
            .collect())
    }
}

pub fn sample_results() -> Vec<NormalizedResult> {
    vec![
        NormalizedResult {
            unique_id: UniqueId::tmdb_movie(603),
            kind: MediaKind::Movie,
            title: "The Matrix".into(),
            release_year: "1999".into(),
            poster_url: "https://image.tmdb.org/t/p/w200/m.jpg".into(),
            authors: vec![],
        },
        NormalizedResult {
            unique_id: UniqueId::google_books("zyTCAlFPjgYC"),
            kind: MediaKind::Book,
            title: "The Google Story".into(),
            release_year: "2005".into(),
            poster_url: "https://books.google.com/c.jpg".into(),
            authors: vec!["David A. Vise".into()],
        },
    ]
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub screen: Arc<StubCatalog>,
    pub books: Arc<StubCatalog>,
}

/// App over in-memory stores and stub catalogs.
pub fn build_test_app() -> Result<TestApp> {
    let screen = Arc::new(StubCatalog::with_results(sample_results()));
    let books = Arc::new(StubCatalog::with_results(sample_results()));
    let catalog = CatalogAggregator::new(screen.clone(), books.clone());
    let state = build_state(test_config(), catalog)?;
    let server = TestServer::builder()
        .build(create_app(state.clone()))
        .map_err(|err| anyhow!(err.to_string()))?;

    Ok(TestApp {
        server,
        state,
        screen,
        books,
    })
}

/// App whose catalog talks to real HTTP endpoints (e.g. mockito servers).
pub fn build_test_app_with_catalog(catalog: CatalogAggregator) -> Result<TestServer> {
    let state = build_state(test_config(), catalog)?;
    TestServer::builder()
        .build(create_app(state))
        .map_err(|err| anyhow!(err.to_string()))
}

pub fn build_state(config: Config, catalog: CatalogAggregator) -> Result<AppState> {
    let crypto = AuthCrypto::with_params(
        &config.auth.password_pepper,
        AuthCrypto::minimal_cost_params(),
    )?;
    let tokens = TokenSigner::new(&config.auth.jwt_secret, config.auth.token_ttl)?;

    Ok(AppState::new(
        Arc::new(config),
        Arc::new(catalog),
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(InMemoryTrackingStore::default()),
        Arc::new(crypto),
        Arc::new(tokens),
    ))
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Register and log in, returning the session token.
pub async fn register_and_login(server: &TestServer, email: &str, password: &str) -> String {
    server
        .post("/api/auth/register")
        .json(&json!({ "email": email, "password": password, "name": "Test User" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let login = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    login.assert_status_ok();

    let body: Value = login.json();
    body["token"]
        .as_str()
        .unwrap_or_else(|| panic!("login response missing token: {body}"))
        .to_string()
}
