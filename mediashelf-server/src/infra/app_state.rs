use std::{fmt, sync::Arc};

use axum::http::{HeaderMap, header::AUTHORIZATION};

use crate::infra::config::Config;
use mediashelf_core::auth::{
    AccountService, AuthCrypto, AuthRejection, Identity, TokenSigner, authenticate,
};
use mediashelf_core::catalog::CatalogAggregator;
use mediashelf_core::database::{TrackingStore, UserRepository};

/// Shared handles injected into every handler. Store lifecycles are owned
/// by the entry point, not by the state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<CatalogAggregator>,
    pub accounts: Arc<AccountService>,
    pub tracking: Arc<dyn TrackingStore>,
    pub tokens: Arc<TokenSigner>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        catalog: Arc<CatalogAggregator>,
        users: Arc<dyn UserRepository>,
        tracking: Arc<dyn TrackingStore>,
        crypto: Arc<AuthCrypto>,
        tokens: Arc<TokenSigner>,
    ) -> Self {
        let accounts = Arc::new(AccountService::new(users, crypto, tokens.clone()));
        Self {
            config,
            catalog,
            accounts,
            tracking,
            tokens,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve the caller from the request's `Authorization` header.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Identity, AuthRejection> {
        let header = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        authenticate(&self.tokens, header)
    }
}
