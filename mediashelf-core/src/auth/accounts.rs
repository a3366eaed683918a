use std::sync::Arc;

use mediashelf_model::{NewAccount, User};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use super::crypto::{AuthCrypto, AuthCryptoError};
use super::token::{TokenError, TokenSigner};
use crate::database::ports::UserRepository;
use crate::error::ShelfError;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("An account with this email already exists.")]
    EmailTaken,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Store(#[from] ShelfError),
    #[error(transparent)]
    Crypto(#[from] AuthCryptoError),
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// A signed-in user and the session token issued for them.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Registration and login over a [`UserRepository`].
#[derive(Debug, Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    crypto: Arc<AuthCrypto>,
    tokens: Arc<TokenSigner>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        crypto: Arc<AuthCrypto>,
        tokens: Arc<TokenSigner>,
    ) -> Self {
        Self {
            users,
            crypto,
            tokens,
        }
    }

    pub async fn register(&self, account: NewAccount) -> Result<User, AccountError> {
        if self.users.find_by_email(&account.email).await?.is_some() {
            return Err(AccountError::EmailTaken);
        }

        let password_hash = self.crypto.hash_password(&account.password)?;
        let user = self
            .users
            .create_user(&account.email, account.name.as_deref(), &password_hash)
            .await
            .map_err(|err| match err {
                // Lost a race with a concurrent registration.
                ShelfError::Conflict(_) => AccountError::EmailTaken,
                other => AccountError::Store(other),
            })?;

        info!(user_id = %user.id, "registered account");
        Ok(user)
    }

    /// Unknown emails and wrong passwords are indistinguishable to callers.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AccountError> {
        let Some(record) = self.users.find_by_email(email).await? else {
            return Err(AccountError::InvalidCredentials);
        };

        if !self.crypto.verify_password(password, &record.password_hash)? {
            return Err(AccountError::InvalidCredentials);
        }

        let token = self.tokens.issue(record.user.id)?;
        info!(user_id = %record.user.id, "issued session token");
        Ok(Session {
            user: record.user,
            token,
        })
    }

    pub async fn current_user(&self, user_id: Uuid) -> Result<Option<User>, AccountError> {
        Ok(self.users.get_user(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::DEFAULT_TOKEN_TTL;
    use crate::database::memory::InMemoryUserRepository;

    fn service() -> AccountService {
        AccountService::new(
            Arc::new(InMemoryUserRepository::default()),
            Arc::new(
                AuthCrypto::with_params("pepper", AuthCrypto::minimal_cost_params())
                    .unwrap(),
            ),
            Arc::new(TokenSigner::new("secret", DEFAULT_TOKEN_TTL).unwrap()),
        )
    }

    fn account(email: &str) -> NewAccount {
        NewAccount {
            email: email.into(),
            password: "hunter22".into(),
            name: Some("Alice".into()),
        }
    }

    #[tokio::test]
    async fn register_then_login() {
        let service = service();
        let user = service.register(account("alice@example.com")).await.unwrap();
        assert_eq!(user.email, "alice@example.com");

        let session = service.login("alice@example.com", "hunter22").await.unwrap();
        assert_eq!(session.user, user);
        let claims = service.tokens.verify(&session.token).unwrap();
        assert_eq!(claims.sub, user.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let service = service();
        service.register(account("alice@example.com")).await.unwrap();
        assert!(matches!(
            service.register(account("alice@example.com")).await,
            Err(AccountError::EmailTaken)
        ));
    }

    #[tokio::test]
    async fn bad_credentials_look_the_same() {
        let service = service();
        service.register(account("alice@example.com")).await.unwrap();

        assert!(matches!(
            service.login("alice@example.com", "wrong").await,
            Err(AccountError::InvalidCredentials)
        ));
        assert!(matches!(
            service.login("nobody@example.com", "hunter22").await,
            Err(AccountError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn current_user_is_none_for_unknown_ids() {
        assert!(service().current_user(Uuid::now_v7()).await.unwrap().is_none());
    }
}
