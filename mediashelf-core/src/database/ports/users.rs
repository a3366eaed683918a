use std::fmt::Debug;

use async_trait::async_trait;
use mediashelf_model::User;
use uuid::Uuid;

use crate::error::Result;

/// Stored account including its password hash. Never leaves the core.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Insert a new account. Fails with `Conflict` when the email is taken.
    async fn create_user(
        &self,
        email: &str,
        name: Option<&str>,
        password_hash: &str,
    ) -> Result<User>;

    /// Lookup by normalized (lowercased) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;
}
