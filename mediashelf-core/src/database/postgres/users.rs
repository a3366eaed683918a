use async_trait::async_trait;
use mediashelf_model::User;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::database::ports::{UserRecord, UserRepository};
use crate::error::{Result, ShelfError};

/// PostgreSQL-backed implementation of the `UserRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_user(row: &PgRow) -> Result<User> {
        Ok(User {
            id: row
                .try_get("id")
                .map_err(|e| ShelfError::Internal(format!("Failed to read user id: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| ShelfError::Internal(format!("Failed to read user email: {}", e)))?,
            name: row
                .try_get("name")
                .map_err(|e| ShelfError::Internal(format!("Failed to read user name: {}", e)))?,
            created_at: row.try_get("created_at").map_err(|e| {
                ShelfError::Internal(format!("Failed to read user created_at: {}", e))
            })?,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(
        &self,
        email: &str,
        name: Option<&str>,
        password_hash: &str,
    ) -> Result<User> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (id, email, name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, name, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation())
            {
                return ShelfError::Conflict("Email already exists".to_string());
            }
            ShelfError::Internal(format!("Failed to create user: {}", e))
        })?;

        let user = Self::map_user(&row)?;
        info!("Created user {}", user.id);
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, name, created_at, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ShelfError::Internal(format!("Failed to get user by email: {}", e)))?;

        row.map(|row| {
            Ok(UserRecord {
                user: Self::map_user(&row)?,
                password_hash: row.try_get("password_hash").map_err(|e| {
                    ShelfError::Internal(format!("Failed to read password hash: {}", e))
                })?,
            })
        })
        .transpose()
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, name, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ShelfError::Internal(format!("Failed to get user by id: {}", e)))?;

        row.as_ref().map(Self::map_user).transpose()
    }
}
