use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use mediashelf_model::{TrackMediaInput, TrackedMedia, UniqueId, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ports::{TrackingStore, UserRecord, UserRepository};
use crate::error::{Result, ShelfError};

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, UserRecord>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(
        &self,
        email: &str,
        name: Option<&str>,
        password_hash: &str,
    ) -> Result<User> {
        let mut users = self.users.write().await;
        if users.values().any(|record| record.user.email == email) {
            return Err(ShelfError::Conflict("Email already exists".to_string()));
        }

        let user = User {
            id: Uuid::now_v7(),
            email: email.to_string(),
            name: name.map(str::to_string),
            created_at: Utc::now(),
        };
        users.insert(
            user.id,
            UserRecord {
                user: user.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users.values().find(|record| record.user.email == email).cloned())
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).map(|record| record.user.clone()))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryTrackingStore {
    records: RwLock<HashMap<(Uuid, UniqueId), TrackedMedia>>,
}

#[async_trait]
impl TrackingStore for InMemoryTrackingStore {
    async fn upsert(&self, user_id: Uuid, input: TrackMediaInput) -> Result<TrackedMedia> {
        let now = Utc::now();
        let mut records = self.records.write().await;
        let key = (user_id, input.unique_id.clone());

        let (id, created_at) = records
            .get(&key)
            .map(|existing| (existing.id, existing.created_at))
            .unwrap_or_else(|| (Uuid::now_v7(), now));

        let record = TrackedMedia {
            id,
            user_id,
            unique_id: input.unique_id,
            kind: input.kind,
            title: input.title,
            poster_url: input.poster_url,
            release_year: input.release_year,
            status: input.status,
            rating: input.rating,
            review: input.review,
            created_at,
            updated_at: now,
        };
        records.insert(key, record.clone());
        Ok(record)
    }

    async fn list(&self, user_id: Uuid) -> Result<Vec<TrackedMedia>> {
        let records = self.records.read().await;
        let mut items: Vec<_> = records
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(items)
    }

    async fn delete(&self, user_id: Uuid, unique_id: &UniqueId) -> Result<()> {
        let mut records = self.records.write().await;
        records
            .remove(&(user_id, unique_id.clone()))
            .map(|_| ())
            .ok_or_else(|| {
                ShelfError::NotFound(format!("{unique_id} is not tracked"))
            })
    }
}
