use std::fmt::Debug;

use async_trait::async_trait;
use mediashelf_model::{TrackMediaInput, TrackedMedia, UniqueId};
use uuid::Uuid;

use crate::error::Result;

/// Per-user tracking records, unique on `(user_id, unique_id)`.
#[async_trait]
pub trait TrackingStore: Send + Sync + Debug {
    /// Create the record or overwrite an existing one in place. The record
    /// id and `created_at` survive updates; `updated_at` is bumped.
    async fn upsert(&self, user_id: Uuid, input: TrackMediaInput) -> Result<TrackedMedia>;

    /// All of a user's records, most recently updated first.
    async fn list(&self, user_id: Uuid) -> Result<Vec<TrackedMedia>>;

    /// Remove one record. `NotFound` when the user does not track the item.
    async fn delete(&self, user_id: Uuid, unique_id: &UniqueId) -> Result<()>;
}
