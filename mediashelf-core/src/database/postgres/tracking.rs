use async_trait::async_trait;
use mediashelf_model::{MediaKind, Rating, TrackMediaInput, TrackedMedia, TrackingStatus, UniqueId};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use crate::database::ports::TrackingStore;
use crate::error::{Result, ShelfError};

const RECORD_COLUMNS: &str = "id, user_id, unique_id, media_type, title, poster_url, \
     release_year, status, rating, review, created_at, updated_at";

/// PostgreSQL-backed implementation of the `TrackingStore` port.
#[derive(Clone, Debug)]
pub struct PostgresTrackingStore {
    pool: PgPool,
}

impl PostgresTrackingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Result<TrackedMedia> {
        fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T>
        where
            T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
        {
            row.try_get(name).map_err(|e| {
                ShelfError::Internal(format!("Failed to read tracked_media.{}: {}", name, e))
            })
        }

        let unique_id: String = column(row, "unique_id")?;
        let media_type: String = column(row, "media_type")?;
        let status: String = column(row, "status")?;
        let rating: Option<i16> = column(row, "rating")?;

        Ok(TrackedMedia {
            id: column(row, "id")?,
            user_id: column(row, "user_id")?,
            unique_id: UniqueId::parse(&unique_id)
                .map_err(|e| ShelfError::Internal(format!("Corrupt unique id: {}", e)))?,
            kind: media_type
                .parse::<MediaKind>()
                .map_err(|e| ShelfError::Internal(format!("Corrupt media type: {}", e)))?,
            title: column(row, "title")?,
            poster_url: column(row, "poster_url")?,
            release_year: column(row, "release_year")?,
            status: status
                .parse::<TrackingStatus>()
                .map_err(|e| ShelfError::Internal(format!("Corrupt status: {}", e)))?,
            rating: rating
                .map(|value| Rating::new(i64::from(value)))
                .transpose()
                .map_err(|e| ShelfError::Internal(format!("Corrupt rating: {}", e)))?,
            review: column(row, "review")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl TrackingStore for PostgresTrackingStore {
    async fn upsert(&self, user_id: Uuid, input: TrackMediaInput) -> Result<TrackedMedia> {
        let sql = format!(
            r#"
            INSERT INTO tracked_media (
                id, user_id, unique_id, media_type, title, poster_url,
                release_year, status, rating, review
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (user_id, unique_id) DO UPDATE SET
                media_type = EXCLUDED.media_type,
                title = EXCLUDED.title,
                poster_url = EXCLUDED.poster_url,
                release_year = EXCLUDED.release_year,
                status = EXCLUDED.status,
                rating = EXCLUDED.rating,
                review = EXCLUDED.review,
                updated_at = NOW()
            RETURNING {RECORD_COLUMNS}
            "#
        );

        let row = sqlx::query(&sql)
            .bind(Uuid::now_v7())
            .bind(user_id)
            .bind(input.unique_id.as_str())
            .bind(input.kind.as_str())
            .bind(&input.title)
            .bind(input.poster_url.as_deref())
            .bind(input.release_year.as_deref())
            .bind(input.status.as_str())
            .bind(input.rating.map(|rating| i16::from(rating.get())))
            .bind(input.review.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ShelfError::Internal(format!("Failed to upsert tracked media: {}", e)))?;

        debug!(%user_id, unique_id = %input.unique_id, "upserted tracked media");
        Self::map_row(&row)
    }

    async fn list(&self, user_id: Uuid) -> Result<Vec<TrackedMedia>> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM tracked_media \
             WHERE user_id = $1 ORDER BY updated_at DESC, id DESC"
        );

        let rows = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ShelfError::Internal(format!("Failed to list tracked media: {}", e)))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn delete(&self, user_id: Uuid, unique_id: &UniqueId) -> Result<()> {
        let result = sqlx::query("DELETE FROM tracked_media WHERE user_id = $1 AND unique_id = $2")
            .bind(user_id)
            .bind(unique_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| ShelfError::Internal(format!("Failed to delete tracked media: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(ShelfError::NotFound(format!("{unique_id} is not tracked")));
        }
        Ok(())
    }
}
