use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use tracing::info;

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};
use mediashelf_model::{ApiResponse, ModelError, TrackMediaRequest, TrackedMedia, UniqueId};

/// List the caller's tracked items, most recently updated first
pub async fn list_media_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<ApiResponse<Vec<TrackedMedia>>>> {
    let identity = state.authenticate(&headers)?;
    let items = state.tracking.list(identity.user_id).await?;

    Ok(Json(
        ApiResponse::success(items).with_message("Media list retrieved successfully!"),
    ))
}

/// Track an item or update an existing entry
///
/// # Request
///
/// ```json
/// {
///   "uniqueId": "TMDB:movie:603",
///   "type": "movie",
///   "title": "The Matrix",
///   "posterUrl": "https://image.tmdb.org/t/p/w200/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
///   "releaseYear": "1999",
///   "status": "watched",
///   "rating": 5,
///   "review": "Still holds up."
/// }
/// ```
///
/// # Response
///
/// - `201 Created` with the stored record
/// - `400 Bad Request` when `uniqueId` or `status` is missing or invalid, or
///   the rating is outside 1..=5
pub async fn upsert_media_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<TrackMediaRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<TrackedMedia>>)> {
    let identity = state.authenticate(&headers)?;
    let Json(request) = payload?;

    let input = request.validate().map_err(|err| match err {
        ModelError::MissingField(_) => {
            AppError::bad_request("The 'uniqueId' and 'status' fields are required.")
        }
        other => other.into(),
    })?;

    let record = state.tracking.upsert(identity.user_id, input).await?;
    info!(
        user_id = %identity.user_id,
        unique_id = %record.unique_id,
        status = %record.status,
        "tracked media updated"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(record).with_message("Media added/updated successfully!")),
    ))
}

/// Stop tracking an item
///
/// - `204 No Content` when removed
/// - `404 Not Found` when the caller does not track it
pub async fn delete_media_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(unique_id): Path<String>,
) -> AppResult<StatusCode> {
    let identity = state.authenticate(&headers)?;
    let unique_id = UniqueId::parse(&unique_id)?;

    state.tracking.delete(identity.user_id, &unique_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
