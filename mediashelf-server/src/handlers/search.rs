use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use crate::infra::{app_state::AppState, errors::AppResult};
use mediashelf_model::{ApiResponse, NormalizedResult};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Search one external catalog
///
/// # Request
///
/// `GET /api/search?query=matrix&type=movie`, where `type` is one of
/// `movie`, `series` or `book`.
///
/// # Response
///
/// - `200 OK` with `{ "message": .., "data": [NormalizedResult] }`
/// - `400 Bad Request` when `query` or `type` is missing or invalid
/// - `500 Internal Server Error` when the upstream catalog fails
pub async fn search_handler(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> AppResult<Json<ApiResponse<Vec<NormalizedResult>>>> {
    let Query(params) = params?;
    let results = state
        .catalog
        .search(params.query.as_deref(), params.kind.as_deref())
        .await?;

    let kind = params.kind.as_deref().map(str::trim).unwrap_or_default();
    Ok(Json(
        ApiResponse::success(results).with_message(format!("Search for {kind} completed.")),
    ))
}
