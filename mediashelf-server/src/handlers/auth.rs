use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use tracing::info;

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};
use mediashelf_model::{
    ApiResponse, LoginRequest, LoginResponse, ModelError, RegisterRequest, RegisterResponse,
    User,
};

const CREDENTIALS_REQUIRED: &str = "Email and password are required.";

fn credential_error(err: ModelError) -> AppError {
    match err {
        ModelError::MissingField(_) => AppError::bad_request(CREDENTIALS_REQUIRED),
        other => other.into(),
    }
}

/// Create an account
///
/// # Request
///
/// ```json
/// { "email": "alice@example.com", "password": "hunter22", "name": "Alice" }
/// ```
///
/// # Response
///
/// - `201 Created` with `{ "message": .., "user": User }`
/// - `400 Bad Request` when email or password is missing or malformed
/// - `409 Conflict` when the email is already registered
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(request) = payload?;
    let account = request.validate().map_err(credential_error)?;

    let user = state.accounts.register(account).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful!".to_string(),
            user,
        }),
    ))
}

/// Exchange credentials for a session token
///
/// Unknown emails and wrong passwords both answer `401 Invalid credentials`.
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(request) = payload?;
    let (email, password) = request.credentials().map_err(credential_error)?;

    let session = state.accounts.login(&email, &password).await?;
    info!(user_id = %session.user.id, "user logged in");

    Ok(Json(LoginResponse {
        message: "Login successful!".to_string(),
        user: session.user,
        token: session.token,
    }))
}

/// Profile of the authenticated caller
pub async fn me_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<ApiResponse<User>>> {
    let identity = state.authenticate(&headers)?;

    let user = state
        .accounts
        .current_user(identity.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found."))?;

    Ok(Json(
        ApiResponse::success(user).with_message("User data retrieved successfully."),
    ))
}
