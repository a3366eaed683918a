use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use tracing::{error, warn};

use mediashelf_core::{
    ShelfError,
    auth::{AccountError, AuthRejection},
    catalog::CatalogError,
};
use mediashelf_model::{ErrorBody, ModelError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            message: self.message,
        });

        (self.status, body).into_response()
    }
}

// Convert from various error types
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::BadRequest(msg) => Self::bad_request(msg),
            CatalogError::Upstream {
                provider,
                status,
                message,
            } => {
                warn!(provider, ?status, %message, "catalog upstream failure");
                Self::internal(message)
            }
            CatalogError::Internal(msg) => {
                error!(error = %msg, "catalog search failed");
                Self::internal(msg)
            }
        }
    }
}

impl From<ShelfError> for AppError {
    fn from(err: ShelfError) -> Self {
        match err {
            ShelfError::NotFound(msg) => Self::not_found(msg),
            ShelfError::Conflict(msg) => Self::conflict(msg),
            ShelfError::Database(err) => {
                error!(error = ?err, "database operation failed");
                Self::internal("Database operation failed")
            }
            ShelfError::Internal(msg) => {
                error!(error = %msg, "store operation failed");
                Self::internal("Internal server error")
            }
        }
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::EmailTaken => Self::conflict(err.to_string()),
            AccountError::InvalidCredentials => Self::unauthorized(err.to_string()),
            AccountError::Store(err) => err.into(),
            AccountError::Crypto(err) => {
                error!(error = %err, "password hashing failed");
                Self::internal("Internal server error")
            }
            AccountError::Token(err) => {
                error!(error = %err, "token signing failed");
                Self::internal("Internal server error")
            }
        }
    }
}

impl From<AuthRejection> for AppError {
    fn from(err: AuthRejection) -> Self {
        Self::unauthorized(err.to_string())
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        Self::bad_request(format!("Invalid request body: {}", err.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(err: QueryRejection) -> Self {
        Self::bad_request(format!("Invalid query string: {}", err.body_text()))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string())
    }
}
