//! Core data model definitions shared across mediashelf crates.
#![allow(missing_docs)]

pub mod api;
pub mod error;
pub mod media_kind;
pub mod result;
pub mod tracking;
pub mod unique_id;
pub mod user;

// Intentionally curated re-exports for downstream consumers.
pub use api::{ApiResponse, ErrorBody};
pub use error::{ModelError, Result as ModelResult};
pub use media_kind::MediaKind;
pub use result::{NormalizedResult, UNKNOWN_TITLE, UNKNOWN_YEAR};
pub use tracking::{
    Rating, TrackMediaInput, TrackMediaRequest, TrackedMedia, TrackingStatus,
    YearInput,
};
pub use unique_id::{CatalogSource, UniqueId};
pub use user::{
    LoginRequest, LoginResponse, NewAccount, RegisterRequest,
    RegisterResponse, User, normalize_email,
};
