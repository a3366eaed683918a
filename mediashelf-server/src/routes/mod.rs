use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::handlers::{auth, media, search};
use crate::infra::app_state::AppState;

pub mod paths {
    pub const SEARCH: &str = "/search";
    pub const REGISTER: &str = "/auth/register";
    pub const LOGIN: &str = "/auth/login";
    pub const ME: &str = "/auth/me";
    pub const MEDIA: &str = "/media";
    pub const MEDIA_ITEM: &str = "/media/{unique_id}";
}

/// JSON API mounted under `/api`
pub fn create_api_router() -> Router<AppState> {
    let routes = Router::new()
        .route(paths::SEARCH, get(search::search_handler))
        .route(paths::REGISTER, post(auth::register_handler))
        .route(paths::LOGIN, post(auth::login_handler))
        .route(paths::ME, get(auth::me_handler))
        .route(
            paths::MEDIA,
            get(media::list_media_handler).post(media::upsert_media_handler),
        )
        .route(paths::MEDIA_ITEM, delete(media::delete_media_handler));

    Router::new().nest("/api", routes)
}
