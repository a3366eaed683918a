//! HTTP surface of mediashelf.
//!
//! `create_app` assembles the router; the binary in `main.rs` owns config
//! loading, store lifecycles and shutdown.

pub mod handlers;
pub mod infra;
pub mod routes;

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
    routing::get,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub use infra::app_state::AppState;
use infra::config::CorsConfig;

pub fn create_app(state: AppState) -> Router {
    let cors_layer = build_cors_layer(&state.config().cors, state.config().dev_mode);

    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(routes::create_api_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

fn build_cors_layer(cors: &CorsConfig, dev_mode: bool) -> CorsLayer {
    if dev_mode {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    let allowed_headers: [HeaderName; 2] = [header::AUTHORIZATION, header::CONTENT_TYPE];
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(allowed_headers)
}
