use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use mediashelf_core::catalog::CatalogAggregator;
use mediashelf_server::create_app;
use serde_json::Value;
use tower::ServiceExt;

#[path = "support/mod.rs"]
mod support;
use support::{StubCatalog, build_state, sample_results, test_config};

fn app(dev_mode: bool) -> anyhow::Result<axum::Router> {
    let mut config = test_config();
    config.dev_mode = dev_mode;
    config.cors.allowed_origins = vec!["https://shelf.example.com".into()];

    let catalog = CatalogAggregator::new(
        Arc::new(StubCatalog::with_results(sample_results())),
        Arc::new(StubCatalog::with_results(sample_results())),
    );
    Ok(create_app(build_state(config, catalog)?))
}

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/media")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization,content-type")
        .body(Body::empty())
        .expect("valid request")
}

#[tokio::test]
async fn configured_origins_pass_preflight() -> anyhow::Result<()> {
    let response = app(false)?
        .oneshot(preflight("https://shelf.example.com"))
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("https://shelf.example.com")
    );
    Ok(())
}

#[tokio::test]
async fn unknown_origins_get_no_cors_grant() -> anyhow::Result<()> {
    let response = app(false)?
        .oneshot(preflight("https://evil.example.net"))
        .await?;

    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
    Ok(())
}

#[tokio::test]
async fn unknown_routes_are_not_found() -> anyhow::Result<()> {
    let response = app(true)?
        .oneshot(
            Request::builder()
                .uri("/api/nope")
                .body(Body::empty())
                .expect("valid request"),
        )
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn search_errors_render_the_message_envelope() -> anyhow::Result<()> {
    let response = app(true)?
        .oneshot(
            Request::builder()
                .uri("/api/search?query=dune")
                .body(Body::empty())
                .expect("valid request"),
        )
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body, serde_json::json!({ "message": "The 'query' and 'type' parameters are required." }));
    Ok(())
}
