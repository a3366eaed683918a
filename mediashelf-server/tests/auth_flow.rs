use axum::http::StatusCode;
use serde_json::{Value, json};

#[path = "support/mod.rs"]
mod support;
use support::{bearer, build_test_app, register_and_login};

#[tokio::test]
async fn register_creates_account_without_exposing_hash() -> anyhow::Result<()> {
    let app = build_test_app()?;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "email": "  Alice@Example.com ",
            "password": "correct horse",
            "name": "Alice"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["message"], "Registration successful!");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["name"], "Alice");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() -> anyhow::Result<()> {
    let app = build_test_app()?;
    let payload = json!({ "email": "bob@example.com", "password": "pw-one" });

    app.server
        .post("/api/auth/register")
        .json(&payload)
        .await
        .assert_status(StatusCode::CREATED);

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({ "email": "BOB@example.com", "password": "pw-two" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["message"], "An account with this email already exists.");
    Ok(())
}

#[tokio::test]
async fn register_requires_email_and_password() -> anyhow::Result<()> {
    let app = build_test_app()?;

    for payload in [
        json!({}),
        json!({ "email": "carol@example.com" }),
        json!({ "password": "secret" }),
        json!({ "email": "   ", "password": "secret" }),
    ] {
        let response = app.server.post("/api/auth/register").json(&payload).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Email and password are required.");
    }

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({ "email": "not-an-email", "password": "secret" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn login_returns_token_for_valid_credentials() -> anyhow::Result<()> {
    let app = build_test_app()?;
    let token = register_and_login(&app.server, "dave@example.com", "hunter22").await;
    assert!(!token.is_empty());

    let claims = app.state.tokens.verify(&token)?;
    let me = app
        .server
        .get("/api/auth/me")
        .add_header("Authorization", bearer(&token))
        .await;
    me.assert_status_ok();
    let body: Value = me.json();
    assert_eq!(body["message"], "User data retrieved successfully.");
    assert_eq!(body["data"]["id"], claims.sub.to_string());
    assert_eq!(body["data"]["email"], "dave@example.com");
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() -> anyhow::Result<()> {
    let app = build_test_app()?;
    register_and_login(&app.server, "erin@example.com", "right-password").await;

    for payload in [
        json!({ "email": "erin@example.com", "password": "wrong-password" }),
        json!({ "email": "nobody@example.com", "password": "right-password" }),
    ] {
        let response = app.server.post("/api/auth/login").json(&payload).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["message"], "Invalid credentials");
    }

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "erin@example.com" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn me_rejects_missing_and_invalid_tokens() -> anyhow::Result<()> {
    let app = build_test_app()?;

    let response = app.server.get("/api/auth/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Access denied. Token not provided.");

    let response = app
        .server
        .get("/api/auth/me")
        .add_header("Authorization", "Basic dXNlcjpwYXNz")
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Access denied. Token not provided.");

    let response = app
        .server
        .get("/api/auth/me")
        .add_header("Authorization", bearer("not-a-jwt"))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid or expired token.");
    Ok(())
}

#[tokio::test]
async fn me_is_not_found_when_token_user_is_gone() -> anyhow::Result<()> {
    let app = build_test_app()?;
    let orphan = app.state.tokens.issue(uuid::Uuid::now_v7())?;

    let response = app
        .server
        .get("/api/auth/me")
        .add_header("Authorization", bearer(&orphan))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "User not found.");
    Ok(())
}

#[tokio::test]
async fn health_reports_ok() -> anyhow::Result<()> {
    let app = build_test_app()?;

    let response = app.server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    Ok(())
}
