// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use vibrantly::config::Config;
use vibrantly::db::JsonStore;
use vibrantly::routes::create_router;
use vibrantly::AppState;

/// Open a store in a fresh temporary directory. Keep the `TempDir` alive
/// for as long as the store is used.
#[allow(dead_code)]
pub async fn test_store() -> (JsonStore, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = JsonStore::open(dir.path())
        .await
        .expect("Failed to open store");
    (store, dir)
}

/// Create a test app over a temporary data directory with the admin seeded.
/// Returns the router, the shared state and the directory guard.
#[allow(dead_code)]
pub async fn create_test_app() -> (Router, Arc<AppState>, TempDir) {
    let (store, dir) = test_store().await;
    let config = Config {
        data_dir: dir.path().to_path_buf(),
        ..Config::test_default()
    };

    let state = Arc::new(AppState::new(config, store));
    state
        .users
        .seed_admin(&state.config.admin_email, &state.config.admin_password)
        .await
        .expect("Failed to seed admin");

    (create_router(state.clone()), state, dir)
}

/// Build a request with an optional JSON body and session cookie.
#[allow(dead_code)]
pub fn request(method: &str, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send one request through a clone of the router.
#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}

#[allow(dead_code)]
pub fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

/// `name=value` pair of the session cookie set by `response`, ready to be
/// sent back in a `Cookie` header.
#[allow(dead_code)]
pub fn session_cookie(response: &Response) -> String {
    let headers = set_cookie_headers(response);
    let cookie = headers
        .iter()
        .find(|value| value.starts_with("vibrantly_session="))
        .unwrap_or_else(|| panic!("missing session cookie: {headers:?}"));
    cookie.split(';').next().unwrap().to_string()
}

/// Log in and return the session cookie pair.
#[allow(dead_code)]
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let response = send(
        app,
        request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({ "email": email, "password": password })),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK, "login failed");
    session_cookie(&response)
}

#[allow(dead_code)]
pub async fn login_admin(app: &Router, state: &AppState) -> String {
    login(app, &state.config.admin_email, &state.config.admin_password).await
}

/// Register through open signup and return the session cookie pair.
#[allow(dead_code)]
pub async fn register(app: &Router, email: &str, password: &str) -> String {
    let response = send(
        app,
        request(
            "POST",
            "/auth/register",
            Some(serde_json::json!({
                "email": email,
                "password": password,
                "firstName": "Test",
                "lastName": "User"
            })),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK, "register failed");
    session_cookie(&response)
}
