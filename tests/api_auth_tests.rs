// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! Authentication API tests.
//!
//! These tests verify that:
//! 1. Registration and login set a usable session cookie
//! 2. Login failures do not reveal whether the account exists
//! 3. Protected routes reject requests without a valid session
//! 4. Logout ends the session and removes the cookie

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{body_json, request, send};

#[tokio::test]
async fn test_register_then_me_returns_same_user() {
    let (app, _state, _dir) = common::create_test_app().await;

    let response = send(
        &app,
        request(
            "POST",
            "/auth/register",
            Some(json!({
                "email": "a@x.com",
                "password": "longenough1",
                "firstName": "A",
                "lastName": "B"
            })),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = common::session_cookie(&response);
    let body = body_json(response).await;

    assert_eq!(body["redirectTo"], "/onboarding");
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["onboardingComplete"], false);
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("passwordHash").is_none());

    let me = send(&app, request("GET", "/auth/me", None, Some(&cookie))).await;
    assert_eq!(me.status(), StatusCode::OK);
    let me = body_json(me).await;
    assert_eq!(me["user"]["id"], body["user"]["id"]);
    assert_eq!(me["user"]["email"], "a@x.com");
}

#[tokio::test]
async fn test_session_cookie_attributes() {
    let (app, state, _dir) = common::create_test_app().await;

    let response = send(
        &app,
        request(
            "POST",
            "/auth/login",
            Some(json!({
                "email": state.config.admin_email,
                "password": state.config.admin_password
            })),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookies = common::set_cookie_headers(&response);
    let cookie = cookies
        .iter()
        .find(|c| c.starts_with("vibrantly_session="))
        .expect("session cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Expires="));
    assert!(!cookie.contains("Secure"));

    let body = body_json(response).await;
    assert_eq!(body["redirectTo"], "/admin");
    assert_eq!(body["user"]["role"], "admin");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (app, _state, _dir) = common::create_test_app().await;
    common::register(&app, "known@x.com", "longenough1").await;

    let wrong_password = send(
        &app,
        request(
            "POST",
            "/auth/login",
            Some(json!({ "email": "known@x.com", "password": "wrong-password" })),
            None,
        ),
    )
    .await;
    let unknown_email = send(
        &app,
        request(
            "POST",
            "/auth/login",
            Some(json!({ "email": "nobody@x.com", "password": "longenough1" })),
            None,
        ),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert!(common::set_cookie_headers(&wrong_password).is_empty());

    let a = body_json(wrong_password).await;
    let b = body_json(unknown_email).await;
    assert_eq!(a, b);
    assert_eq!(a["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let (app, _state, _dir) = common::create_test_app().await;
    common::register(&app, "Mixed@Case.com", "longenough1").await;

    let response = send(
        &app,
        request(
            "POST",
            "/auth/login",
            Some(json!({ "email": "mixed@case.com", "password": "longenough1" })),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["redirectTo"], "/onboarding");
}

#[tokio::test]
async fn test_login_requires_fields() {
    let (app, _state, _dir) = common::create_test_app().await;

    let response = send(
        &app,
        request("POST", "/auth/login", Some(json!({ "email": "a@x.com" })), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Email and password are required"
    );
}

#[tokio::test]
async fn test_register_validation() {
    let (app, _state, _dir) = common::create_test_app().await;

    let missing = send(
        &app,
        request(
            "POST",
            "/auth/register",
            Some(json!({ "email": "v@x.com", "password": "longenough1" })),
            None,
        ),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(missing).await["error"], "All fields are required");

    let weak = send(
        &app,
        request(
            "POST",
            "/auth/register",
            Some(json!({
                "email": "v@x.com",
                "password": "short",
                "firstName": "V",
                "lastName": "W"
            })),
            None,
        ),
    )
    .await;
    assert_eq!(weak.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(weak).await["error"],
        "Password must be at least 8 characters"
    );
}

#[tokio::test]
async fn test_register_duplicate_email_creates_nothing() {
    let (app, state, _dir) = common::create_test_app().await;
    common::register(&app, "dup@x.com", "longenough1").await;
    let count = state.users.list().await.unwrap().len();

    let response = send(
        &app,
        request(
            "POST",
            "/auth/register",
            Some(json!({
                "email": "DUP@x.com",
                "password": "longenough2",
                "firstName": "D",
                "lastName": "U"
            })),
            None,
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(common::set_cookie_headers(&response).is_empty());
    assert_eq!(
        body_json(response).await["error"],
        "An account with this email already exists"
    );
    assert_eq!(state.users.list().await.unwrap().len(), count);
}

#[tokio::test]
async fn test_protected_route_without_session() {
    let (app, _state, _dir) = common::create_test_app().await;

    let response = send(&app, request("GET", "/auth/me", None, None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Unauthorized");

    let response = send(
        &app,
        request("GET", "/user/profile", None, Some("vibrantly_session=garbage")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        request(
            "GET",
            "/user/profile",
            None,
            Some(&format!("vibrantly_session={}", uuid::Uuid::new_v4())),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_for_missing_user_is_not_authenticated() {
    let (app, state, _dir) = common::create_test_app().await;
    let session = state.sessions.create(uuid::Uuid::new_v4()).await.unwrap();

    let response = send(
        &app,
        request(
            "GET",
            "/auth/me",
            None,
            Some(&format!("vibrantly_session={}", session.id)),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_ends_session_and_clears_cookie() {
    let (app, _state, _dir) = common::create_test_app().await;
    let cookie = common::register(&app, "bye@x.com", "longenough1").await;

    let response = send(&app, request("POST", "/auth/logout", None, Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookies = common::set_cookie_headers(&response);
    let removal = cookies
        .iter()
        .find(|c| c.starts_with("vibrantly_session="))
        .expect("removal cookie");
    assert!(removal.contains("Max-Age=0"));
    assert!(removal.contains("Path=/"));
    assert!(removal.contains("HttpOnly"));
    assert_eq!(body_json(response).await["success"], true);

    // The old cookie no longer works even though it has not expired.
    let me = send(&app, request("GET", "/auth/me", None, Some(&cookie))).await;
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session() {
    let (app, _state, _dir) = common::create_test_app().await;

    let response = send(&app, request("POST", "/auth/logout", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(common::set_cookie_headers(&response)
        .iter()
        .any(|c| c.starts_with("vibrantly_session=") && c.contains("Max-Age=0")));
}

#[tokio::test]
async fn test_public_route_no_auth_required() {
    let (app, _state, _dir) = common::create_test_app().await;

    let response = send(&app, request("GET", "/health", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _state, _dir) = common::create_test_app().await;

    let response = send(
        &app,
        axum::http::Request::builder()
            .method("OPTIONS")
            .uri("/user/profile")
            .header(axum::http::header::ORIGIN, "http://localhost:3000")
            .header(axum::http::header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert_eq!(
        response
            .headers()
            .get(axum::http::header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_cors_rejects_lookalike_local_origin() {
    let (app, _state, _dir) = common::create_test_app().await;

    let response = send(
        &app,
        axum::http::Request::builder()
            .method("OPTIONS")
            .uri("/user/profile")
            .header(axum::http::header::ORIGIN, "http://localhost.attacker.example")
            .header(axum::http::header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await;

    assert!(!response
        .headers()
        .contains_key(axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
