// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API authentication and CORS tests.
//!
//! These tests verify that:
//! 1. Protected routes reject requests without valid access tokens
//! 2. Protected routes accept bearer tokens and the session cookie
//! 3. Refresh tokens are only good for the refresh endpoint
//! 4. CORS preflight requests return correct headers

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};

mod common;
use common::create_test_app;

/// A token signed directly with the master key (never valid: sessions use derived keys).
fn create_raw_jwt(user_id: u64, signing_key: &[u8]) -> String {
    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: usize,
        iat: usize,
        jti: String,
        token_type: String,
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + 86400,
        iat: now,
        jti: "raw".to_string(),
        token_type: "access".to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .unwrap()
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = create_test_app();

    let (status, body) = app.request(Method::GET, "/api/jobs/", None, None).await;

    // Should return 401 Unauthorized without token
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_protected_route_with_invalid_token() {
    let app = create_test_app();

    let (status, body) = app
        .request(Method::GET, "/api/jobs/", Some("invalid.token.here"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");

    let raw = create_raw_jwt(1, &app.state.config.jwt_signing_key);
    let (status, body) = app
        .request(Method::GET, "/api/jobs/", Some(&raw), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_protected_route_with_valid_token() {
    let app = create_test_app();
    let tokens = app.login("jane@example.com").await;

    let (status, body) = app
        .request(Method::GET, "/api/jobs/", Some(&tokens.access), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_refresh_token_rejected_as_access() {
    let app = create_test_app();
    let tokens = app.login("jane@example.com").await;

    let (status, _) = app
        .request(Method::GET, "/api/jobs/", Some(&tokens.refresh), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_cookie_accepted() {
    let app = create_test_app();
    let tokens = app.login("jane@example.com").await;

    let (status, _) = app
        .send(
            Request::builder()
                .method("GET")
                .uri("/api/users/profile/")
                .header(header::COOKIE, format!("access_token={}", tokens.access))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_endpoint() {
    let app = create_test_app();
    let tokens = app.login("jane@example.com").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/refresh/",
            None,
            Some(json!({ "refresh": tokens.refresh })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let access = body["access"].as_str().unwrap().to_string();

    let (status, _) = app
        .request(Method::GET, "/api/jobs/", Some(&access), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    // An access token is not a refresh token
    let (status, body) = app
        .request(
            Method::POST,
            "/api/refresh/",
            None,
            Some(json!({ "refresh": tokens.access })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_verify_sets_session_cookie() {
    let app = create_test_app();
    app.request(
        Method::POST,
        "/api/users/send-otp/",
        None,
        Some(json!({ "email": "jane@example.com" })),
    )
    .await;
    let code = app.mailer.last_code_for("jane@example.com");

    let response = tower::ServiceExt::oneshot(
        app.router.clone(),
        Request::builder()
            .method("POST")
            .uri("/api/users/verify-otp/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "email": "jane@example.com", "otp": code }).to_string(),
            ))
            .unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("access_token="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = create_test_app();

    let response = tower::ServiceExt::oneshot(
        app.router.clone(),
        Request::builder()
            .method("POST")
            .uri("/api/users/logout/")
            .header(header::COOKIE, "access_token=stale")
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("access_token="));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = create_test_app();

    let response = tower::ServiceExt::oneshot(
        app.router.clone(),
        Request::builder()
            .method("OPTIONS")
            .uri("/api/jobs/")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    // OPTIONS should return 200 (CORS preflight success)
    assert_eq!(response.status(), StatusCode::OK);

    // Should have CORS headers
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn test_public_route_no_auth_required() {
    let app = create_test_app();

    let (status, body) = app.request(Method::GET, "/health", None, None).await;

    // Health should be accessible without auth
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
