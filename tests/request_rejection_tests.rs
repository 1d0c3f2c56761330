// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Requests the extractors refuse still get the JSON error body.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;

mod common;
use common::{application_body, create_test_app};

#[tokio::test]
async fn test_create_missing_field() {
    let app = create_test_app();
    let tokens = app.login("jane@example.com").await;

    let mut body = application_body();
    body.as_object_mut().unwrap().remove("company");

    let (status, body) = app
        .request(Method::POST, "/api/jobs/", Some(&tokens.access), Some(body))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"].as_str().unwrap().contains("company"));
}

#[tokio::test]
async fn test_unknown_status_on_create_and_put() {
    let app = create_test_app();
    let tokens = app.login("jane@example.com").await;

    let mut hired = application_body();
    hired["status"] = json!("HIRED");
    let (status, body) = app
        .request(
            Method::POST,
            "/api/jobs/",
            Some(&tokens.access),
            Some(hired.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let created = app.create_application(&tokens.access, json!({})).await;
    let uri = format!("/api/jobs/{}/", created["id"]);
    let (status, body) = app
        .request(Method::PUT, &uri, Some(&tokens.access), Some(hired))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    // Record untouched
    let (_, current) = app
        .request(Method::GET, &uri, Some(&tokens.access), None)
        .await;
    assert_eq!(current["status"], "APPLIED");
}

#[tokio::test]
async fn test_verify_otp_missing_code() {
    let app = create_test_app();

    let (status, body) = app
        .request(
            Method::POST,
            "/api/users/verify-otp/",
            None,
            Some(json!({ "email": "jane@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_unknown_filter_value() {
    let app = create_test_app();
    let tokens = app.login("jane@example.com").await;

    let (status, body) = app
        .request(
            Method::GET,
            "/api/jobs/?status=bogus",
            Some(&tokens.access),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_non_numeric_id() {
    let app = create_test_app();
    let tokens = app.login("jane@example.com").await;

    let (status, body) = app
        .request(Method::GET, "/api/jobs/abc/", Some(&tokens.access), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_malformed_json_body() {
    let app = create_test_app();
    let tokens = app.login("jane@example.com").await;

    let (status, body) = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/jobs/")
                .header(header::AUTHORIZATION, format!("Bearer {}", tokens.access))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"company\": "))
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, body) = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/jobs/")
                .header(header::AUTHORIZATION, format!("Bearer {}", tokens.access))
                .body(Body::from(application_body().to_string()))
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_upload_without_multipart_body() {
    let app = create_test_app();
    let tokens = app.login("jane@example.com").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/jobs/documents/",
            Some(&tokens.access),
            Some(json!({ "name": "resume.pdf" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}
