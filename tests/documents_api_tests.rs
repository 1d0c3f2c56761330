// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Document API: multipart upload, ownership checks and download.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};

mod common;
use common::{create_test_app, TestApp};

const BOUNDARY: &str = "career-tracker-test-boundary";

fn multipart_body(job: &str, doc_types: &str, file_name: &str, contents: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in [("job", job), ("doc_types", doc_types)] {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n",
            BOUNDARY, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

async fn upload(
    app: &TestApp,
    token: &str,
    job: &str,
    doc_types: &str,
    contents: &[u8],
) -> (StatusCode, Value) {
    app.send(
        Request::builder()
            .method("POST")
            .uri("/api/jobs/documents/")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(job, doc_types, "my resume.pdf", contents)))
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn test_upload_list_and_download() {
    let app = create_test_app();
    let tokens = app.login("jane@example.com").await;
    let job = app.create_application(&tokens.access, json!({})).await;

    let (status, document) = upload(
        &app,
        &tokens.access,
        &job["id"].to_string(),
        "COVER LETTER",
        b"%PDF-1.4 test",
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", document);
    assert_eq!(document["doc_types"], "COVER LETTER");
    assert_eq!(document["file_name"], "my resume.pdf");
    assert!(document["file"]
        .as_str()
        .unwrap()
        .ends_with("_my_resume.pdf"));

    let (_, list) = app
        .request(Method::GET, "/api/jobs/documents/", Some(&tokens.access), None)
        .await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let response = tower::ServiceExt::oneshot(
        app.router.clone(),
        Request::builder()
            .uri(format!("/api/jobs/documents/{}/download/", document["id"]))
            .header(header::AUTHORIZATION, format!("Bearer {}", tokens.access))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .contains("my_resume.pdf"));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"%PDF-1.4 test");
}

#[tokio::test]
async fn test_upload_to_foreign_application_forbidden() {
    let app = create_test_app();
    let jane = app.login("jane@example.com").await;
    let sam = app.login("sam@example.com").await;
    let janes_job = app.create_application(&jane.access, json!({})).await;

    let (status, body) = upload(
        &app,
        &sam.access,
        &janes_job["id"].to_string(),
        "RESUME",
        b"content",
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");
    assert!(app
        .state
        .db
        .documents_for_application(janes_job["id"].as_u64().unwrap())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_upload_validation() {
    let app = create_test_app();
    let tokens = app.login("jane@example.com").await;
    let job = app.create_application(&tokens.access, json!({})).await;
    let job_id = job["id"].to_string();

    let (status, _) = upload(&app, &tokens.access, &job_id, "PAYSLIP", b"x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = upload(&app, &tokens.access, "not-a-number", "RESUME", b"x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = upload(&app, &tokens.access, &job_id, "RESUME", b"").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_foreign_document_not_found_and_delete() {
    let app = create_test_app();
    let jane = app.login("jane@example.com").await;
    let sam = app.login("sam@example.com").await;
    let job = app.create_application(&jane.access, json!({})).await;

    let (_, document) = upload(&app, &jane.access, &job["id"].to_string(), "RESUME", b"cv").await;
    let uri = format!("/api/jobs/documents/{}/", document["id"]);

    for path in [uri.clone(), format!("{}download/", uri)] {
        let (status, _) = app.request(Method::GET, &path, Some(&sam.access), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", path);
    }

    // Re-pointing at someone else's application is forbidden
    let sams_job = app.create_application(&sam.access, json!({})).await;
    let (status, _) = app
        .request(
            Method::PATCH,
            &uri,
            Some(&jane.access),
            Some(json!({"job": sams_job["id"]})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, patched) = app
        .request(
            Method::PATCH,
            &uri,
            Some(&jane.access),
            Some(json!({"doc_types": "OTHERS"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["doc_types"], "OTHERS");

    let (status, _) = app.request(Method::DELETE, &uri, Some(&jane.access), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let key = document["file"].as_str().unwrap();
    assert!(app.state.config.media_root.join(key).metadata().is_err());
}
