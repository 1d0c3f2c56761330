// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use career_tracker::config::Config;
use career_tracker::db::{Db, FirestoreDb};
use career_tracker::routes::create_router;
use career_tracker::services::{MailError, Mailer, OutgoingMail, TokenPair};
use career_tracker::AppState;
use futures_util::future::BoxFuture;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> Db {
    Db::Firestore(
        FirestoreDb::new("test-project")
            .await
            .expect("Failed to connect to Firestore emulator"),
    )
}

/// Mailer that records every message and rejects malformed recipients.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingMail>>,
}

#[allow(dead_code)]
impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }

    /// The code from the most recent login mail to `to`.
    pub fn last_code_for(&self, to: &str) -> String {
        let sent = self.sent.lock().unwrap();
        let mail = sent
            .iter()
            .rev()
            .find(|m| m.to == to)
            .unwrap_or_else(|| panic!("no mail sent to {}", to));
        mail.body
            .split_whitespace()
            .find(|w| w.len() == 6 && w.chars().all(|c| c.is_ascii_digit()))
            .expect("mail contains a code")
            .to_string()
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, mail: OutgoingMail) -> BoxFuture<'_, Result<(), MailError>> {
        Box::pin(async move {
            if let Err(e) = mail.to.parse::<lettre::message::Mailbox>() {
                return Err(MailError::InvalidAddress {
                    address: mail.to.clone(),
                    reason: e.to_string(),
                });
            }
            self.sent.lock().unwrap().push(mail);
            Ok(())
        })
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    pub mailer: Arc<RecordingMailer>,
}

/// Create a test app over in-memory storage and a recording mailer.
#[allow(dead_code)]
pub fn create_test_app() -> TestApp {
    create_test_app_with(Config::test_default(), Db::in_memory())
}

#[allow(dead_code)]
pub fn create_test_app_with(config: Config, db: Db) -> TestApp {
    let mailer = Arc::new(RecordingMailer::default());
    let state = Arc::new(AppState::new(config, db, mailer.clone()).unwrap());

    TestApp {
        router: create_router(state.clone()),
        state,
        mailer,
    }
}

#[allow(dead_code)]
impl TestApp {
    /// Send a request with an optional bearer token and JSON body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    /// Send a raw request and parse the body as JSON (`Null` when empty).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::String(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        };
        (status, value)
    }

    /// Log in through the OTP endpoints and return the issued tokens.
    pub async fn login(&self, email: &str) -> TokenPair {
        let (status, _) = self
            .request(
                Method::POST,
                "/api/users/send-otp/",
                None,
                Some(serde_json::json!({ "email": email })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let code = self.mailer.last_code_for(&email.trim().to_lowercase());
        let (status, body) = self
            .request(
                Method::POST,
                "/api/users/verify-otp/",
                None,
                Some(serde_json::json!({ "email": email, "otp": code })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        serde_json::from_value(body).unwrap()
    }

    /// Create an application for the token's user and return its JSON.
    pub async fn create_application(&self, token: &str, overrides: Value) -> Value {
        let mut body = application_body();
        if let (Value::Object(base), Value::Object(extra)) = (&mut body, overrides) {
            base.extend(extra);
        }
        let (status, created) = self
            .request(Method::POST, "/api/jobs/", Some(token), Some(body))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", created);
        created
    }
}

/// A valid application payload.
#[allow(dead_code)]
pub fn application_body() -> Value {
    serde_json::json!({
        "job_title": "Backend Engineer",
        "role_type": "Full-time",
        "company": "Acme",
        "duration": "Permanent",
        "status": "APPLIED",
        "location": "Berlin",
        "link": "https://acme.example/jobs/42",
        "confidence": "MEDIUM"
    })
}
