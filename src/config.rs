// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Secrets are read once at startup and cached in memory. A `.env` file is
//! honoured for local development.

use std::env;
use std::path::PathBuf;

/// How long an emailed login code stays valid.
pub const OTP_VALIDITY_MINUTES: i64 = 5;

/// Interviews starting within this many hours get a reminder.
pub const REMINDER_HORIZON_HOURS: i64 = 24;

/// Header carrying the shared secret for `/tasks/*` routes.
pub const TASKS_TOKEN_HEADER: &str = "x-tasks-token";

/// Where records are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Google Cloud Firestore (or its emulator).
    Firestore,
    /// Process-local maps; data is lost on restart.
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(Self::Firestore),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::Invalid("STORAGE_BACKEND")),
        }
    }
}

/// SMTP relay settings. Absent means mail is logged instead of sent.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Persistence backend
    pub storage_backend: StorageBackend,
    /// Access token lifetime in minutes
    pub access_token_ttl_minutes: i64,
    /// Refresh token lifetime in hours
    pub refresh_token_ttl_hours: i64,
    /// Sender mailbox, e.g. `CareerTracker <no-reply@example.com>`
    pub mail_from: String,
    /// SMTP relay, if any
    pub smtp: Option<SmtpConfig>,
    /// Root directory for uploaded documents
    pub media_root: PathBuf,
    /// Maximum accepted multipart body size
    pub max_upload_bytes: usize,

    // --- Secrets ---
    /// Master key; token and OTP keys are derived from it (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Shared secret for scheduler-triggered task routes (empty disables them)
    pub tasks_token: String,
}

impl Config {
    /// Config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            storage_backend: StorageBackend::Memory,
            access_token_ttl_minutes: 5,
            refresh_token_ttl_hours: 24,
            mail_from: "CareerTracker <no-reply@localhost>".to_string(),
            smtp: None,
            media_root: env::temp_dir().join("career-tracker-test-media"),
            max_upload_bytes: 10 * 1024 * 1024,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            tasks_token: "test_tasks_token".to_string(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let smtp = match env::var("SMTP_HOST") {
            Ok(host) if !host.trim().is_empty() => Some(SmtpConfig {
                host: host.trim().to_string(),
                port: parse_or("SMTP_PORT", 587)?,
                username: env::var("SMTP_USERNAME").ok(),
                password: env::var("SMTP_PASSWORD").map(|v| v.trim().to_string()).ok(),
            }),
            _ => None,
        };

        let jwt_signing_key = env::var("JWT_SIGNING_KEY")
            .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
            .into_bytes();
        if jwt_signing_key.len() < 32 {
            return Err(ConfigError::Invalid("JWT_SIGNING_KEY"));
        }

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: parse_or("PORT", 8080)?,
            storage_backend: env::var("STORAGE_BACKEND")
                .unwrap_or_else(|_| "firestore".to_string())
                .parse()?,
            access_token_ttl_minutes: parse_or("ACCESS_TOKEN_TTL_MINUTES", 5)?,
            refresh_token_ttl_hours: parse_or("REFRESH_TOKEN_TTL_HOURS", 24)?,
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "CareerTracker <no-reply@localhost>".to_string()),
            smtp,
            media_root: env::var("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("media")),
            max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            jwt_signing_key,
            tasks_token: env::var("TASKS_TOKEN")
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
