// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod application;
pub mod document;
pub mod interview;
pub mod otp;
pub mod stats;
pub mod user;

pub use application::{ApplicationInput, Confidence, JobApplication, Source, Status};
pub use document::{DocumentInput, DocumentType, JobDocument};
pub use interview::{Interview, InterviewInput, InterviewType};
pub use otp::EmailOtp;
pub use stats::{RateSummary, StatusCount, Summary};
pub use user::{normalize_email, Profile, ProfileInput, User, UserNames};

use crate::error::{AppError, Result};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

/// Apply a JSON merge patch (RFC 7396) to `current` and parse the result back.
///
/// Objects merge recursively, `null` removes a key (clearing optional
/// fields), anything else replaces the current value. The merged record is
/// parsed again, so required fields and enum values are re-checked.
pub fn merge_patch<T>(current: &T, patch: serde_json::Value) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    if !patch.is_object() {
        return Err(AppError::BadRequest("Expected a JSON object".to_string()));
    }

    let mut merged = serde_json::to_value(current)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Serialize failed: {}", e)))?;
    merge_value(&mut merged, patch);

    serde_json::from_value(merged).map_err(|e| AppError::Validation(e.to_string()))
}

fn merge_value(target: &mut serde_json::Value, patch: serde_json::Value) {
    let serde_json::Value::Object(changes) = patch else {
        *target = patch;
        return;
    };

    if !target.is_object() {
        *target = serde_json::Value::Object(serde_json::Map::new());
    }
    if let serde_json::Value::Object(fields) = target {
        for (key, value) in changes {
            if value.is_null() {
                fields.remove(&key);
            } else {
                merge_value(fields.entry(key).or_insert(serde_json::Value::Null), value);
            }
        }
    }
}

/// Treat an empty string like an omitted optional value.
pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
