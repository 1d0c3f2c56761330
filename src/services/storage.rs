// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Uploaded file storage on the local filesystem.
//!
//! Files live under `media_root` at keys of the form
//! `documents/<random hex>_<sanitized name>`. Keys are generated here and
//! never taken from clients.

use crate::crypto;
use crate::error::{AppError, Result};
use std::path::{Component, Path, PathBuf};

const DOCUMENTS_DIR: &str = "documents";
const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store an upload and return its key.
    pub async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<String> {
        let key = format!(
            "{}/{}_{}",
            DOCUMENTS_DIR,
            hex::encode(crypto::random_bytes::<8>()?),
            sanitize_file_name(file_name)
        );
        let path = self.path_for(&key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Internal(anyhow::anyhow!("Create media dir failed: {}", e)))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Write upload failed: {}", e)))?;

        tracing::debug!(key = %key, size = bytes.len(), "Stored upload");
        Ok(key)
    }

    pub async fn read(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound("File not found".to_string()))
            }
            Err(e) => Err(AppError::Internal(anyhow::anyhow!(
                "Read upload failed: {}",
                e
            ))),
        }
    }

    /// Remove a stored file. A missing file is not an error.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(key = %key, "Stored file already gone");
                Ok(())
            }
            Err(e) => Err(AppError::Internal(anyhow::anyhow!(
                "Remove upload failed: {}",
                e
            ))),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || key.is_empty() {
            return Err(AppError::BadRequest("Invalid file key".to_string()));
        }
        Ok(self.root.join(relative))
    }
}

/// Reduce a client-supplied name to a safe basename.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_NAME_LEN)
        .collect();

    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "upload".to_string()
    } else {
        trimmed.to_string()
    }
}
