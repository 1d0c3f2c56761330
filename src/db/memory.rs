// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store.
//!
//! Documents are kept as JSON values so both backends go through the same
//! serde representation.

use crate::error::AppError;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

type DocKey = (String, String);

#[derive(Clone, Default)]
pub struct MemoryDb {
    docs: Arc<DashMap<DocKey, serde_json::Value>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(collection: &str, id: &str) -> DocKey {
        (collection.to_string(), id.to_string())
    }

    pub fn get<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned,
    {
        let Some(value) = self
            .docs
            .get(&Self::key(collection, id))
            .map(|entry| entry.value().clone())
        else {
            return Ok(None);
        };
        decode(value).map(Some)
    }

    pub fn set<T>(&self, collection: &str, id: &str, value: &T) -> Result<(), AppError>
    where
        T: Serialize,
    {
        let value = serde_json::to_value(value)
            .map_err(|e| AppError::Database(format!("Serialize failed: {}", e)))?;
        self.docs.insert(Self::key(collection, id), value);
        Ok(())
    }

    /// Remove a document; `true` if it existed.
    pub fn take(&self, collection: &str, id: &str) -> bool {
        self.docs.remove(&Self::key(collection, id)).is_some()
    }

    pub fn find_by<T>(
        &self,
        collection: &str,
        field: &str,
        value: &serde_json::Value,
    ) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned,
    {
        // Collect first so no shard lock is held while decoding.
        let matches: Vec<serde_json::Value> = self
            .docs
            .iter()
            .filter(|entry| entry.key().0 == collection && entry.value().get(field) == Some(value))
            .map(|entry| entry.value().clone())
            .collect();

        matches.into_iter().map(decode).collect()
    }
}

fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| AppError::Database(format!("Decode failed: {}", e)))
}
