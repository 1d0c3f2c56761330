// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! Records are stored as documents keyed by ID in named collections. The
//! production backend is Firestore; the in-memory backend serves local
//! development and tests.

pub mod firestore;
pub mod memory;
mod records;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::config::{Config, StorageBackend};
use crate::error::AppError;
use serde::{de::DeserializeOwned, Serialize};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Profiles (keyed by user ID)
    pub const PROFILES: &str = "profiles";
    /// Outstanding login codes (keyed by encoded email)
    pub const EMAIL_OTPS: &str = "email_otps";
    pub const APPLICATIONS: &str = "applications";
    pub const INTERVIEWS: &str = "interviews";
    pub const DOCUMENTS: &str = "documents";
}

/// Storage handle shared by all services. Cheap to clone.
#[derive(Clone)]
pub enum Db {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
}

impl Db {
    /// Connect to the backend selected in the configuration.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        match config.storage_backend {
            StorageBackend::Firestore => Ok(Db::Firestore(
                FirestoreDb::new(&config.gcp_project_id).await?,
            )),
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                Ok(Db::in_memory())
            }
        }
    }

    pub fn in_memory() -> Self {
        Db::Memory(MemoryDb::new())
    }

    /// Fetch one document by ID.
    pub async fn get<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        match self {
            Db::Firestore(db) => db.get(collection, id).await,
            Db::Memory(db) => db.get(collection, id),
        }
    }

    /// Create or replace one document.
    pub async fn set<T>(&self, collection: &str, id: &str, value: &T) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned + Sync + Send,
    {
        match self {
            Db::Firestore(db) => db.set(collection, id, value).await,
            Db::Memory(db) => db.set(collection, id, value),
        }
    }

    /// Delete one document; deleting a missing document is not an error.
    pub async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        match self {
            Db::Firestore(db) => db.delete(collection, id).await,
            Db::Memory(db) => {
                db.take(collection, id);
                Ok(())
            }
        }
    }

    /// Atomically delete a document if it exists.
    ///
    /// Returns `true` only for the caller that actually removed it, so at most
    /// one of several concurrent callers wins.
    pub async fn take(&self, collection: &str, id: &str) -> Result<bool, AppError> {
        match self {
            Db::Firestore(db) => db.take(collection, id).await,
            Db::Memory(db) => Ok(db.take(collection, id)),
        }
    }

    /// All documents whose `field` equals `value`.
    pub async fn find_by<T>(
        &self,
        collection: &str,
        field: &'static str,
        value: impl Into<serde_json::Value>,
    ) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        let value = value.into();
        match self {
            Db::Firestore(db) => db.find_by(collection, field, value).await,
            Db::Memory(db) => db.find_by(collection, field, &value),
        }
    }
}
