// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Document repository: upload metadata plus the stored bytes.

use crate::crypto;
use crate::db::Db;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{merge_patch, DocumentInput, DocumentType, JobDocument};
use crate::services::authz::{can, Action, Resource};
use crate::services::storage::FileStore;
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentQuery {
    /// Only documents for this application
    pub job: Option<u64>,
}

/// A new upload, as parsed from the multipart body.
#[derive(Debug)]
pub struct Upload {
    pub job: u64,
    pub doc_types: DocumentType,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct DocumentRepository {
    db: Db,
    files: FileStore,
}

impl DocumentRepository {
    pub fn new(db: Db, files: FileStore) -> Self {
        Self { db, files }
    }

    /// Caller's documents, newest first.
    pub async fn list(&self, identity: &AuthUser, query: &DocumentQuery) -> Result<Vec<JobDocument>> {
        let mut documents: Vec<JobDocument> = self
            .db
            .documents_for_owner(identity.user_id)
            .await?
            .into_iter()
            .filter(|d| query.job.is_none_or(|job| d.job == job))
            .collect();

        documents.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at).then(b.id.cmp(&a.id)));
        Ok(documents)
    }

    pub async fn get(&self, identity: &AuthUser, id: u64) -> Result<JobDocument> {
        self.load(identity, id, Action::Read).await
    }

    /// Stored bytes of one of the caller's documents.
    pub async fn download(&self, identity: &AuthUser, id: u64) -> Result<(JobDocument, Vec<u8>)> {
        let document = self.load(identity, id, Action::Read).await?;
        let bytes = self.files.read(&document.file).await?;
        Ok((document, bytes))
    }

    pub async fn create(&self, identity: &AuthUser, upload: Upload) -> Result<JobDocument> {
        if upload.bytes.is_empty() {
            return Err(AppError::Validation("The submitted file is empty".to_string()));
        }
        self.check_application(identity, upload.job).await?;

        let file = self.files.save(&upload.file_name, &upload.bytes).await?;
        let document = JobDocument {
            id: crypto::random_id()?,
            owner_id: identity.user_id,
            job: upload.job,
            file,
            file_name: upload.file_name,
            doc_types: upload.doc_types,
            uploaded_at: Utc::now(),
        };

        if let Err(e) = self.db.upsert_document(&document).await {
            // Do not leave an orphaned file behind.
            self.files.remove(&document.file).await.ok();
            return Err(e);
        }

        tracing::info!(
            user_id = identity.user_id,
            document_id = document.id,
            application_id = document.job,
            size = upload.bytes.len(),
            "Document uploaded"
        );
        Ok(document)
    }

    pub async fn update(
        &self,
        identity: &AuthUser,
        id: u64,
        input: DocumentInput,
    ) -> Result<JobDocument> {
        let mut document = self.load(identity, id, Action::Update).await?;
        self.save_changes(identity, &mut document, input).await?;
        Ok(document)
    }

    pub async fn patch(
        &self,
        identity: &AuthUser,
        id: u64,
        patch: serde_json::Value,
    ) -> Result<JobDocument> {
        let mut document = self.load(identity, id, Action::Update).await?;
        let input: DocumentInput = merge_patch(&document.to_input(), patch)?;
        self.save_changes(identity, &mut document, input).await?;
        Ok(document)
    }

    pub async fn delete(&self, identity: &AuthUser, id: u64) -> Result<()> {
        let document = self.load(identity, id, Action::Delete).await?;
        self.db.delete_document(document.id).await?;
        if let Err(e) = self.files.remove(&document.file).await {
            tracing::warn!(document_id = id, error = %e, "Failed to remove stored file");
        }
        tracing::info!(user_id = identity.user_id, document_id = id, "Document deleted");
        Ok(())
    }

    async fn save_changes(
        &self,
        identity: &AuthUser,
        document: &mut JobDocument,
        input: DocumentInput,
    ) -> Result<()> {
        if input.job != document.job {
            self.check_application(identity, input.job).await?;
        }
        document.job = input.job;
        document.doc_types = input.doc_types;
        self.db.upsert_document(document).await?;
        tracing::debug!(document_id = document.id, "Document updated");
        Ok(())
    }

    /// The target application must belong to the caller.
    async fn check_application(&self, identity: &AuthUser, job: u64) -> Result<()> {
        match self.db.get_application(job).await? {
            Some(application) if can(identity, Action::Attach, Resource::Application(&application)) => {
                Ok(())
            }
            Some(_) => Err(AppError::Forbidden(
                "You do not have permission to attach documents to this job application".to_string(),
            )),
            None => Err(AppError::Validation(format!("Application {} does not exist", job))),
        }
    }

    async fn load(&self, identity: &AuthUser, id: u64, action: Action) -> Result<JobDocument> {
        match self.db.get_document(id).await? {
            Some(document) if can(identity, action, Resource::Document(&document)) => Ok(document),
            _ => Err(AppError::NotFound(format!("Document {} not found", id))),
        }
    }
}
