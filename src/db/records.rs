// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed operations per collection:
//! - Users and profiles
//! - Email login codes (one per email)
//! - Applications, interviews and documents (queried by owner)

use super::{collections, Db};
use crate::error::AppError;
use crate::models::{EmailOtp, Interview, JobApplication, JobDocument, Profile, User};

/// Document ID for an email-keyed record (`/` is not allowed in Firestore IDs).
fn email_doc_id(email: &str) -> String {
    urlencoding::encode(email).into_owned()
}

impl Db {
    // ─── User Operations ─────────────────────────────────────────

    pub async fn get_user(&self, user_id: u64) -> Result<Option<User>, AppError> {
        self.get(collections::USERS, &user_id.to_string()).await
    }

    /// Look up a user by (normalized) email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let mut users: Vec<User> = self.find_by(collections::USERS, "email", email).await?;
        if users.len() > 1 {
            tracing::warn!(email, count = users.len(), "Duplicate users for email");
        }
        users.sort_by_key(|u| u.date_joined);
        Ok(users.into_iter().next())
    }

    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        self.set(collections::USERS, &user.id.to_string(), user).await
    }

    // ─── Profile Operations ──────────────────────────────────────

    pub async fn get_profile(&self, user_id: u64) -> Result<Option<Profile>, AppError> {
        self.get(collections::PROFILES, &user_id.to_string()).await
    }

    pub async fn upsert_profile(&self, profile: &Profile) -> Result<(), AppError> {
        self.set(collections::PROFILES, &profile.user_id.to_string(), profile)
            .await
    }

    // ─── Login Code Operations ───────────────────────────────────

    pub async fn get_otp(&self, email: &str) -> Result<Option<EmailOtp>, AppError> {
        self.get(collections::EMAIL_OTPS, &email_doc_id(email)).await
    }

    /// Store a code, replacing any outstanding one for the same email.
    pub async fn set_otp(&self, otp: &EmailOtp) -> Result<(), AppError> {
        self.set(collections::EMAIL_OTPS, &email_doc_id(&otp.email), otp)
            .await
    }

    pub async fn delete_otp(&self, email: &str) -> Result<(), AppError> {
        self.delete(collections::EMAIL_OTPS, &email_doc_id(email))
            .await
    }

    /// Consume the outstanding code; `false` if someone else already did.
    pub async fn claim_otp(&self, email: &str) -> Result<bool, AppError> {
        self.take(collections::EMAIL_OTPS, &email_doc_id(email))
            .await
    }

    // ─── Application Operations ──────────────────────────────────

    pub async fn get_application(&self, id: u64) -> Result<Option<JobApplication>, AppError> {
        self.get(collections::APPLICATIONS, &id.to_string()).await
    }

    pub async fn applications_for_owner(
        &self,
        owner_id: u64,
    ) -> Result<Vec<JobApplication>, AppError> {
        self.find_by(collections::APPLICATIONS, "owner_id", owner_id)
            .await
    }

    pub async fn upsert_application(&self, application: &JobApplication) -> Result<(), AppError> {
        self.set(
            collections::APPLICATIONS,
            &application.id.to_string(),
            application,
        )
        .await
    }

    pub async fn delete_application(&self, id: u64) -> Result<(), AppError> {
        self.delete(collections::APPLICATIONS, &id.to_string()).await
    }

    // ─── Interview Operations ────────────────────────────────────

    pub async fn get_interview(&self, id: u64) -> Result<Option<Interview>, AppError> {
        self.get(collections::INTERVIEWS, &id.to_string()).await
    }

    pub async fn interviews_for_owner(&self, owner_id: u64) -> Result<Vec<Interview>, AppError> {
        self.find_by(collections::INTERVIEWS, "owner_id", owner_id)
            .await
    }

    pub async fn interviews_for_application(
        &self,
        job: u64,
    ) -> Result<Vec<Interview>, AppError> {
        self.find_by(collections::INTERVIEWS, "job", job).await
    }

    /// Interviews whose reminder has not gone out yet.
    pub async fn interviews_without_reminder(&self) -> Result<Vec<Interview>, AppError> {
        self.find_by(collections::INTERVIEWS, "reminder_sent", false)
            .await
    }

    pub async fn upsert_interview(&self, interview: &Interview) -> Result<(), AppError> {
        self.set(collections::INTERVIEWS, &interview.id.to_string(), interview)
            .await
    }

    pub async fn delete_interview(&self, id: u64) -> Result<(), AppError> {
        self.delete(collections::INTERVIEWS, &id.to_string()).await
    }

    // ─── Document Operations ─────────────────────────────────────

    pub async fn get_document(&self, id: u64) -> Result<Option<JobDocument>, AppError> {
        self.get(collections::DOCUMENTS, &id.to_string()).await
    }

    pub async fn documents_for_owner(&self, owner_id: u64) -> Result<Vec<JobDocument>, AppError> {
        self.find_by(collections::DOCUMENTS, "owner_id", owner_id)
            .await
    }

    pub async fn documents_for_application(
        &self,
        job: u64,
    ) -> Result<Vec<JobDocument>, AppError> {
        self.find_by(collections::DOCUMENTS, "job", job).await
    }

    pub async fn upsert_document(&self, document: &JobDocument) -> Result<(), AppError> {
        self.set(collections::DOCUMENTS, &document.id.to_string(), document)
            .await
    }

    pub async fn delete_document(&self, id: u64) -> Result<(), AppError> {
        self.delete(collections::DOCUMENTS, &id.to_string()).await
    }
}
