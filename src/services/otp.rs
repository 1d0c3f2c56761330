// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Email one-time-passcode login.
//!
//! Flow:
//! 1. `request_code` stores a digest of a fresh 6-digit code under the
//!    caller's email (replacing any older one) and mails the code.
//! 2. `verify_code` checks the code, claims the record atomically, finds or
//!    creates the user and issues a session.

use crate::config::Config;
use crate::crypto;
use crate::db::Db;
use crate::error::{AppError, Result};
use crate::models::{normalize_email, EmailOtp, User};
use crate::services::mailer::{otp_mail, Mailer};
use crate::services::session::{SessionIssuer, TokenPair};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Outcome of a successful login.
#[derive(Debug)]
pub struct Login {
    pub user: User,
    pub tokens: TokenPair,
    /// True when this login created the account
    pub created: bool,
}

#[derive(Clone)]
pub struct OtpService {
    db: Db,
    mailer: Arc<dyn Mailer>,
    sessions: SessionIssuer,
    digest_key: [u8; 32],
}

impl OtpService {
    pub fn new(
        config: &Config,
        db: Db,
        mailer: Arc<dyn Mailer>,
        sessions: SessionIssuer,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            db,
            mailer,
            sessions,
            digest_key: crypto::derive_key(&config.jwt_signing_key, "otp")?,
        })
    }

    /// Issue and mail a new code.
    ///
    /// Mail failures are logged and swallowed; the caller always sees
    /// success.
    pub async fn request_code(&self, email: &str) -> Result<()> {
        self.request_code_at(email, Utc::now()).await
    }

    pub async fn request_code_at(&self, email: &str, now: DateTime<Utc>) -> Result<()> {
        let email = normalize_email(email);
        let code = crypto::six_digit_code()?;

        let record = EmailOtp {
            code_digest: self.digest(&email, &code)?,
            email: email.clone(),
            created_at: now,
        };
        self.db.set_otp(&record).await?;

        match self.mailer.send(otp_mail(&email, &code)).await {
            Ok(()) => tracing::info!(email = %email, "Login code sent"),
            Err(e) => tracing::warn!(email = %email, error = %e, "Failed to send login code"),
        }

        Ok(())
    }

    /// Check a code and log the user in.
    pub async fn verify_code(&self, email: &str, code: &str) -> Result<Login> {
        self.verify_code_at(email, code, Utc::now()).await
    }

    pub async fn verify_code_at(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Login> {
        let email = normalize_email(email);

        let record = self.db.get_otp(&email).await?.ok_or(AppError::InvalidCode)?;

        if !crypto::constant_time_eq(&record.code_digest, &self.digest(&email, code.trim())?) {
            tracing::info!(email = %email, "Login code mismatch");
            return Err(AppError::InvalidCode);
        }

        if record.is_expired(now) {
            self.db.delete_otp(&email).await?;
            tracing::info!(email = %email, "Expired login code removed");
            return Err(AppError::ExpiredCode);
        }

        // Only one concurrent verifier gets past this point.
        if !self.db.claim_otp(&email).await? {
            tracing::warn!(email = %email, "Login code already consumed");
            return Err(AppError::InvalidCode);
        }

        let (user, created) = self.find_or_create_user(&email, now).await?;
        let tokens = self.sessions.issue(&user)?;

        tracing::info!(user_id = user.id, created, "User logged in");

        Ok(Login {
            user,
            tokens,
            created,
        })
    }

    async fn find_or_create_user(&self, email: &str, now: DateTime<Utc>) -> Result<(User, bool)> {
        if let Some(user) = self.db.find_user_by_email(email).await? {
            return Ok((user, false));
        }

        let user = User::new(crypto::random_id()?, email, now);
        self.db.upsert_user(&user).await?;
        Ok((user, true))
    }

    fn digest(&self, email: &str, code: &str) -> Result<String> {
        Ok(crypto::keyed_digest(
            &self.digest_key,
            &format!("{}:{}", email, code),
        )?)
    }
}
