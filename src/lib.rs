// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! CareerTracker: track job applications, interviews and documents
//!
//! This crate provides the backend API: email one-time-code login, owner
//! scoped records, per-user statistics and a batch job for interview
//! reminders.

pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Db;
use services::{
    ApplicationRepository, DocumentRepository, FileStore, InterviewRepository, Mailer,
    OtpService, ProfileService, ReminderDispatcher, SessionIssuer,
};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
    pub sessions: SessionIssuer,
    pub otp: OtpService,
    pub profiles: ProfileService,
    pub applications: ApplicationRepository,
    pub interviews: InterviewRepository,
    pub documents: DocumentRepository,
    pub reminders: ReminderDispatcher,
}

impl AppState {
    /// Wire up all services over one storage handle and mailer.
    pub fn new(config: Config, db: Db, mailer: Arc<dyn Mailer>) -> anyhow::Result<Self> {
        let files = FileStore::new(config.media_root.clone());
        let sessions = SessionIssuer::new(&config)?;
        let otp = OtpService::new(&config, db.clone(), mailer.clone(), sessions.clone())?;

        Ok(Self {
            profiles: ProfileService::new(db.clone()),
            applications: ApplicationRepository::new(db.clone(), files.clone()),
            interviews: InterviewRepository::new(db.clone()),
            documents: DocumentRepository::new(db.clone(), files),
            reminders: ReminderDispatcher::new(db.clone(), mailer),
            config,
            db,
            sessions,
            otp,
        })
    }
}
