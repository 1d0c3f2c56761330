// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Job application model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::empty_string_as_none;

/// Where an application currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Applied,
    Ghosted,
    Interview,
    Replied,
    Offer,
    Rejected,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Applied => "APPLIED",
            Status::Ghosted => "GHOSTED",
            Status::Interview => "INTERVIEW",
            Status::Replied => "REPLIED",
            Status::Offer => "OFFER",
            Status::Rejected => "REJECTED",
        }
    }
}

/// How confident the applicant feels about the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Ordering rank: Low < Medium < High.
    pub fn rank(&self) -> u8 {
        match self {
            Confidence::Low => 0,
            Confidence::Medium => 1,
            Confidence::High => 2,
        }
    }
}

/// Channel the job was found through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Source {
    Linkedin,
    Referral,
    JobPortal,
    CompanyWebsite,
    College,
    Networking,
    Recruiter,
    Other,
}

/// Stored job application record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplication {
    /// Record ID (also used as document ID)
    pub id: u64,
    /// Owning user
    pub owner_id: u64,
    pub job_title: String,
    pub role_type: String,
    pub company: String,
    /// Set once at creation
    pub applied_at: DateTime<Utc>,
    /// Free-form tenure, e.g. "6 Months" or "Permanent"
    pub duration: String,
    pub salary_est: Option<i64>,
    pub resume_match: Option<f64>,
    pub status: Status,
    pub location: String,
    pub link: String,
    pub confidence: Confidence,
    pub contacts: Option<String>,
    pub notes: Option<String>,
    pub source: Option<Source>,
    #[serde(default)]
    pub remote: bool,
}

/// Client-writable fields of an application (create, PUT and PATCH bodies).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplicationInput {
    #[validate(length(min = 1, max = 200))]
    pub job_title: String,
    #[validate(length(min = 1, max = 200))]
    pub role_type: String,
    #[validate(length(min = 1, max = 50))]
    pub company: String,
    #[serde(default)]
    #[validate(length(max = 30))]
    pub duration: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub salary_est: Option<i64>,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub resume_match: Option<f64>,
    pub status: Status,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[validate(url, length(max = 500))]
    pub link: String,
    pub confidence: Confidence,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = 200))]
    pub contacts: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub source: Option<Source>,
    #[serde(default)]
    pub remote: bool,
}

impl JobApplication {
    /// Build a new record owned by `owner_id`.
    pub fn new(id: u64, owner_id: u64, input: ApplicationInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner_id,
            job_title: input.job_title,
            role_type: input.role_type,
            company: input.company,
            applied_at: now,
            duration: input.duration,
            salary_est: input.salary_est,
            resume_match: input.resume_match,
            status: input.status,
            location: input.location,
            link: input.link,
            confidence: input.confidence,
            contacts: input.contacts,
            notes: input.notes,
            source: input.source,
            remote: input.remote,
        }
    }

    /// Overwrite all writable fields. `id`, `owner_id` and `applied_at` are kept.
    pub fn apply(&mut self, input: ApplicationInput) {
        self.job_title = input.job_title;
        self.role_type = input.role_type;
        self.company = input.company;
        self.duration = input.duration;
        self.salary_est = input.salary_est;
        self.resume_match = input.resume_match;
        self.status = input.status;
        self.location = input.location;
        self.link = input.link;
        self.confidence = input.confidence;
        self.contacts = input.contacts;
        self.notes = input.notes;
        self.source = input.source;
        self.remote = input.remote;
    }

    /// The writable view of this record, used as the base for PATCH.
    pub fn to_input(&self) -> ApplicationInput {
        ApplicationInput {
            job_title: self.job_title.clone(),
            role_type: self.role_type.clone(),
            company: self.company.clone(),
            duration: self.duration.clone(),
            salary_est: self.salary_est,
            resume_match: self.resume_match,
            status: self.status,
            location: self.location.clone(),
            link: self.link.clone(),
            confidence: self.confidence,
            contacts: self.contacts.clone(),
            notes: self.notes.clone(),
            source: self.source,
            remote: self.remote,
        }
    }

    /// Fields covered by free-text search.
    pub fn searchable_fields(&self) -> [Option<&str>; 5] {
        [
            Some(self.company.as_str()),
            Some(self.job_title.as_str()),
            Some(self.location.as_str()),
            self.contacts.as_deref(),
            self.notes.as_deref(),
        ]
    }
}
