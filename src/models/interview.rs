// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Interview round model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::empty_string_as_none;

/// Highest rating an interview can carry.
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewType {
    Hr,
    Behavioural,
    Technical,
    Managerial,
    /// Group discussion
    Gd,
    Others,
}

impl InterviewType {
    pub fn label(&self) -> &'static str {
        match self {
            InterviewType::Hr => "HR",
            InterviewType::Behavioural => "Behavioural",
            InterviewType::Technical => "Technical",
            InterviewType::Managerial => "Managerial",
            InterviewType::Gd => "Group Discussion",
            InterviewType::Others => "Other",
        }
    }
}

/// Stored interview record.
///
/// `owner_id` mirrors the owner of the linked application so interviews can
/// be listed per user without a join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interview {
    pub id: u64,
    pub owner_id: u64,
    /// Linked application ID
    pub job: u64,
    pub interview_at: DateTime<Utc>,
    #[serde(default)]
    pub interview_with: String,
    pub meeting_link: Option<String>,
    #[serde(rename = "type")]
    pub kind: InterviewType,
    #[serde(default)]
    pub feedback: String,
    pub rating: Option<i32>,
    /// Set by the reminder batch only
    #[serde(default)]
    pub reminder_sent: bool,
}

/// Client-writable fields of an interview.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InterviewInput {
    pub job: u64,
    pub interview_at: DateTime<Utc>,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub interview_with: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(url, length(max = 500))]
    pub meeting_link: Option<String>,
    #[serde(rename = "type")]
    pub kind: InterviewType,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub rating: Option<i32>,
}

impl Interview {
    pub fn new(id: u64, owner_id: u64, input: InterviewInput) -> Self {
        let mut interview = Self {
            id,
            owner_id,
            job: input.job,
            interview_at: input.interview_at,
            interview_with: String::new(),
            meeting_link: None,
            kind: input.kind,
            feedback: String::new(),
            rating: None,
            reminder_sent: false,
        };
        interview.apply(input);
        interview
    }

    /// Overwrite writable fields; the rating is clamped to `0..=MAX_RATING`.
    pub fn apply(&mut self, input: InterviewInput) {
        self.job = input.job;
        self.interview_at = input.interview_at;
        self.interview_with = input.interview_with;
        self.meeting_link = input.meeting_link;
        self.kind = input.kind;
        self.feedback = input.feedback;
        self.rating = input.rating.map(|r| r.clamp(0, MAX_RATING));
    }

    pub fn to_input(&self) -> InterviewInput {
        InterviewInput {
            job: self.job,
            interview_at: self.interview_at,
            interview_with: self.interview_with.clone(),
            meeting_link: self.meeting_link.clone(),
            kind: self.kind,
            feedback: self.feedback.clone(),
            rating: self.rating,
        }
    }
}
