// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User and profile models for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::empty_string_as_none;

/// Account created on first successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Record ID (also used as document ID)
    pub id: u64,
    /// Unique, stored lowercased
    pub email: String,
    /// Same as the email at creation
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub date_joined: DateTime<Utc>,
}

/// Extended profile, 1:1 with a user (keyed by user ID).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: u64,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub target_role: String,
    /// Comma-separated list of skills
    #[serde(default)]
    pub skills: String,
    pub years_exp: Option<u32>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub github_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Names editable through the nested `user` object of a profile update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UserNames {
    #[serde(default)]
    #[validate(length(max = 150))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub last_name: String,
}

/// Client-writable profile fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileInput {
    #[serde(default)]
    #[validate(nested)]
    pub user: UserNames,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub location: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub target_role: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub years_exp: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(url)]
    pub linkedin_url: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(url)]
    pub portfolio_url: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(url)]
    pub github_url: Option<String>,
}

impl User {
    pub fn new(id: u64, email: &str, now: DateTime<Utc>) -> Self {
        let email = normalize_email(email);
        Self {
            id,
            username: email.clone(),
            email,
            first_name: String::new(),
            last_name: String::new(),
            date_joined: now,
        }
    }
}

impl Profile {
    /// Empty profile, as created on first access.
    pub fn empty(user_id: u64, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            bio: String::new(),
            phone: String::new(),
            location: String::new(),
            target_role: String::new(),
            skills: String::new(),
            years_exp: None,
            linkedin_url: None,
            portfolio_url: None,
            github_url: None,
            created_at: now,
        }
    }

    /// Overwrite profile fields (the nested names belong to the user record).
    pub fn apply(&mut self, input: ProfileInput) {
        self.bio = input.bio;
        self.phone = input.phone;
        self.location = input.location;
        self.target_role = input.target_role;
        self.skills = input.skills;
        self.years_exp = input.years_exp;
        self.linkedin_url = input.linkedin_url;
        self.portfolio_url = input.portfolio_url;
        self.github_url = input.github_url;
    }

    pub fn to_input(&self, user: &User) -> ProfileInput {
        ProfileInput {
            user: UserNames {
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
            },
            bio: self.bio.clone(),
            phone: self.phone.clone(),
            location: self.location.clone(),
            target_role: self.target_role.clone(),
            skills: self.skills.clone(),
            years_exp: self.years_exp,
            linkedin_url: self.linkedin_url.clone(),
            portfolio_url: self.portfolio_url.clone(),
            github_url: self.github_url.clone(),
        }
    }
}

/// Canonical form used for lookups and as the OTP key.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
