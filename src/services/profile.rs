// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profiles, created lazily on first access.

use crate::db::Db;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{merge_patch, Profile, ProfileInput, User};
use crate::services::authz::{can, Action, Resource};
use chrono::Utc;
use serde::Serialize;
use validator::Validate;

/// Account fields shown inside a profile.
#[derive(Debug, Clone, Serialize)]
pub struct AccountSummary {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Profile as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub user: AccountSummary,
    #[serde(flatten)]
    pub profile: Profile,
}

impl ProfileView {
    fn new(user: &User, profile: Profile) -> Self {
        Self {
            user: AccountSummary {
                id: user.id,
                email: user.email.clone(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
            },
            profile,
        }
    }
}

#[derive(Clone)]
pub struct ProfileService {
    db: Db,
}

impl ProfileService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn get(&self, identity: &AuthUser) -> Result<ProfileView> {
        let (user, profile) = self.load(identity).await?;
        Ok(ProfileView::new(&user, profile))
    }

    pub async fn update(&self, identity: &AuthUser, input: ProfileInput) -> Result<ProfileView> {
        input.validate()?;
        let (user, profile) = self.load(identity).await?;
        self.save(user, profile, input).await
    }

    pub async fn patch(&self, identity: &AuthUser, patch: serde_json::Value) -> Result<ProfileView> {
        let (user, profile) = self.load(identity).await?;
        let input: ProfileInput = merge_patch(&profile.to_input(&user), patch)?;
        input.validate()?;
        self.save(user, profile, input).await
    }

    async fn save(&self, mut user: User, mut profile: Profile, input: ProfileInput) -> Result<ProfileView> {
        if user.first_name != input.user.first_name || user.last_name != input.user.last_name {
            user.first_name = input.user.first_name.clone();
            user.last_name = input.user.last_name.clone();
            self.db.upsert_user(&user).await?;
        }

        profile.apply(input);
        self.db.upsert_profile(&profile).await?;

        tracing::debug!(user_id = user.id, "Profile updated");
        Ok(ProfileView::new(&user, profile))
    }

    /// The caller's user record and profile, creating the profile if needed.
    async fn load(&self, identity: &AuthUser) -> Result<(User, Profile)> {
        let user = self
            .db
            .get_user(identity.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", identity.user_id)))?;

        let profile = match self.db.get_profile(user.id).await? {
            Some(profile) => profile,
            None => {
                let profile = Profile::empty(user.id, Utc::now());
                self.db.upsert_profile(&profile).await?;
                tracing::info!(user_id = user.id, "Profile created");
                profile
            }
        };

        if !can(identity, Action::Read, Resource::Profile(&profile)) {
            return Err(AppError::NotFound("Profile not found".to_string()));
        }

        Ok((user, profile))
    }
}
