// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interview repository. Interviews are owned through their application.

use crate::crypto;
use crate::db::Db;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{merge_patch, Interview, InterviewInput};
use crate::services::authz::{can, Action, Resource};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InterviewQuery {
    /// Only interviews for this application
    pub job: Option<u64>,
}

#[derive(Clone)]
pub struct InterviewRepository {
    db: Db,
}

impl InterviewRepository {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Caller's interviews, soonest first.
    pub async fn list(&self, identity: &AuthUser, query: &InterviewQuery) -> Result<Vec<Interview>> {
        let mut interviews: Vec<Interview> = self
            .db
            .interviews_for_owner(identity.user_id)
            .await?
            .into_iter()
            .filter(|i| query.job.is_none_or(|job| i.job == job))
            .collect();

        interviews.sort_by(|a, b| a.interview_at.cmp(&b.interview_at).then(a.id.cmp(&b.id)));
        Ok(interviews)
    }

    pub async fn get(&self, identity: &AuthUser, id: u64) -> Result<Interview> {
        self.load(identity, id, Action::Read).await
    }

    pub async fn create(&self, identity: &AuthUser, input: InterviewInput) -> Result<Interview> {
        input.validate()?;
        self.check_application(identity, input.job).await?;

        let interview = Interview::new(crypto::random_id()?, identity.user_id, input);
        self.db.upsert_interview(&interview).await?;

        tracing::info!(
            user_id = identity.user_id,
            interview_id = interview.id,
            application_id = interview.job,
            "Interview created"
        );
        Ok(interview)
    }

    pub async fn update(
        &self,
        identity: &AuthUser,
        id: u64,
        input: InterviewInput,
    ) -> Result<Interview> {
        input.validate()?;
        let mut interview = self.load(identity, id, Action::Update).await?;
        self.save_changes(identity, &mut interview, input).await?;
        Ok(interview)
    }

    pub async fn patch(
        &self,
        identity: &AuthUser,
        id: u64,
        patch: serde_json::Value,
    ) -> Result<Interview> {
        let mut interview = self.load(identity, id, Action::Update).await?;
        let input: InterviewInput = merge_patch(&interview.to_input(), patch)?;
        input.validate()?;
        self.save_changes(identity, &mut interview, input).await?;
        Ok(interview)
    }

    pub async fn delete(&self, identity: &AuthUser, id: u64) -> Result<()> {
        let interview = self.load(identity, id, Action::Delete).await?;
        self.db.delete_interview(interview.id).await?;
        tracing::info!(user_id = identity.user_id, interview_id = id, "Interview deleted");
        Ok(())
    }

    async fn save_changes(
        &self,
        identity: &AuthUser,
        interview: &mut Interview,
        input: InterviewInput,
    ) -> Result<()> {
        if input.job != interview.job {
            self.check_application(identity, input.job).await?;
        }
        interview.apply(input);
        self.db.upsert_interview(interview).await?;
        tracing::debug!(interview_id = interview.id, "Interview updated");
        Ok(())
    }

    /// The target application must belong to the caller.
    async fn check_application(&self, identity: &AuthUser, job: u64) -> Result<()> {
        match self.db.get_application(job).await? {
            Some(application) if can(identity, Action::Attach, Resource::Application(&application)) => {
                Ok(())
            }
            Some(_) => Err(AppError::Forbidden(
                "Application belongs to another user".to_string(),
            )),
            None => Err(AppError::Validation(format!("Application {} does not exist", job))),
        }
    }

    async fn load(&self, identity: &AuthUser, id: u64, action: Action) -> Result<Interview> {
        match self.db.get_interview(id).await? {
            Some(interview) if can(identity, action, Resource::Interview(&interview)) => {
                Ok(interview)
            }
            _ => Err(AppError::NotFound(format!("Interview {} not found", id))),
        }
    }
}
