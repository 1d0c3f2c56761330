// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interview reminder batch.
//!
//! Each run mails the owner of every interview starting within the next
//! `REMINDER_HORIZON_HOURS` that has not been reminded yet. The flag is
//! saved right after each successful send, so a crash mid-batch loses at
//! most the reminder in flight. A failed send is logged and the batch moves
//! on to the next interview.

use crate::config::REMINDER_HORIZON_HOURS;
use crate::db::Db;
use crate::error::Result;
use crate::models::{Interview, JobApplication, User};
use crate::services::mailer::{Mailer, OutgoingMail};
use crate::time_utils::{format_minutes, format_utc_rfc3339};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Outcome of one reminder run.
#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ReminderReport {
    pub run_at: String,
    /// Interviews due for a reminder
    pub candidates: u32,
    /// Reminders delivered and recorded
    pub sent: u32,
    /// Reminders that could not be delivered or recorded
    pub failed: u32,
}

#[derive(Clone)]
pub struct ReminderDispatcher {
    db: Db,
    mailer: Arc<dyn Mailer>,
}

impl ReminderDispatcher {
    pub fn new(db: Db, mailer: Arc<dyn Mailer>) -> Self {
        Self { db, mailer }
    }

    /// Run one batch as of `now`.
    ///
    /// Only a failure to query the candidates fails the run; per-interview
    /// problems are counted in the report.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<ReminderReport> {
        let horizon = now + Duration::hours(REMINDER_HORIZON_HOURS);

        let mut due: Vec<Interview> = self
            .db
            .interviews_without_reminder()
            .await?
            .into_iter()
            .filter(|i| !i.reminder_sent && i.interview_at >= now && i.interview_at <= horizon)
            .collect();
        due.sort_by_key(|i| i.interview_at);

        let mut report = ReminderReport {
            run_at: format_utc_rfc3339(now),
            candidates: due.len() as u32,
            ..Default::default()
        };
        tracing::info!(candidates = report.candidates, "Starting reminder run");

        for mut interview in due {
            match self.remind(&mut interview).await {
                Ok(()) => report.sent += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(
                        interview_id = interview.id,
                        user_id = interview.owner_id,
                        error = %e,
                        "Reminder failed"
                    );
                }
            }
        }

        tracing::info!(
            sent = report.sent,
            failed = report.failed,
            "Reminder run finished"
        );
        Ok(report)
    }

    async fn remind(&self, interview: &mut Interview) -> anyhow::Result<()> {
        let application = self
            .db
            .get_application(interview.job)
            .await?
            .ok_or_else(|| anyhow::anyhow!("application {} missing", interview.job))?;
        let user = self
            .db
            .get_user(application.owner_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("user {} missing", application.owner_id))?;

        self.mailer
            .send(reminder_mail(&user, &application, interview))
            .await?;

        interview.reminder_sent = true;
        self.db.upsert_interview(interview).await?;

        tracing::info!(interview_id = interview.id, to = %user.email, "Reminder sent");
        Ok(())
    }
}

/// Reminder message for one interview.
pub fn reminder_mail(user: &User, application: &JobApplication, interview: &Interview) -> OutgoingMail {
    let kind = interview.kind.label();
    OutgoingMail {
        to: user.email.clone(),
        subject: format!("Reminder: Interview with {} tomorrow!", application.company),
        body: format!(
            "Hi {},\n\n\
             Good Luck! You have a {} interview with {}\n\
             Time: {} UTC\n\
             Type: {}\n\
             Link: {}\n\
             Prepare well!",
            user.username,
            kind,
            application.company,
            format_minutes(interview.interview_at),
            kind,
            interview.meeting_link.as_deref().unwrap_or("Check details"),
        ),
    }
}
