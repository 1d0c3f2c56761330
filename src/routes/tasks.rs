// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Task handler routes for scheduler callbacks.
//!
//! These endpoints are called by an external scheduler, not directly by
//! users. They are protected by the shared tasks token.

use crate::error::Result;
use crate::services::ReminderReport;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use std::sync::Arc;

/// Task handler routes (called by the scheduler).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/tasks/send-reminders", post(send_reminders))
}

/// Run one interview reminder batch.
async fn send_reminders(State(state): State<Arc<AppState>>) -> Result<Json<ReminderReport>> {
    tracing::info!("Reminder batch triggered by scheduler");
    let report = state.reminders.run(chrono::Utc::now()).await?;
    Ok(Json(report))
}
