// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user application statistics, recomputed on every call.

use crate::db::Db;
use crate::error::Result;
use crate::models::Summary;

/// Summarize all applications owned by `owner_id`.
pub async fn summarize(db: &Db, owner_id: u64) -> Result<Summary> {
    let applications = db.applications_for_owner(owner_id).await?;
    let summary = Summary::from_applications(&applications);

    tracing::debug!(
        user_id = owner_id,
        total = summary.total_applications,
        "Computed application summary"
    );
    Ok(summary)
}
