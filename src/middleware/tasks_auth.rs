// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Scheduler authentication middleware for `/tasks/*` routes.

use crate::config::TASKS_TOKEN_HEADER;
use crate::crypto::constant_time_eq;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Require the shared tasks token. An unset token disables the routes.
pub async fn require_tasks_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let expected = state.config.tasks_token.as_str();
    if expected.is_empty() {
        tracing::warn!("Blocked tasks request: TASKS_TOKEN not configured");
        return Err(StatusCode::FORBIDDEN);
    }

    let presented = request
        .headers()
        .get(TASKS_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    if !constant_time_eq(presented, expected) {
        tracing::warn!(
            has_header = !presented.is_empty(),
            "Blocked tasks request with invalid token"
        );
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(request).await)
}
