// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Job application routes and per-user statistics.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{ApplicationInput, JobApplication, Summary};
use crate::services::{analytics, ApplicationQuery};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use std::sync::Arc;

/// Application routes (require authentication).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/jobs/", get(list_applications).post(create_application))
        .route("/api/jobs/stats/", get(get_stats))
        .route(
            "/api/jobs/{id}/",
            get(get_application)
                .put(put_application)
                .patch(patch_application)
                .delete(delete_application),
        )
}

// ─── Applications ────────────────────────────────────────────

async fn list_applications(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Query(query), _): WithRejection<Query<ApplicationQuery>, AppError>,
) -> Result<Json<Vec<JobApplication>>> {
    Ok(Json(state.applications.list(&user, &query).await?))
}

async fn create_application(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(input), _): WithRejection<Json<ApplicationInput>, AppError>,
) -> Result<(StatusCode, Json<JobApplication>)> {
    let application = state.applications.create(&user, input).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

async fn get_application(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, AppError>,
) -> Result<Json<JobApplication>> {
    Ok(Json(state.applications.get(&user, id).await?))
}

async fn put_application(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, AppError>,
    WithRejection(Json(input), _): WithRejection<Json<ApplicationInput>, AppError>,
) -> Result<Json<JobApplication>> {
    Ok(Json(state.applications.update(&user, id, input).await?))
}

async fn patch_application(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, AppError>,
    WithRejection(Json(patch), _): WithRejection<Json<serde_json::Value>, AppError>,
) -> Result<Json<JobApplication>> {
    Ok(Json(state.applications.patch(&user, id, patch).await?))
}

async fn delete_application(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, AppError>,
) -> Result<StatusCode> {
    state.applications.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Statistics ──────────────────────────────────────────────

async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Summary>> {
    Ok(Json(analytics::summarize(&state.db, user.user_id).await?))
}
