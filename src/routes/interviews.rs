// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interview routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Interview, InterviewInput};
use crate::services::InterviewQuery;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/jobs/interviews/",
            get(list_interviews).post(create_interview),
        )
        .route(
            "/api/jobs/interviews/{id}/",
            get(get_interview)
                .put(put_interview)
                .patch(patch_interview)
                .delete(delete_interview),
        )
}

async fn list_interviews(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Query(query), _): WithRejection<Query<InterviewQuery>, AppError>,
) -> Result<Json<Vec<Interview>>> {
    Ok(Json(state.interviews.list(&user, &query).await?))
}

async fn create_interview(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(input), _): WithRejection<Json<InterviewInput>, AppError>,
) -> Result<(StatusCode, Json<Interview>)> {
    let interview = state.interviews.create(&user, input).await?;
    Ok((StatusCode::CREATED, Json(interview)))
}

async fn get_interview(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, AppError>,
) -> Result<Json<Interview>> {
    Ok(Json(state.interviews.get(&user, id).await?))
}

async fn put_interview(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, AppError>,
    WithRejection(Json(input), _): WithRejection<Json<InterviewInput>, AppError>,
) -> Result<Json<Interview>> {
    Ok(Json(state.interviews.update(&user, id, input).await?))
}

async fn patch_interview(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, AppError>,
    WithRejection(Json(patch), _): WithRejection<Json<serde_json::Value>, AppError>,
) -> Result<Json<Interview>> {
    Ok(Json(state.interviews.patch(&user, id, patch).await?))
}

async fn delete_interview(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, AppError>,
) -> Result<StatusCode> {
    state.interviews.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
