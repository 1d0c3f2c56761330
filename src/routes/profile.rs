// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile routes for the authenticated user.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::ProfileInput;
use crate::services::ProfileView;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use axum_extra::extract::WithRejection;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/users/profile/",
        get(get_profile).put(put_profile).patch(patch_profile),
    )
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileView>> {
    Ok(Json(state.profiles.get(&user).await?))
}

async fn put_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(input), _): WithRejection<Json<ProfileInput>, AppError>,
) -> Result<Json<ProfileView>> {
    Ok(Json(state.profiles.update(&user, input).await?))
}

async fn patch_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(patch), _): WithRejection<Json<serde_json::Value>, AppError>,
) -> Result<Json<ProfileView>> {
    Ok(Json(state.profiles.patch(&user, patch).await?))
}
