// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Email one-time-code login and session refresh routes.

use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::{
    cookie::{Cookie, CookieJar, SameSite},
    WithRejection,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::auth::ACCESS_TOKEN_COOKIE;
use crate::services::TokenPair;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/send-otp/", post(send_otp))
        .route("/api/users/verify-otp/", post(verify_otp))
        .route("/api/users/logout/", post(logout))
        .route("/api/refresh/", post(refresh))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MessageResponse {
    pub message: String,
}

/// Request a login code by email.
async fn send_otp(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<SendOtpRequest>, AppError>,
) -> Result<Json<MessageResponse>> {
    body.validate()?;
    state.otp.request_code(&body.email).await?;

    Ok(Json(MessageResponse {
        message: "otp sent".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Exchange a login code for a token pair.
///
/// The access token is also set as an HTTP-only cookie for browser clients.
async fn verify_otp(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    WithRejection(Json(body), _): WithRejection<Json<VerifyOtpRequest>, AppError>,
) -> Result<(CookieJar, Json<TokenPair>)> {
    let login = state.otp.verify_code(&body.email, &body.otp).await?;

    let cookie = access_cookie(
        login.tokens.access.clone(),
        state.config.access_token_ttl_minutes,
    );
    Ok((jar.add(cookie), Json(login.tokens)))
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RefreshResponse {
    pub access: String,
}

/// Exchange a refresh token for a new access token.
async fn refresh(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    WithRejection(Json(body), _): WithRejection<Json<RefreshRequest>, AppError>,
) -> Result<(CookieJar, Json<RefreshResponse>)> {
    let access = state.sessions.refresh(&body.refresh)?;
    let cookie = access_cookie(access.clone(), state.config.access_token_ttl_minutes);
    Ok((jar.add(cookie), Json(RefreshResponse { access })))
}

/// Clear the session cookie. Bearer-token clients just drop their tokens.
async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.remove(Cookie::build(ACCESS_TOKEN_COOKIE).path("/"));
    (
        jar,
        Json(MessageResponse {
            message: "logged out".to_string(),
        }),
    )
}

fn access_cookie(token: String, ttl_minutes: i64) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::minutes(ttl_minutes))
        .build()
}
