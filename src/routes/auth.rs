// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! Login, logout and registration routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::{removal_cookie, session_cookie, session_id};
use crate::models::{NewUser, User, UserResponse};
use crate::routes::extract::{present, required, JsonBody};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const MIN_PASSWORD_LENGTH: usize = 8;

const INVALID_INVITE: &str = "Invalid or expired invite token";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/register", get(verify_invite).post(register))
}

/// Response for login and registration.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub redirect_to: String,
}

// ─── Login / Logout ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let (Some(email), Some(password)) = (required(&body.email), present(&body.password)) else {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    };

    let Some(user) = state.users.get_by_email(email).await? else {
        tracing::info!("Login rejected: unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !state.users.verify_password(&user, password).await? {
        tracing::info!(user_id = %user.id, "Login rejected: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!(user_id = %user.id, "Login successful");
    let redirect_to = user.landing_path().to_string();
    start_session(&state, jar, user, redirect_to).await
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Delete the caller's session (if any) and clear the cookie.
async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<LogoutResponse>)> {
    if let Some(id) = session_id(&jar) {
        if state.sessions.delete(id).await? {
            tracing::info!("Session ended by logout");
        }
    }

    let jar = jar.add(removal_cookie(state.config.production));
    Ok((jar, Json(LogoutResponse { success: true })))
}

// ─── Registration ────────────────────────────────────────────

/// Either an invite redemption (`token` set; the email comes from the
/// invite) or an open registration.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    token: Option<String>,
    email: Option<String>,
    password: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let password = present(&body.password);
    let first_name = required(&body.first_name);
    let last_name = required(&body.last_name);

    let user = match required(&body.token) {
        Some(token) => {
            let (Some(password), Some(first_name), Some(last_name)) =
                (password, first_name, last_name)
            else {
                return Err(all_fields_required());
            };
            check_password_strength(password)?;

            let (user, invite) = state
                .invites
                .redeem(token, password, first_name, last_name)
                .await?
                .ok_or_else(|| AppError::BadRequest(INVALID_INVITE.to_string()))?;
            tracing::info!(user_id = %user.id, invite_id = %invite.id, "Registered via invite");
            user
        }
        None => {
            let (Some(email), Some(password), Some(first_name), Some(last_name)) =
                (required(&body.email), password, first_name, last_name)
            else {
                return Err(all_fields_required());
            };

            if state.users.get_by_email(email).await?.is_some() {
                return Err(AppError::conflict(
                    "An account with this email already exists",
                ));
            }
            check_password_strength(password)?;

            let user = state
                .users
                .create(NewUser::member(email, first_name, last_name), password)
                .await?;
            tracing::info!(user_id = %user.id, "Registered via open signup");
            user
        }
    };

    start_session(&state, jar, user, "/onboarding".to_string()).await
}

#[derive(Deserialize)]
pub struct VerifyInviteParams {
    token: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VerifyInviteResponse {
    pub valid: bool,
    pub email: String,
}

/// Check that an invite token is still redeemable.
async fn verify_invite(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VerifyInviteParams>,
) -> Result<Json<VerifyInviteResponse>> {
    let token = required(&params.token)
        .ok_or_else(|| AppError::BadRequest("Token is required".to_string()))?;

    let invite = state
        .invites
        .get_by_token(token)
        .await?
        .ok_or_else(|| AppError::BadRequest(INVALID_INVITE.to_string()))?;

    Ok(Json(VerifyInviteResponse {
        valid: true,
        email: invite.email,
    }))
}

// ─── Helpers ─────────────────────────────────────────────────

fn all_fields_required() -> AppError {
    AppError::BadRequest("All fields are required".to_string())
}

fn check_password_strength(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Create a session for `user` and attach its cookie to the response.
async fn start_session(
    state: &AppState,
    jar: CookieJar,
    user: User,
    redirect_to: String,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let session = state.sessions.create(user.id).await?;
    let jar = jar.add(session_cookie(&session, state.config.production));

    Ok((
        jar,
        Json(AuthResponse {
            user: user.into(),
            redirect_to,
        }),
    ))
}
