// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! Administrator routes: user overview and invite issuance.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Invite, UserResponse};
use crate::routes::extract::{required, JsonBody};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Admin routes (require an administrator session via routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/invite", post(create_invite))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UsersResponse {
    pub users: Vec<UserResponse>,
    pub invites: Vec<Invite>,
}

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<UsersResponse>> {
    let users = state
        .users
        .list()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    let invites = state.invites.list().await?;

    Ok(Json(UsersResponse { users, invites }))
}

#[derive(Deserialize)]
pub struct InviteRequest {
    email: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct InviteResponse {
    pub invite: Invite,
    pub invite_url: String,
    pub message: String,
}

async fn create_invite(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(admin)): Extension<AuthUser>,
    JsonBody(body): JsonBody<InviteRequest>,
) -> Result<Json<InviteResponse>> {
    let email = required(&body.email)
        .ok_or_else(|| AppError::BadRequest("Email is required".to_string()))?;

    if state.users.get_by_email(email).await?.is_some() {
        return Err(AppError::conflict("User with this email already exists"));
    }

    let invite = state.invites.create(email, admin.id).await?;
    let invite_url = state.config.invite_url(&invite.token);
    let message = format!(
        "Invite created! Share this link with {}: {}",
        invite.email, invite_url
    );

    Ok(Json(InviteResponse {
        invite,
        invite_url,
        message,
    }))
}
