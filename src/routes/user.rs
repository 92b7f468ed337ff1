// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! Routes for the signed-in user: profile, health data, dashboard.
//! The auth middleware is applied in routes/mod.rs for these routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{HealthData, HealthDataUpdate, ProfileUpdate, UserResponse};
use crate::routes::extract::JsonBody;
use crate::services::DashboardSummary;
use crate::AppState;
use axum::{
    extract::State,
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/me", get(get_profile))
        .route("/user/profile", get(get_profile).put(update_profile))
        .route("/user/health-data", get(get_health_data).post(save_health_data))
        .route("/user/dashboard", get(get_dashboard))
}

// ─── User Profile ────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileResponse {
    pub user: UserResponse,
}

async fn get_profile(Extension(AuthUser(user)): Extension<AuthUser>) -> Json<ProfileResponse> {
    Json(ProfileResponse { user: user.into() })
}

/// Update allowed profile fields (also used to finish onboarding).
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    JsonBody(update): JsonBody<ProfileUpdate>,
) -> Result<Json<ProfileResponse>> {
    let updated = state
        .users
        .update(user.id, update)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    tracing::info!(
        user_id = %updated.id,
        onboarding_complete = updated.onboarding_complete,
        "Profile updated"
    );
    Ok(Json(ProfileResponse {
        user: updated.into(),
    }))
}

// ─── Health Data ─────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthDataResponse {
    pub health_data: Option<HealthData>,
}

async fn get_health_data(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<Json<HealthDataResponse>> {
    let health_data = state.health.get(user.id).await?;
    Ok(Json(HealthDataResponse { health_data }))
}

async fn save_health_data(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    JsonBody(update): JsonBody<HealthDataUpdate>,
) -> Result<Json<HealthDataResponse>> {
    let saved = state.health.save(user.id, update).await?;
    tracing::info!(user_id = %user.id, "Health data saved");
    Ok(Json(HealthDataResponse {
        health_data: Some(saved),
    }))
}

// ─── Dashboard ───────────────────────────────────────────────

async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<Json<DashboardSummary>> {
    let health = state.health.get(user.id).await?;
    Ok(Json(DashboardSummary::for_user(&user, health.as_ref())))
}
