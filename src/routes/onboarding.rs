// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! Public onboarding catalogue.

use crate::services::wellness::{HealthGoal, HEALTH_GOALS, MAX_SELECTED_GOALS};
use crate::AppState;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/onboarding/goals", get(list_goals))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsResponse {
    pub goals: &'static [HealthGoal],
    pub max_selected: usize,
}

async fn list_goals() -> Json<GoalsResponse> {
    Json(GoalsResponse {
        goals: &HEALTH_GOALS,
        max_selected: MAX_SELECTED_GOALS,
    })
}
