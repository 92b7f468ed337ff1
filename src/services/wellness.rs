// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! Dashboard summary and the onboarding goal catalogue.
//!
//! The score is placeholder arithmetic over which data the user has
//! provided; it does not interpret any biomarker.

use crate::models::{HealthData, User};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Score shown when the user has supplied nothing yet.
pub const DEMO_HEALTH_SCORE: u32 = 74;

/// Onboarding lets the user pick at most this many goals.
pub const MAX_SELECTED_GOALS: usize = 3;

#[derive(Debug, Clone, Copy, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthGoal {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

const fn goal(id: &'static str, label: &'static str, description: &'static str) -> HealthGoal {
    HealthGoal {
        id,
        label,
        description,
    }
}

pub const HEALTH_GOALS: [HealthGoal; 12] = [
    goal("energy", "Energy & Vitality", "Feel more energized throughout the day"),
    goal("longevity", "Longevity & Aging", "Optimize for a longer, healthier life"),
    goal("cognitive", "Cognitive Performance", "Improve focus, memory, and mental clarity"),
    goal("athletic", "Athletic Performance", "Enhance physical performance and recovery"),
    goal("sleep", "Sleep Quality", "Get better, more restorative sleep"),
    goal("stress", "Stress Management", "Reduce stress and improve resilience"),
    goal("hormones", "Hormone Optimization", "Balance hormones naturally"),
    goal("heart", "Heart Health", "Improve cardiovascular health markers"),
    goal("immune", "Immune Support", "Strengthen your immune system"),
    goal("gut", "Gut Health", "Improve digestion and gut microbiome"),
    goal("skin", "Skin, Hair & Nails", "Enhance appearance from within"),
    goal("weight", "Weight Management", "Reach and maintain optimal weight"),
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardSummary {
    pub health_score: u32,
    pub has_blood_work: bool,
    pub has_health_kit: bool,
    pub profile_complete: bool,
}

impl DashboardSummary {
    pub fn for_user(user: &User, health: Option<&HealthData>) -> Self {
        Self {
            health_score: health_score(user, health),
            has_blood_work: health.is_some_and(|h| h.blood_work.is_some()),
            has_health_kit: health.is_some_and(|h| h.health_kit.is_some()),
            profile_complete: user.age.is_some()
                && user.weight.is_some()
                && user.height.is_some()
                && user.gender.is_some(),
        }
    }
}

/// 10 points per filled profile metric, 30 per uploaded data source.
pub fn health_score(user: &User, health: Option<&HealthData>) -> u32 {
    let profile_points = [
        user.age.is_some(),
        user.weight.is_some(),
        user.height.is_some(),
        user.gender.is_some(),
    ]
    .into_iter()
    .filter(|present| *present)
    .count() as u32
        * 10;

    let data_points = health.map_or(0, |h| {
        30 * (h.blood_work.is_some() as u32 + h.health_kit.is_some() as u32)
    });

    match profile_points + data_points {
        0 => DEMO_HEALTH_SCORE,
        score => score,
    }
}
