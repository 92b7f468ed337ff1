// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! Per-user health payloads stored in `health-data.json`.
//!
//! The inner `data`/`stats` maps are opaque to the server; only the client
//! interprets them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BloodWork {
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "Record<string, unknown>"))]
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthKit {
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "Record<string, unknown>"))]
    pub stats: Map<String, Value>,
    #[serde(default)]
    pub total_records: u64,
    #[serde(default)]
    pub date_range: String,
}

/// At most one record per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthData {
    pub user_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_work: Option<BloodWork>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_kit: Option<HealthKit>,
}

/// Partial payload accepted by `POST /user/health-data`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDataUpdate {
    pub blood_work: Option<BloodWork>,
    pub health_kit: Option<HealthKit>,
}

impl HealthData {
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            blood_work: None,
            health_kit: None,
        }
    }

    /// Shallow merge: each block present in `update` replaces the stored one.
    pub fn merge(&mut self, update: HealthDataUpdate) {
        if update.blood_work.is_some() {
            self.blood_work = update.blood_work;
        }
        if update.health_kit.is_some() {
            self.health_kit = update.health_kit;
        }
    }
}
