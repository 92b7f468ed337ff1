// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! Invite model stored in `invites.json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;

/// Single-use registration grant issued by an administrator.
///
/// Pending while `used_at` is absent; `used_at`/`used_by` are stamped once
/// at redemption and never cleared afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Invite {
    pub id: Uuid,
    /// Redemption secret, distinct from `id`
    pub token: String,
    pub email: String,
    /// Issuing administrator
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_by: Option<Uuid>,
}

impl Invite {
    pub fn is_pending(&self) -> bool {
        self.used_at.is_none()
    }
}
