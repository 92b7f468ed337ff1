// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! Persistence layer: one JSON array file per collection.

pub mod json_store;

pub use json_store::{CollectionGuard, Commit, JsonStore};

/// Collection names as constants. Each maps to `<data_dir>/<name>.json`.
pub mod collections {
    pub const USERS: &str = "users";
    pub const SESSIONS: &str = "sessions";
    pub const INVITES: &str = "invites";
    pub const HEALTH_DATA: &str = "health-data";

    pub const ALL: [&str; 4] = [USERS, SESSIONS, INVITES, HEALTH_DATA];
}
