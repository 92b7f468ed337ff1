// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! Vibrantly: health-tracking web application backend.
//!
//! This crate provides the JSON API behind the web client: account
//! registration (open and by invite), cookie sessions, an admin panel,
//! profile editing and per-user health data, persisted as flat JSON files.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::JsonStore;
use services::{HealthDataService, InviteService, SessionService, UserService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: JsonStore,
    pub users: UserService,
    pub sessions: SessionService,
    pub invites: InviteService,
    pub health: HealthDataService,
}

impl AppState {
    /// Wire every manager to the same store handle.
    pub fn new(config: Config, store: JsonStore) -> Self {
        Self {
            users: UserService::new(store.clone()),
            sessions: SessionService::new(store.clone()),
            invites: InviteService::new(store.clone()),
            health: HealthDataService::new(store.clone()),
            config,
            store,
        }
    }
}
