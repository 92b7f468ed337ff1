// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! Services module - business logic layer.

pub mod health;
pub mod identity;
pub mod invite;
pub mod session;
pub mod wellness;

pub use health::HealthDataService;
pub use identity::UserService;
pub use invite::InviteService;
pub use session::SessionService;
pub use wellness::DashboardSummary;
