// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! Data models for the application.

pub mod health_data;
pub mod invite;
pub mod session;
pub mod user;

pub use health_data::{BloodWork, HealthData, HealthDataUpdate, HealthKit};
pub use invite::Invite;
pub use session::Session;
pub use user::{Gender, NewUser, ProfileUpdate, Role, User, UserResponse};
