// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Seeded administrator used when `ADMIN_EMAIL` is unset.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@vibrantly.app";
pub const DEFAULT_ADMIN_PASSWORD: &str = "vibrant health";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Directory holding the JSON collection files
    pub data_dir: PathBuf,
    /// Public URL prefix for invite links
    pub base_url: String,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// Production mode: secure cookies and HSTS
    pub production: bool,

    // --- Seeded administrator ---
    pub admin_email: String,
    pub admin_password: String,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            data_dir: PathBuf::from("data"),
            base_url: "http://localhost:3000".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            production: false,
            admin_email: "admin@vibrantly.test".to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => 8080,
        };

        let base_url = env::var("BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        Ok(Self {
            port,
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            frontend_url: env::var("FRONTEND_URL").unwrap_or_else(|_| base_url.clone()),
            base_url,
            production: env::var("APP_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
            admin_email: env::var("ADMIN_EMAIL")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string()),
            admin_password: env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string()),
        })
    }

    /// Link an invitee follows to redeem `token`.
    pub fn invite_url(&self, token: &str) -> String {
        format!("{}/register/{}", self.base_url, urlencoding::encode(token))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
