// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! Vibrantly API Server

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vibrantly::{config::Config, db::JsonStore, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        production = config.production,
        "Starting Vibrantly API"
    );

    let store = JsonStore::open(&config.data_dir).await?;
    let state = Arc::new(AppState::new(config.clone(), store));

    // First-run bootstrap; a no-op once the admin exists
    if state
        .users
        .seed_admin(&config.admin_email, &config.admin_password)
        .await?
    {
        tracing::info!(email = %config.admin_email, "Seeded administrator account");
    }

    // Build router
    let app = vibrantly::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vibrantly=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
