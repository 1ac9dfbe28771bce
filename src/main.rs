//! # Token Auth Server
//!
//! A username/password authentication server. Registering or logging in
//! yields an opaque access token; presenting that token in the
//! `Authorization` header opens protected routes until the account logs out.
//!
//! ## Key Concepts
//! - **Account**: username, salted password hash and an optional access token
//! - **Access token**: one per account, present exactly while logged in
//! - **Gate**: middleware that turns away requests without a live token

mod auth;        // Password hashing, tokens, register/login/logout logic
mod config;      // Configuration management (environment variables)
mod db;          // Account storage
mod error;       // Error type and JSON error responses
mod handlers;    // HTTP request handlers (routes)
mod middleware;  // Authentication gate
mod router;      // Route table and router assembly
mod state;       // Shared application state

use crate::config::Config;
use crate::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main application entry point
///
/// 1. Sets up logging
/// 2. Loads configuration from environment variables
/// 3. Opens the database and applies migrations
/// 4. Builds the router and starts the HTTP server
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default: info level for most crates, debug level for our app.
    // Can be overridden with RUST_LOG.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,token_auth_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);

    let app_state = AppState::new(&config).await?;
    let existing = db::accounts::count(&app_state.db).await?;
    tracing::info!(
        "Account store ready at {} ({} accounts)",
        config.database_url,
        existing
    );

    let app = router::build_router(app_state);

    let bind_addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server running on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
