//! # Health Check Handler
//!
//! Simple endpoint to check if the server and its database are reachable.

use crate::state::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// Health check endpoint
///
/// ## Route
/// GET /health
///
/// ## Response
/// ```json
/// {
///   "status": "healthy",
///   "service": "token-auth-server",
///   "database": "ok"
/// }
/// ```
///
/// Always answers 200. A failing database probe shows up as
/// `"status": "degraded"` and `"database": "unavailable"` so monitors can
/// tell a live process with a broken store from a dead one.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let database_ok = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();

    if !database_ok {
        tracing::warn!("Health check: database probe failed");
    }

    let (status, database) = if database_ok {
        ("healthy", "ok")
    } else {
        ("degraded", "unavailable")
    };

    Json(json!({
        "status": status,
        "service": "token-auth-server",
        "database": database
    }))
}
