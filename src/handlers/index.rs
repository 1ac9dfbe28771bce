//! # Endpoint Listing
//!
//! `GET /` answers with every route the server exposes.

use crate::router::{Endpoint, ENDPOINTS};
use axum::Json;

/// List all routes with their methods and the middleware guarding them
///
/// ## Response
/// ```json
/// [
///   { "path": "/", "methods": ["GET"], "middlewares": [] },
///   { "path": "/logout", "methods": ["POST"], "middlewares": ["require_auth"] }
/// ]
/// ```
pub async fn list_endpoints() -> Json<&'static [Endpoint]> {
    Json(ENDPOINTS)
}
