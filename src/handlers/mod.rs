//! # HTTP Request Handlers
//!
//! Each handler extracts what it needs from the request, calls into `auth`
//! and shapes the JSON envelope:
//!
//! ```json
//! { "success": true, "response": { ... }, "message": "..." }
//! ```
//!
//! Failures are returned as `AppError`, which renders the same envelope with
//! `success: false`.
//!
//! ## Submodules
//! - `index`: route listing
//! - `health`: health check endpoint (for monitoring)
//! - `auth`: register, login, logout

pub mod auth;
pub mod health;
pub mod index;
