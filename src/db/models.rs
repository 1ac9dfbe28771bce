//! # Database Models
//!
//! Data structures that map to rows of the `accounts` table.

use crate::auth::token;
use chrono::Utc;
use uuid::Uuid;

/// Shortest username the store accepts
pub const USERNAME_MIN_LEN: usize = 2;
/// Longest username the store accepts
pub const USERNAME_MAX_LEN: usize = 14;

/// A registered account
///
/// The session model lives entirely in `access_token`:
/// - `Some(token)`: the account is logged in and `token` opens protected routes
/// - `None`: the account is logged out
///
/// ## Derive Macros
/// - `sqlx::FromRow`: maps a row of `SELECT * FROM accounts` onto this struct
///
/// There is deliberately no `Serialize` here. Responses are built field by
/// field so `password_hash` can't leak into a JSON body by accident.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    /// Unique identifier (UUID v4)
    pub id: String,

    /// Unique login name, 2 to 14 characters
    pub username: String,

    /// Argon2 hash in PHC string format; the salt is embedded in the string
    pub password_hash: String,

    /// Current bearer token, `None` after logout
    pub access_token: Option<String>,

    /// When the account was created (RFC3339 timestamp)
    pub created_at: String,

    /// When the account was last modified (RFC3339 timestamp)
    pub updated_at: String,
}

impl Account {
    /// Create a new logged-in account with generated ID, token and timestamps
    ///
    /// Registration logs the user in immediately, so the account starts out
    /// holding a fresh token.
    pub fn new(username: String, password_hash: String) -> Self {
        let now = Utc::now().to_rfc3339();

        Self {
            id: Uuid::new_v4().to_string(),
            username,
            password_hash,
            access_token: Some(token::generate()),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.access_token.is_some()
    }
}
