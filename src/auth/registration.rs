//! # Account Registration
//!
//! Creating an account is a single step: validate the password, hash it,
//! insert the row. The new account is logged in straight away.

use crate::auth::password;
use crate::db::{accounts, models::Account};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Register a new account
///
/// ## Flow
/// 1. Validate the password (missing, empty or under 6 characters → 400)
/// 2. Hash it with a random salt
/// 3. Insert the account; the store assigns a fresh access token
///
/// Steps 1 and 2 happen before the store is touched, so a bad password never
/// costs a write.
///
/// ## Errors
/// - `BadRequest`: password missing or too short
/// - `CreateFailed`: anything that went wrong inserting the account. Bad
///   usernames, duplicates and store outages are not told apart; only
///   username validation messages travel along as details.
pub async fn register(
    state: &AppState,
    username: Option<&str>,
    password: Option<&str>,
) -> AppResult<Account> {
    let password = password::validate(password)?;
    let password_hash = password::hash_blocking(password.to_string()).await?;

    let Some(username) = username else {
        return Err(AppError::CreateFailed(Some("Username is required".to_string())));
    };

    accounts::create_account(&state.db, username, &password_hash)
        .await
        .map_err(|e| {
            tracing::warn!("Could not create account '{}': {}", username, e);
            match e {
                AppError::BadRequest(detail) => AppError::CreateFailed(Some(detail)),
                _ => AppError::CreateFailed(None),
            }
        })
}
