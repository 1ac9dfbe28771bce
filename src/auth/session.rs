//! # Login and Logout
//!
//! The session model is one token per account. Login hands out the token the
//! account already holds; logout clears it.
//!
//! An account that logged out has no token left to hand out, so login issues
//! a new one in that case. Without this an account could never log back in
//! after its first logout.

use crate::auth::password;
use crate::db::{accounts, models::Account};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Check credentials and return the account with its current token
///
/// ## Errors
/// - `InvalidCredentials`: no such username, wrong password, or a field
///   missing. All of these look the same to the client.
/// - `Database`: the store failed
pub async fn login(
    state: &AppState,
    username: Option<&str>,
    password: Option<&str>,
) -> AppResult<Account> {
    let (Some(username), Some(password)) = (username, password) else {
        return Err(AppError::InvalidCredentials);
    };

    let mut account = match accounts::find_by_username(&state.db, username).await {
        Ok(account) => account,
        Err(AppError::NotFound(_)) => {
            tracing::debug!("Login for unknown username '{}'", username);
            return Err(AppError::InvalidCredentials);
        }
        Err(e) => return Err(e),
    };

    let matches =
        password::verify_blocking(password.to_string(), account.password_hash.clone()).await?;
    if !matches {
        tracing::debug!("Login with wrong password for '{}'", username);
        return Err(AppError::InvalidCredentials);
    }

    if !account.is_logged_in() {
        tracing::info!("Issuing a new access token for '{}'", username);
    }
    account.access_token = Some(accounts::issue_token(&state.db, &account).await?);

    Ok(account)
}

/// Clear the token of whichever account holds `access_token`
///
/// ## Errors
/// - `UserNotFound`: no account holds the token anymore, e.g. a concurrent
///   logout already cleared it
/// - `Database`: the store failed
pub async fn logout(state: &AppState, access_token: &str) -> AppResult<Account> {
    let account = accounts::find_by_token(&state.db, access_token)
        .await
        .map_err(not_found_as_missing_user)?;

    accounts::clear_token(&state.db, &account)
        .await
        .map_err(not_found_as_missing_user)?;

    tracing::info!("Account '{}' logged out", account.username);
    Ok(account)
}

fn not_found_as_missing_user(e: AppError) -> AppError {
    match e {
        AppError::NotFound(_) => AppError::UserNotFound,
        other => other,
    }
}
