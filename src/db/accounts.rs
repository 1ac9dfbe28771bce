use crate::auth::token;
use crate::db::models::{Account, USERNAME_MAX_LEN, USERNAME_MIN_LEN};
use crate::error::{AppError, AppResult};
use chrono::Utc;
use sqlx::SqlitePool;

fn validate_username(username: &str) -> AppResult<()> {
    let len = username.chars().count();
    if len < USERNAME_MIN_LEN || len > USERNAME_MAX_LEN {
        return Err(AppError::BadRequest(format!(
            "Username must be between {} and {} characters",
            USERNAME_MIN_LEN, USERNAME_MAX_LEN
        )));
    }

    Ok(())
}

/// Insert a new account holding a fresh access token
///
/// Uniqueness is left to the `UNIQUE` constraint on `username`, so two
/// concurrent registrations for the same name can't both succeed.
pub async fn create_account(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> AppResult<Account> {
    validate_username(username)?;

    let account = Account::new(username.to_string(), password_hash.to_string());

    sqlx::query(
        "INSERT INTO accounts (id, username, password_hash, access_token, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&account.id)
    .bind(&account.username)
    .bind(&account.password_hash)
    .bind(&account.access_token)
    .bind(&account.created_at)
    .bind(&account.updated_at)
    .execute(pool)
    .await?;

    Ok(account)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> AppResult<Account> {
    let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE username = ?")
        .bind(username)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                AppError::NotFound(format!("Account '{}' not found", username))
            }
            _ => AppError::Database(e),
        })?;

    Ok(account)
}

pub async fn find_by_token(pool: &SqlitePool, access_token: &str) -> AppResult<Account> {
    let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE access_token = ?")
        .bind(access_token)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("No account holds this token".to_string()),
            _ => AppError::Database(e),
        })?;

    Ok(account)
}

/// Log the account out by nulling its token
///
/// The update only matches while the account still holds the token it was
/// loaded with. If a concurrent logout got there first nothing matches and
/// `NotFound` is returned.
pub async fn clear_token(pool: &SqlitePool, account: &Account) -> AppResult<()> {
    let Some(current) = account.access_token.as_deref() else {
        return Err(AppError::NotFound(format!(
            "Account '{}' is not logged in",
            account.username
        )));
    };

    let result = sqlx::query(
        "UPDATE accounts
         SET access_token = NULL, updated_at = ?
         WHERE id = ? AND access_token = ?",
    )
    .bind(Utc::now().to_rfc3339())
    .bind(&account.id)
    .bind(current)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Account '{}' no longer holds this token",
            account.username
        )));
    }

    Ok(())
}

/// Make sure the account holds a token, issuing a new one if it has none
///
/// An existing token is never replaced. The update is guarded on
/// `access_token IS NULL` and the stored value is read back, so two logins
/// racing after a logout end up returning the same token.
pub async fn issue_token(pool: &SqlitePool, account: &Account) -> AppResult<String> {
    if let Some(existing) = &account.access_token {
        return Ok(existing.clone());
    }

    sqlx::query(
        "UPDATE accounts
         SET access_token = ?, updated_at = ?
         WHERE id = ? AND access_token IS NULL",
    )
    .bind(token::generate())
    .bind(Utc::now().to_rfc3339())
    .bind(&account.id)
    .execute(pool)
    .await?;

    let (stored,): (Option<String>,) =
        sqlx::query_as("SELECT access_token FROM accounts WHERE id = ?")
            .bind(&account.id)
            .fetch_one(pool)
            .await?;

    stored.ok_or_else(|| {
        AppError::Internal(format!(
            "Account '{}' was logged out while a token was being issued",
            account.username
        ))
    })
}

pub async fn count(pool: &SqlitePool) -> AppResult<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
