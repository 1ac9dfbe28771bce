//! # Password Hashing
//!
//! Passwords are hashed with Argon2id and a random salt per account. The
//! result is a PHC string (`$argon2id$v=19$...`) that embeds the salt and
//! parameters, so nothing else has to be stored next to it.

use crate::error::{AppError, AppResult};
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LEN: usize = 6;

/// Check a registration password before anything touches the store
pub fn validate(password: Option<&str>) -> AppResult<&str> {
    let password = match password {
        Some(p) if !p.is_empty() => p,
        _ => return Err(AppError::BadRequest("Password is required".to_string())),
    };

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password needs to be at least {} characters long",
            MIN_PASSWORD_LEN
        )));
    }

    Ok(password)
}

/// Hash a password with a freshly generated salt
pub fn hash(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    Ok(hash)
}

/// Check a password against a stored hash
///
/// A malformed stored hash counts as a mismatch rather than an error; the
/// caller only needs a yes or no.
pub fn verify(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::warn!("Stored password hash could not be parsed");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// `hash` on the blocking thread pool
///
/// Argon2 is deliberately slow; running it inline would stall every other
/// request scheduled on the same runtime worker.
pub async fn hash_blocking(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
}

/// `verify` on the blocking thread pool
pub async fn verify_blocking(password: String, stored_hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || verify(&password, &stored_hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))
}
