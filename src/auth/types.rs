//! # Auth API Types
//!
//! Request bodies for `/register` and `/login`, and the account summary both
//! return on success.

use crate::db::models::Account;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Username and password, as sent to `/register` and `/login`
///
/// Both fields are optional at the JSON level. A missing field is a
/// validation failure with a proper envelope, not a body rejection from
/// the extractor. Numbers and booleans are taken as their text form, so
/// `{"username": 12345}` still reaches the password check; `null`, arrays
/// and objects count as missing.
///
/// ## Example JSON
/// ```json
/// {
///   "username": "alice",
///   "password": "secret1"
/// }
/// ```
#[derive(Deserialize)]
pub struct CredentialsRequest {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub password: Option<String>,
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

// Hand-written so passwords stay out of debug logs
impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// What clients learn about an account after register or login
///
/// The password hash is not part of this type.
#[derive(Debug, Clone, Serialize)]
pub struct AccountSummary {
    pub username: String,
    pub id: String,
    #[serde(rename = "accessToken")]
    pub access_token: Option<String>,
}

impl From<Account> for AccountSummary {
    fn from(account: Account) -> Self {
        Self {
            username: account.username,
            id: account.id,
            access_token: account.access_token,
        }
    }
}
