//! # Database Module
//!
//! - `models`: the `Account` row type and its field limits
//! - `accounts`: the account directory (create, look up by username or
//!   token, clear or issue a token)

pub mod accounts;
pub mod models;
