//! # Authentication Module
//!
//! Password and token based authentication.
//!
//! ## Submodules
//! - `types`: request/response types for the API
//! - `password`: salted Argon2 hashing and verification
//! - `token`: access token generation and header parsing
//! - `registration`: creating new accounts
//! - `session`: logging in and out
//!
//! ## Account Lifecycle
//!
//! ### Register
//! 1. Client posts username and password → `registration::register()`
//! 2. Password is validated and hashed
//! 3. Account is stored with a fresh access token (logged in)
//!
//! ### Login
//! 1. Client posts username and password → `session::login()`
//! 2. Password is checked against the stored hash
//! 3. The account's token is returned (a new one if it had been logged out)
//!
//! ### Logout
//! 1. Client presents its token in the `Authorization` header
//! 2. `session::logout()` clears the token; it no longer opens protected routes

pub mod password;
pub mod registration;
pub mod session;
pub mod token;
pub mod types;
