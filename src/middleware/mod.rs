//! # Middleware Module
//!
//! Middleware runs before route handlers and can short-circuit a request.
//!
//! ## Our Middleware
//! - `auth`: only lets requests through that carry a live access token

pub mod auth;
