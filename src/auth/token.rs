//! Access token generation.

use rand::{rngs::OsRng, RngCore};

/// Random bytes behind each token; hex encoding doubles the length
const TOKEN_BYTES: usize = 128;

/// Generate an opaque, unguessable access token
///
/// 128 bytes from the operating system RNG, hex encoded.
pub fn generate() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Pull the token out of an `Authorization` header value
///
/// Clients send the bare token; a `Bearer` scheme (any case) is accepted
/// too. Blank values, and a scheme with nothing after it, yield `None`.
pub fn from_header(value: &str) -> Option<&str> {
    let value = value.trim();
    let token = match value.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ if value.eq_ignore_ascii_case("bearer") => "",
        _ => value,
    };

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
