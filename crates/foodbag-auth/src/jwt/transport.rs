//! Where a request carries its session token.
//!
//! Callers present the token either as `Authorization: Bearer <token>` or as
//! the `access_token` cookie holding `Bearer <token>`. A usable header wins
//! over the cookie.

use crate::error::TokenError;

/// Name of the session cookie set at login.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

const BEARER_SCHEME: &str = "bearer";

/// Extract the credentials from a `Bearer <token>` value.
///
/// The scheme is matched case-insensitively. Returns `None` for any other
/// scheme or an empty token.
pub fn bearer_credentials(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Extract the token from the session cookie value.
///
/// Some clients keep the double quotes the server had to emit around a value
/// containing a space.
pub fn cookie_credentials(value: &str) -> Option<&str> {
    let value = value.trim();
    let unquoted = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    bearer_credentials(unquoted)
}

/// The cookie value stored for `token`.
pub fn cookie_value(token: &str) -> String {
    format!("Bearer {token}")
}

/// Pick the token from the header or, failing that, the cookie.
pub fn resolve_token<'a>(
    authorization: Option<&'a str>,
    cookie: Option<&'a str>,
) -> Result<&'a str, TokenError> {
    authorization
        .and_then(bearer_credentials)
        .or_else(|| cookie.and_then(cookie_credentials))
        .ok_or(TokenError::Missing)
}
