//! Token resolution failures.

use thiserror::Error;

use foodbag_core::error::AppError;

/// Why a request could not be tied to an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Neither the `Authorization` header nor the session cookie carried a token.
    #[error("Not authenticated")]
    Missing,
    /// The token was forged, tampered with, malformed, expired, or names a
    /// user that no longer exists.
    #[error("Could not validate credentials")]
    Invalid,
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::unauthorized(err.to_string())
    }
}
