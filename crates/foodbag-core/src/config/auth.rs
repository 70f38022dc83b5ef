//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest accepted token lifetime: one year.
pub const MAX_ACCESS_TOKEN_TTL_MINUTES: u64 = 60 * 24 * 365;

/// Token signing and credential policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// HMAC algorithm: `HS256`, `HS384` or `HS512`.
    #[serde(default = "default_jwt_algorithm")]
    pub jwt_algorithm: String,
    /// Access token TTL in minutes. Also used as the cookie `Max-Age`.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: u64,
    /// Minimum password length accepted at registration.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Whether self-registration may request the `admin` role.
    #[serde(default)]
    pub allow_admin_registration: bool,
}

impl AuthConfig {
    /// Access token TTL in seconds.
    ///
    /// Fails unless the configured TTL lies in `1..=MAX_ACCESS_TOKEN_TTL_MINUTES`.
    pub fn access_token_ttl_seconds(&self) -> Result<i64, AppError> {
        let minutes = self.access_token_ttl_minutes;
        if minutes == 0 || minutes > MAX_ACCESS_TOKEN_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.access_token_ttl_minutes must be between 1 and {MAX_ACCESS_TOKEN_TTL_MINUTES}, got {minutes}"
            )));
        }
        minutes
            .checked_mul(60)
            .and_then(|secs| i64::try_from(secs).ok())
            .ok_or_else(|| AppError::configuration("auth.access_token_ttl_minutes is out of range"))
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_algorithm: default_jwt_algorithm(),
            access_token_ttl_minutes: default_access_ttl(),
            password_min_length: default_password_min(),
            allow_admin_registration: false,
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_jwt_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_ttl() -> u64 {
    30
}

fn default_password_min() -> usize {
    4
}
