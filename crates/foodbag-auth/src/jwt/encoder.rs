//! Session token issuance.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use foodbag_core::config::AuthConfig;
use foodbag_core::error::AppError;
use foodbag_entity::user::UserRole;

use super::claims::Claims;
use super::parse_algorithm;

/// Signs session tokens with the process-wide key.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    header: Header,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("algorithm", &self.header.alg)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates an encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let algorithm = parse_algorithm(&config.jwt_algorithm)?;
        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            header: Header::new(algorithm),
        })
    }

    /// Issues a token for `subject` with `role`, expiring `ttl` from now.
    pub fn issue(&self, subject: Uuid, role: UserRole, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject,
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))
    }
}
