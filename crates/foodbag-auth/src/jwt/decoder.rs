//! Session token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use tracing::debug;

use foodbag_core::config::AuthConfig;
use foodbag_core::error::AppError;

use super::claims::Claims;
use super::parse_algorithm;
use crate::error::TokenError;

/// Verifies token signatures and expiry.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let mut validation = Validation::new(parse_algorithm(&config.jwt_algorithm)?);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        })
    }

    /// Validates a token and returns its claims.
    ///
    /// Every failure (bad signature, malformed payload, expiry) collapses into
    /// [`TokenError::Invalid`]; the cause is only logged at debug level.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(reason = ?e.kind(), "Rejected session token");
                TokenError::Invalid
            })
    }
}
