//! JWT token encoding, decoding, and transport.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod transport;

pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
pub use transport::{ACCESS_TOKEN_COOKIE, resolve_token};

use jsonwebtoken::Algorithm;

use foodbag_core::error::AppError;

/// Parse the configured signing algorithm. Only the HMAC family is accepted
/// since the key is a shared secret.
pub(crate) fn parse_algorithm(name: &str) -> Result<Algorithm, AppError> {
    match name.trim().to_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(AppError::configuration(format!(
            "Unsupported JWT algorithm '{other}'. Expected one of: HS256, HS384, HS512"
        ))),
    }
}
