//! Session tokens bound to stored users.

use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use foodbag_auth::error::TokenError;
use foodbag_auth::jwt::{JwtDecoder, JwtEncoder, resolve_token};
use foodbag_core::config::AuthConfig;
use foodbag_core::error::AppError;
use foodbag_entity::user::User;

use crate::context::RequestContext;
use crate::user::UserService;

/// Token type reported to clients.
pub const TOKEN_TYPE: &str = "bearer";

/// A successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
    /// Signed session token.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    /// Token lifetime in seconds; also the cookie `Max-Age`.
    pub expires_in: i64,
    /// The authenticated user.
    pub user: User,
}

/// Issues session tokens at login and turns presented tokens back into a
/// [`RequestContext`].
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<UserService>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    ttl: Duration,
}

impl AuthService {
    /// Creates a new auth service. Fails on an unsupported signing algorithm.
    pub fn new(users: Arc<UserService>, config: &AuthConfig) -> Result<Self, AppError> {
        Ok(Self {
            users,
            encoder: Arc::new(JwtEncoder::new(config)?),
            decoder: Arc::new(JwtDecoder::new(config)?),
            ttl: Duration::seconds(config.access_token_ttl_seconds()?),
        })
    }

    /// Verifies credentials and issues a token carrying the user's id and role.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let user = self.users.authenticate(email, password).await?;
        let access_token = self.encoder.issue(user.id, user.role, self.ttl)?;

        info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(LoginOutcome {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: self.ttl.num_seconds(),
            user,
        })
    }

    /// Resolves the caller from the `Authorization` header value and the
    /// session cookie value.
    ///
    /// The token must validate and its subject must still exist; the context
    /// carries the stored role.
    pub async fn authenticate(
        &self,
        authorization: Option<&str>,
        cookie: Option<&str>,
    ) -> Result<RequestContext, AppError> {
        let token = resolve_token(authorization, cookie)?;
        let claims = self.decoder.validate(token)?;

        match self.users.find(claims.user_id()).await? {
            Some(user) => Ok(RequestContext::for_user(&user)),
            None => {
                debug!(user_id = %claims.user_id(), "Token subject no longer exists");
                Err(TokenError::Invalid.into())
            }
        }
    }
}
