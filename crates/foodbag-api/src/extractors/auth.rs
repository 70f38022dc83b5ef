//! `AuthUser` extractor: resolves the session token from the Authorization
//! header or the session cookie, validates it and injects the caller context.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use foodbag_auth::jwt::ACCESS_TOKEN_COOKIE;
use foodbag_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let authorization = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value());

        let ctx = state
            .auth_service
            .authenticate(authorization, cookie)
            .await?;

        Ok(AuthUser(ctx))
    }
}
