//! Auth handlers: login, logout, me.

use axum::extract::{Form, State};
use axum::Json;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

use foodbag_auth::jwt::ACCESS_TOKEN_COOKIE;
use foodbag_auth::jwt::transport::cookie_value;

use crate::dto::request::LoginForm;
use crate::dto::response::{MessageResponse, TokenResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /auth/login
///
/// Returns the token in the body and also sets it as an HTTP-only cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Json<TokenResponse>), ApiError> {
    let outcome = state
        .auth_service
        .login(&form.email, &form.password)
        .await?;

    let cookie = Cookie::build((ACCESS_TOKEN_COOKIE, cookie_value(&outcome.access_token)))
        .http_only(true)
        .max_age(time::Duration::seconds(outcome.expires_in))
        .secure(state.secure_cookies())
        .same_site(SameSite::Lax)
        .path("/");

    Ok((
        jar.add(cookie),
        Json(TokenResponse {
            access_token: outcome.access_token,
            token_type: outcome.token_type,
        }),
    ))
}

/// POST /auth/logout
///
/// Tokens are stateless; logging out only clears the cookie. The expired
/// cookie is sent whether or not the request carried one.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let expired = Cookie::build((ACCESS_TOKEN_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .path("/");

    (
        jar.add(expired),
        Json(MessageResponse::new("Successfully logged out")),
    )
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.user_service.get_profile(auth.context()).await?;
    Ok(Json(user.into()))
}
