//! Remember-token authentication.
//!
//! `remember_user` runs on every request: a valid `remember_token` cookie
//! attaches the matching user to the request extensions. It never rejects;
//! handlers that need a user take a `CurrentUser` argument, which fails with
//! 401 when nobody was attached.

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use common::AppError;
use domain::{User, IMAGES_URL_PREFIX, REMEMBER_COOKIE};
use gallery_service_lib::UserRepository;

use crate::state::AppState;

/// The user signed in through the remember cookie.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Resolve the remember cookie to a user, if any.
pub async fn remember_user(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    // Static images are public; skip the lookup.
    if request.uri().path().starts_with(IMAGES_URL_PREFIX) {
        return next.run(request).await;
    }

    let token = CookieJar::from_headers(request.headers())
        .get(REMEMBER_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty());

    if let Some(token) = token {
        match state.services.users().by_remember(&token).await {
            Ok(user) => {
                request.extensions_mut().insert(CurrentUser(user));
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => tracing::warn!("Remember token lookup failed: {}", e),
        }
    }

    next.run(request).await
}

/// Session cookie carrying a plaintext remember token.
pub fn remember_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((REMEMBER_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}
