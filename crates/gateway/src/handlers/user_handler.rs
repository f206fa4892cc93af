//! Signup, login and logout.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;

use common::{AppError, AppResult};
use domain::{User, UserResponse, REMEMBER_COOKIE};
use gallery_service_lib::{UserRepository, UserService};

use crate::extractors::JsonBody;
use crate::middleware::{remember_cookie, CurrentUser};
use crate::state::AppState;

/// Signup request
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    #[serde(default)]
    pub age: i32,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(current_user))
}

/// Register a new account and sign it in.
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(req): JsonBody<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    let users = state.services.users();

    let user = users
        .create(User::new(req.name, req.age, req.email, req.password))
        .await?;
    let user = users.sign_in(user).await?;
    tracing::info!(user_id = user.id, "User signed up");

    let jar = jar.add(remember_cookie(user.remember.clone(), state.config.is_prod()));
    Ok((StatusCode::CREATED, jar, Json(UserResponse::from(user))))
}

/// Check credentials and set the remember cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let users = state.services.users();

    let user = match users.authenticate(&req.email, &req.password).await {
        Ok(user) => user,
        Err(e) if e.is_not_found() => {
            return Err(AppError::bad_request("Invalid email address."));
        }
        Err(e) => return Err(e),
    };
    let user = users.sign_in(user).await?;
    tracing::info!(user_id = user.id, "User logged in");

    let jar = jar.add(remember_cookie(user.remember.clone(), state.config.is_prod()));
    Ok((jar, Json(UserResponse::from(user))))
}

/// Invalidate the remember token and clear the cookie.
pub async fn logout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let user_id = user.id;
    state.services.users().rotate_remember(user).await?;
    tracing::info!(user_id, "User logged out");

    let jar = jar.remove(Cookie::build(REMEMBER_COOKIE).path("/"));
    Ok((StatusCode::NO_CONTENT, jar))
}

pub async fn current_user(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}
