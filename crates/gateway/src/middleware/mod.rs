//! Middleware for remember-token sessions.

mod auth;

pub use auth::{remember_cookie, remember_user, CurrentUser};
