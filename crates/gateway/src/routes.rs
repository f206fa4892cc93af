//! Route configuration.

use axum::{middleware, Router};
use tower_http::services::ServeDir;

use domain::IMAGES_URL_PREFIX;

use crate::handlers::{gallery_routes, health_routes, user_routes};
use crate::middleware::remember_user;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let images = ServeDir::new(&state.config.images_dir);

    Router::new()
        // Health check (no session needed)
        .nest("/health", health_routes())
        // Signup, login, logout
        .merge(user_routes())
        // Galleries; handlers decide which need a user
        .nest("/galleries", gallery_routes(state.config.max_upload_bytes))
        // Uploaded files, served straight from disk
        .nest_service(IMAGES_URL_PREFIX, images)
        .layer(middleware::from_fn_with_state(state.clone(), remember_user))
        .with_state(state)
}
