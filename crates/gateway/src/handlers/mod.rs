//! HTTP handlers.

mod gallery_handler;
mod health_handler;
mod user_handler;

pub use gallery_handler::gallery_routes;
pub use health_handler::health_routes;
pub use user_handler::user_routes;
