//! Service layer - the interfaces the rest of the application consumes.

mod gallery_service;
mod user_service;

pub use gallery_service::{GalleryManager, GalleryService};
pub use user_service::{UserManager, UserService};
