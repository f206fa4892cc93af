//! Domain layer - Core gallery entities, value objects and primitives.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the entities persisted by the gallery service, the closed error taxonomy,
//! and the cryptographic building blocks behind remember-token sessions.

pub mod constants;
pub mod email;
pub mod error;
pub mod gallery;
pub mod hash;
pub mod password;
pub mod token;
pub mod user;

pub use constants::*;
pub use error::{CryptoError, ModelError, Visibility};
pub use gallery::{Gallery, GalleryResponse, Image, ImageResponse};
pub use hash::KeyedHasher;
pub use password::Password;
pub use user::{User, UserResponse};
