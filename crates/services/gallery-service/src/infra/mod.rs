//! Infrastructure layer - database and image storage.

mod db;
pub mod images;
pub mod migrations;

pub use db::Database;
pub use images::{DiskImageStore, ImageStore};
pub use migrations::Migrator;
