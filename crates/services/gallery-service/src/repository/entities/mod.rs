//! SeaORM entity definitions.

pub mod gallery;
pub mod user;
