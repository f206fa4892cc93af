//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - The application error type and its HTTP rendering
//! - Configuration structures for the database and secrets

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
