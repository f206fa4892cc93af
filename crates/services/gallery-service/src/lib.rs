//! Gallery Service Library
//!
//! The validated data-access layer for users and galleries: SeaORM stores,
//! the validation pipelines wrapped around them, the services handlers talk
//! to, and filesystem image storage. `Services` wires it all together.

pub mod infra;
pub mod repository;
pub mod service;
pub mod services;
pub mod validation;

use tracing::info;

use common::DatabaseConfig;

pub use crate::infra::{Database, DiskImageStore, ImageStore};
pub use crate::repository::{GalleryRepository, GalleryStore, UserRepository, UserStore};
pub use crate::service::{GalleryManager, GalleryService, UserManager, UserService};
pub use crate::services::Services;
pub use crate::validation::{GalleryCheck, GalleryValidator, Pipeline, UserCheck, UserValidator};

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &DatabaseConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(config).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}
