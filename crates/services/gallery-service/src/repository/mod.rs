//! Repository layer for data access.
//!
//! Stores talk to the database and nothing else. Every single-row lookup
//! ignores soft-deleted rows and turns "no rows" into `ModelError::NotFound`.

pub mod entities;
mod gallery_repository;
mod user_repository;

pub use gallery_repository::{GalleryRepository, GalleryStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use gallery_repository::MockGalleryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

use common::{AppError, AppResult, OptionExt};
use domain::ModelError;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Select, SqlErr};

/// First row of `select`, or NotFound.
pub(crate) async fn first<E>(db: &DatabaseConnection, select: Select<E>) -> AppResult<E::Model>
where
    E: EntityTrait,
{
    select.one(db).await?.ok_or_not_found()
}

/// Translate write failures into the domain taxonomy.
///
/// A missing row becomes NotFound and a unique violation on the email column
/// becomes EmailTaken; everything else passes through as a database error.
pub(crate) fn map_write_err(err: DbErr) -> AppError {
    if matches!(err, DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) {
        return ModelError::NotFound.into();
    }
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("email") => {
            ModelError::EmailTaken.into()
        }
        _ => AppError::Database(err),
    }
}
