//! Validation layer.
//!
//! Each entity has a validator that wraps the next repository in the chain
//! and runs an ordered table of named checks before forwarding. Checks either
//! reject the entity or normalize/derive fields on it in place; the first
//! rejection is returned untouched and the wrapped repository is never
//! reached. Mutations made by earlier checks are not rolled back.

mod gallery_validator;
mod user_validator;

use std::fmt::Debug;

use async_trait::async_trait;
use common::AppResult;

pub use gallery_validator::{GalleryCheck, GalleryValidator};
pub use user_validator::{UserCheck, UserValidator};

/// Fail-fast runner shared by the entity validators.
#[async_trait]
pub trait Pipeline: Send + Sync {
    type Entity: Send + 'static;
    type Check: Copy + Debug + Send + Sync + 'static;

    /// Apply a single check to `entity`.
    async fn apply(&self, check: Self::Check, entity: &mut Self::Entity) -> AppResult<()>;

    /// Apply `checks` in order, stopping at the first failure.
    async fn run(&self, entity: &mut Self::Entity, checks: &[Self::Check]) -> AppResult<()> {
        for &check in checks {
            if let Err(err) = self.apply(check, entity).await {
                tracing::debug!(?check, error = %err, "Validation rejected entity");
                return Err(err);
            }
        }
        Ok(())
    }
}
