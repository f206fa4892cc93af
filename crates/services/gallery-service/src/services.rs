//! Composition root.
//!
//! Builds the store → validator → manager chain for each entity and hands
//! out the resulting services behind trait objects.

use std::path::PathBuf;
use std::sync::Arc;

use common::{AppResult, DatabaseConfig, SecurityConfig};
use domain::KeyedHasher;

use crate::infra::{Database, DiskImageStore, ImageStore};
use crate::repository::{GalleryStore, UserStore};
use crate::service::{GalleryManager, GalleryService, UserManager, UserService};
use crate::validation::{GalleryValidator, UserValidator};

/// Every service the application consumes, sharing one connection pool.
#[derive(Clone)]
pub struct Services {
    users: Arc<dyn UserService>,
    galleries: Arc<dyn GalleryService>,
    images: Arc<dyn ImageStore>,
    db: Database,
}

impl Services {
    /// Open the database (without migrating) and assemble the services.
    pub async fn connect(
        db_config: &DatabaseConfig,
        security: &SecurityConfig,
        images_dir: impl Into<PathBuf>,
    ) -> AppResult<Self> {
        let db = Database::connect_without_migrations(db_config).await?;
        Ok(Self::from_database(db, security, images_dir))
    }

    /// Assemble the services over an existing database handle.
    pub fn from_database(
        db: Database,
        security: &SecurityConfig,
        images_dir: impl Into<PathBuf>,
    ) -> Self {
        let conn = db.get_connection();

        let user_store = Arc::new(UserStore::new(conn.clone()));
        let user_validator = Arc::new(UserValidator::new(
            user_store,
            KeyedHasher::new(&security.hmac_key),
            security.pepper.clone(),
        ));
        let users = Arc::new(UserManager::new(user_validator, security.pepper.clone()));

        let gallery_store = Arc::new(GalleryStore::new(conn));
        let gallery_validator = Arc::new(GalleryValidator::new(gallery_store));
        let galleries = Arc::new(GalleryManager::new(gallery_validator));

        let images = Arc::new(DiskImageStore::new(images_dir));

        Self {
            users,
            galleries,
            images,
            db,
        }
    }

    /// Get user service
    pub fn users(&self) -> Arc<dyn UserService> {
        self.users.clone()
    }

    /// Get gallery service
    pub fn galleries(&self) -> Arc<dyn GalleryService> {
        self.galleries.clone()
    }

    /// Get image store
    pub fn images(&self) -> Arc<dyn ImageStore> {
        self.images.clone()
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Apply pending migrations.
    pub async fn auto_migrate(&self) -> AppResult<()> {
        self.db.run_migrations().await?;
        tracing::info!("Migrations applied");
        Ok(())
    }

    /// Drop all tables and recreate them. Development only.
    pub async fn destructive_reset(&self) -> AppResult<()> {
        tracing::warn!("Dropping and recreating all tables");
        self.db.fresh_migrations().await?;
        Ok(())
    }

    /// Check database connectivity.
    pub async fn ping(&self) -> AppResult<()> {
        Ok(self.db.ping().await?)
    }

    /// Close the connection pool.
    pub async fn close(self) -> AppResult<()> {
        Ok(self.db.close().await?)
    }
}
