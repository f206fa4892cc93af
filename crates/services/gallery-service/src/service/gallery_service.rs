//! Gallery service - gallery CRUD plus ownership checks.

use std::sync::Arc;

use async_trait::async_trait;

use common::AppResult;
use domain::{Gallery, ModelError};

use crate::repository::GalleryRepository;

#[async_trait]
pub trait GalleryService: GalleryRepository {
    /// The gallery `id` if it belongs to `user_id`.
    ///
    /// A gallery owned by someone else is reported as NotFound so its
    /// existence is not revealed.
    async fn owned_by(&self, id: i32, user_id: i32) -> AppResult<Gallery>;
}

pub struct GalleryManager {
    repo: Arc<dyn GalleryRepository>,
}

impl GalleryManager {
    pub fn new(repo: Arc<dyn GalleryRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl GalleryRepository for GalleryManager {
    async fn by_id(&self, id: i32) -> AppResult<Gallery> {
        self.repo.by_id(id).await
    }

    async fn by_user_id(&self, user_id: i32) -> AppResult<Vec<Gallery>> {
        self.repo.by_user_id(user_id).await
    }

    async fn create(&self, gallery: Gallery) -> AppResult<Gallery> {
        self.repo.create(gallery).await
    }

    async fn update(&self, gallery: Gallery) -> AppResult<Gallery> {
        self.repo.update(gallery).await
    }

    async fn delete(&self, gallery: &Gallery) -> AppResult<()> {
        self.repo.delete(gallery).await
    }
}

#[async_trait]
impl GalleryService for GalleryManager {
    async fn owned_by(&self, id: i32, user_id: i32) -> AppResult<Gallery> {
        let gallery = self.repo.by_id(id).await?;
        if !gallery.is_owned_by(user_id) {
            tracing::debug!(gallery_id = id, user_id, "Gallery requested by non-owner");
            return Err(ModelError::NotFound.into());
        }
        Ok(gallery)
    }
}
