//! Gallery validation pipeline.

use std::sync::Arc;

use async_trait::async_trait;

use common::AppResult;
use domain::{Gallery, ModelError};

use super::Pipeline;
use crate::repository::GalleryRepository;

/// Named steps of the gallery pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryCheck {
    UserIdRequired,
    TitleRequired,
    IdGreaterThanZero,
}

impl GalleryCheck {
    pub const CREATE: &'static [GalleryCheck] =
        &[GalleryCheck::UserIdRequired, GalleryCheck::TitleRequired];

    pub const UPDATE: &'static [GalleryCheck] =
        &[GalleryCheck::UserIdRequired, GalleryCheck::TitleRequired];

    pub const DELETE: &'static [GalleryCheck] = &[GalleryCheck::IdGreaterThanZero];
}

/// Validating decorator around a GalleryRepository.
pub struct GalleryValidator {
    inner: Arc<dyn GalleryRepository>,
}

impl GalleryValidator {
    pub fn new(inner: Arc<dyn GalleryRepository>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Pipeline for GalleryValidator {
    type Entity = Gallery;
    type Check = GalleryCheck;

    async fn apply(&self, check: GalleryCheck, gallery: &mut Gallery) -> AppResult<()> {
        let err = match check {
            GalleryCheck::UserIdRequired if gallery.user_id <= 0 => ModelError::OwnerIdRequired,
            GalleryCheck::TitleRequired if gallery.title.is_empty() => ModelError::TitleRequired,
            GalleryCheck::IdGreaterThanZero if gallery.id <= 0 => ModelError::InvalidId,
            _ => return Ok(()),
        };
        Err(err.into())
    }
}

#[async_trait]
impl GalleryRepository for GalleryValidator {
    async fn by_id(&self, id: i32) -> AppResult<Gallery> {
        self.inner.by_id(id).await
    }

    async fn by_user_id(&self, user_id: i32) -> AppResult<Vec<Gallery>> {
        self.inner.by_user_id(user_id).await
    }

    async fn create(&self, mut gallery: Gallery) -> AppResult<Gallery> {
        self.run(&mut gallery, GalleryCheck::CREATE).await?;
        self.inner.create(gallery).await
    }

    async fn update(&self, mut gallery: Gallery) -> AppResult<Gallery> {
        self.run(&mut gallery, GalleryCheck::UPDATE).await?;
        self.inner.update(gallery).await
    }

    async fn delete(&self, gallery: &Gallery) -> AppResult<()> {
        let mut target = Gallery {
            id: gallery.id,
            ..Default::default()
        };
        self.run(&mut target, GalleryCheck::DELETE).await?;
        self.inner.delete(gallery).await
    }
}
