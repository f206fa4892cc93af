//! Gallery repository: the capability trait and its database-backed store.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Unchanged, ColumnTrait,
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::gallery::{self, ActiveModel, Entity as GalleryEntity};
use super::{first, map_write_err};
use common::AppResult;
use domain::Gallery;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Gallery data access, implemented by the store, the validator and the manager.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait GalleryRepository: Send + Sync {
    /// Find active gallery by ID
    async fn by_id(&self, id: i32) -> AppResult<Gallery>;

    /// All active galleries owned by a user, oldest first
    async fn by_user_id(&self, user_id: i32) -> AppResult<Vec<Gallery>>;

    /// Persist a new gallery, returning it with its ID and timestamps assigned
    async fn create(&self, gallery: Gallery) -> AppResult<Gallery>;

    /// Persist changes to an existing gallery
    async fn update(&self, gallery: Gallery) -> AppResult<Gallery>;

    /// Soft delete gallery (sets deleted_at timestamp)
    async fn delete(&self, gallery: &Gallery) -> AppResult<()>;
}

/// SeaORM implementation of GalleryRepository
pub struct GalleryStore {
    db: DatabaseConnection,
}

impl GalleryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GalleryRepository for GalleryStore {
    async fn by_id(&self, id: i32) -> AppResult<Gallery> {
        let select = GalleryEntity::find_by_id(id).filter(gallery::Column::DeletedAt.is_null());
        Ok(Gallery::from(first(&self.db, select).await?))
    }

    async fn by_user_id(&self, user_id: i32) -> AppResult<Vec<Gallery>> {
        let models = GalleryEntity::find()
            .filter(gallery::Column::UserId.eq(user_id))
            .filter(gallery::Column::DeletedAt.is_null())
            .order_by_asc(gallery::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Gallery::from).collect())
    }

    async fn create(&self, mut gallery: Gallery) -> AppResult<Gallery> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: NotSet,
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            title: Set(gallery.title.clone()),
            user_id: Set(gallery.user_id),
        };

        let model = active_model.insert(&self.db).await.map_err(map_write_err)?;
        gallery.id = model.id;
        gallery.created_at = model.created_at;
        gallery.updated_at = model.updated_at;
        gallery.deleted_at = None;
        Ok(gallery)
    }

    async fn update(&self, mut gallery: Gallery) -> AppResult<Gallery> {
        let active_model = ActiveModel {
            id: Unchanged(gallery.id),
            created_at: NotSet,
            updated_at: Set(Utc::now()),
            deleted_at: NotSet,
            title: Set(gallery.title.clone()),
            user_id: Set(gallery.user_id),
        };

        let model = GalleryEntity::update(active_model)
            .filter(gallery::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(map_write_err)?;
        gallery.created_at = model.created_at;
        gallery.updated_at = model.updated_at;
        Ok(gallery)
    }

    async fn delete(&self, gallery: &Gallery) -> AppResult<()> {
        let now = Utc::now();
        GalleryEntity::update_many()
            .col_expr(gallery::Column::DeletedAt, Expr::value(now))
            .col_expr(gallery::Column::UpdatedAt, Expr::value(now))
            .filter(gallery::Column::Id.eq(gallery.id))
            .filter(gallery::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
