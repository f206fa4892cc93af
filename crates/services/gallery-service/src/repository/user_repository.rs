//! User repository: the capability trait and its database-backed store.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Unchanged, ColumnTrait,
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::{first, map_write_err};
use common::AppResult;
use domain::{ModelError, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User data access, implemented by the store, the validator and the manager.
///
/// Lookups exclude soft-deleted users and fail with NotFound when nothing
/// matches.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find active user by ID
    async fn by_id(&self, id: i32) -> AppResult<User>;

    /// Find active user by email address
    async fn by_email(&self, email: &str) -> AppResult<User>;

    /// Find active user by remember token.
    ///
    /// The store expects the keyed hash; the validator accepts the
    /// plaintext token and hashes it before forwarding.
    async fn by_remember(&self, token: &str) -> AppResult<User>;

    /// Persist a new user, returning it with its ID and timestamps assigned
    async fn create(&self, user: User) -> AppResult<User>;

    /// Persist changes to an existing user
    async fn update(&self, user: User) -> AppResult<User>;

    /// Soft delete user (sets deleted_at timestamp)
    async fn delete(&self, user: &User) -> AppResult<()>;
}

/// SeaORM implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// First active user of the given age.
    pub async fn by_age(&self, age: i32) -> AppResult<User> {
        if age <= 0 {
            return Err(ModelError::InvalidAge.into());
        }
        let select = UserEntity::find()
            .filter(user::Column::Age.eq(age))
            .filter(user::Column::DeletedAt.is_null())
            .order_by_asc(user::Column::Id);
        Ok(User::from(first(&self.db, select).await?))
    }

    /// Active users with `min <= age <= max`, ordered by age.
    pub async fn by_age_range(&self, min: i32, max: i32) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(user::Column::Age.between(min, max))
            .filter(user::Column::DeletedAt.is_null())
            .order_by_asc(user::Column::Age)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn by_id(&self, id: i32) -> AppResult<User> {
        let select = UserEntity::find_by_id(id).filter(user::Column::DeletedAt.is_null());
        Ok(User::from(first(&self.db, select).await?))
    }

    async fn by_email(&self, email: &str) -> AppResult<User> {
        let select = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::DeletedAt.is_null());
        Ok(User::from(first(&self.db, select).await?))
    }

    async fn by_remember(&self, token: &str) -> AppResult<User> {
        let select = UserEntity::find()
            .filter(user::Column::RememberHash.eq(token))
            .filter(user::Column::DeletedAt.is_null());
        Ok(User::from(first(&self.db, select).await?))
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: NotSet,
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            name: Set(user.name.clone()),
            age: Set(user.age),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            remember_hash: Set(user.remember_hash.clone()),
        };

        let model = active_model.insert(&self.db).await.map_err(map_write_err)?;
        user.id = model.id;
        user.created_at = model.created_at;
        user.updated_at = model.updated_at;
        user.deleted_at = None;
        Ok(user)
    }

    async fn update(&self, mut user: User) -> AppResult<User> {
        let active_model = ActiveModel {
            id: Unchanged(user.id),
            created_at: NotSet,
            updated_at: Set(Utc::now()),
            deleted_at: NotSet,
            name: Set(user.name.clone()),
            age: Set(user.age),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            remember_hash: Set(user.remember_hash.clone()),
        };

        // Only active (non-deleted) users can be updated
        let model = UserEntity::update(active_model)
            .filter(user::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(map_write_err)?;
        user.created_at = model.created_at;
        user.updated_at = model.updated_at;
        Ok(user)
    }

    async fn delete(&self, user: &User) -> AppResult<()> {
        // Soft delete: set deleted_at timestamp
        let now = Utc::now();
        UserEntity::update_many()
            .col_expr(user::Column::DeletedAt, Expr::value(now))
            .col_expr(user::Column::UpdatedAt, Expr::value(now))
            .filter(user::Column::Id.eq(user.id))
            .filter(user::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
