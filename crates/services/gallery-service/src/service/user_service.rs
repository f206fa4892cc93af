//! User service - authentication and remember-token sessions.

use std::sync::Arc;

use async_trait::async_trait;

use common::AppResult;
use domain::{token, ModelError, Password, User};

use crate::repository::UserRepository;

/// User operations exposed to handlers.
#[async_trait]
pub trait UserService: UserRepository {
    /// Look the user up by (normalized) email and check the password.
    ///
    /// Unknown addresses fail with NotFound and wrong passwords with
    /// InvalidPassword; a stored hash the verifier cannot parse is an
    /// infrastructure error.
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<User>;

    /// Make sure the user holds a plaintext remember token, issuing and
    /// persisting a new one if not. The returned user carries the token in
    /// `remember` for the session cookie.
    async fn sign_in(&self, user: User) -> AppResult<User>;

    /// Replace the remember token unconditionally so previously issued
    /// cookies stop resolving.
    async fn rotate_remember(&self, user: User) -> AppResult<User>;
}

/// UserService over a (validating) UserRepository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    pepper: String,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>, pepper: impl Into<String>) -> Self {
        Self {
            repo,
            pepper: pepper.into(),
        }
    }
}

#[async_trait]
impl UserRepository for UserManager {
    async fn by_id(&self, id: i32) -> AppResult<User> {
        self.repo.by_id(id).await
    }

    async fn by_email(&self, email: &str) -> AppResult<User> {
        self.repo.by_email(email).await
    }

    async fn by_remember(&self, token: &str) -> AppResult<User> {
        self.repo.by_remember(token).await
    }

    async fn create(&self, user: User) -> AppResult<User> {
        self.repo.create(user).await
    }

    async fn update(&self, user: User) -> AppResult<User> {
        self.repo.update(user).await
    }

    async fn delete(&self, user: &User) -> AppResult<()> {
        self.repo.delete(user).await
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self.repo.by_email(email).await?;

        let stored = Password::from_hash(user.password_hash.clone());
        if !stored.verify(password, &self.pepper)? {
            tracing::debug!(user_id = user.id, "Password mismatch");
            return Err(ModelError::InvalidPassword.into());
        }
        Ok(user)
    }

    async fn sign_in(&self, user: User) -> AppResult<User> {
        if !user.remember.is_empty() {
            return Ok(user);
        }
        self.rotate_remember(user).await
    }

    async fn rotate_remember(&self, mut user: User) -> AppResult<User> {
        user.remember = token::remember_token()?;
        self.repo.update(user).await
    }
}
