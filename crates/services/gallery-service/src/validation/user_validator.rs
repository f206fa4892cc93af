//! User validation pipeline.

use std::sync::Arc;

use async_trait::async_trait;

use common::AppResult;
use domain::{email, token, KeyedHasher, ModelError, Password, User};
use domain::{MIN_PASSWORD_LENGTH, REMEMBER_TOKEN_BYTES};

use super::Pipeline;
use crate::repository::UserRepository;

/// Named steps of the user pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCheck {
    /// Plaintext password must be present
    PasswordRequired,
    /// Plaintext password, when present, must reach the minimum length
    PasswordMinLength,
    /// Hash `password + pepper` into `password_hash` and clear the plaintext
    HashPassword,
    /// A password hash must exist after hashing
    PasswordHashRequired,
    /// Generate a remember token when none is set
    SetRememberIfUnset,
    /// Remember token, when present, must decode to enough bytes
    RememberMinBytes,
    /// Derive `remember_hash` from the plaintext token
    HashRemember,
    /// A remember hash must exist before persisting
    RememberHashRequired,
    /// Lowercase and trim the email address
    NormalizeEmail,
    RequireEmail,
    EmailFormat,
    /// No other active user may hold the same address
    EmailNotTaken,
    IdGreaterThanZero,
}

impl UserCheck {
    /// Steps run before a user is created.
    pub const CREATE: &'static [UserCheck] = &[
        UserCheck::PasswordRequired,
        UserCheck::PasswordMinLength,
        UserCheck::HashPassword,
        UserCheck::PasswordHashRequired,
        UserCheck::SetRememberIfUnset,
        UserCheck::RememberMinBytes,
        UserCheck::HashRemember,
        UserCheck::RememberHashRequired,
        UserCheck::NormalizeEmail,
        UserCheck::RequireEmail,
        UserCheck::EmailFormat,
        UserCheck::EmailNotTaken,
    ];

    /// Steps run before a user is updated. The password is optional here and
    /// an existing remember hash is kept unless a new token was set.
    pub const UPDATE: &'static [UserCheck] = &[
        UserCheck::PasswordMinLength,
        UserCheck::HashPassword,
        UserCheck::PasswordHashRequired,
        UserCheck::RememberMinBytes,
        UserCheck::HashRemember,
        UserCheck::RememberHashRequired,
        UserCheck::NormalizeEmail,
        UserCheck::RequireEmail,
        UserCheck::EmailFormat,
        UserCheck::EmailNotTaken,
    ];

    pub const DELETE: &'static [UserCheck] = &[UserCheck::IdGreaterThanZero];
}

/// Validating decorator around a UserRepository.
pub struct UserValidator {
    inner: Arc<dyn UserRepository>,
    hasher: KeyedHasher,
    pepper: String,
}

impl UserValidator {
    pub fn new(
        inner: Arc<dyn UserRepository>,
        hasher: KeyedHasher,
        pepper: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            hasher,
            pepper: pepper.into(),
        }
    }

    async fn email_not_taken(&self, user: &User) -> AppResult<()> {
        match self.inner.by_email(&user.email).await {
            Ok(existing) if existing.id != user.id => Err(ModelError::EmailTaken.into()),
            Ok(_) => Ok(()),
            Err(err) if err.is_not_found() => Ok(()),
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl Pipeline for UserValidator {
    type Entity = User;
    type Check = UserCheck;

    async fn apply(&self, check: UserCheck, user: &mut User) -> AppResult<()> {
        match check {
            UserCheck::PasswordRequired => {
                if user.password.is_empty() {
                    return Err(ModelError::PasswordRequired.into());
                }
            }
            UserCheck::PasswordMinLength => {
                if !user.password.is_empty() && user.password.chars().count() < MIN_PASSWORD_LENGTH {
                    return Err(ModelError::PasswordTooShort.into());
                }
            }
            UserCheck::HashPassword => {
                if !user.password.is_empty() {
                    user.password_hash = Password::hash(&user.password, &self.pepper)?.into_string();
                    user.password.clear();
                }
            }
            UserCheck::PasswordHashRequired => {
                if user.password_hash.is_empty() {
                    return Err(ModelError::PasswordRequired.into());
                }
            }
            UserCheck::SetRememberIfUnset => {
                if user.remember.is_empty() {
                    user.remember = token::remember_token()?;
                }
            }
            UserCheck::RememberMinBytes => {
                if !user.remember.is_empty()
                    && token::decoded_length(&user.remember)? < REMEMBER_TOKEN_BYTES
                {
                    return Err(ModelError::TokenTooShort.into());
                }
            }
            UserCheck::HashRemember => {
                if !user.remember.is_empty() {
                    user.remember_hash = self.hasher.hash(&user.remember);
                }
            }
            UserCheck::RememberHashRequired => {
                if user.remember_hash.is_empty() {
                    return Err(ModelError::RememberRequired.into());
                }
            }
            UserCheck::NormalizeEmail => {
                user.email = email::normalize(&user.email);
            }
            UserCheck::RequireEmail => {
                if user.email.is_empty() {
                    return Err(ModelError::EmailRequired.into());
                }
            }
            UserCheck::EmailFormat => {
                if !email::is_valid(&user.email) {
                    return Err(ModelError::EmailInvalid.into());
                }
            }
            UserCheck::EmailNotTaken => self.email_not_taken(user).await?,
            UserCheck::IdGreaterThanZero => {
                if user.id <= 0 {
                    return Err(ModelError::InvalidId.into());
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for UserValidator {
    async fn by_id(&self, id: i32) -> AppResult<User> {
        self.inner.by_id(id).await
    }

    async fn by_email(&self, email: &str) -> AppResult<User> {
        let mut user = User {
            email: email.to_string(),
            ..Default::default()
        };
        self.run(&mut user, &[UserCheck::NormalizeEmail]).await?;
        self.inner.by_email(&user.email).await
    }

    async fn by_remember(&self, token: &str) -> AppResult<User> {
        let mut user = User {
            remember: token.to_string(),
            ..Default::default()
        };
        self.run(&mut user, &[UserCheck::HashRemember]).await?;
        self.inner.by_remember(&user.remember_hash).await
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        self.run(&mut user, UserCheck::CREATE).await?;
        self.inner.create(user).await
    }

    async fn update(&self, mut user: User) -> AppResult<User> {
        self.run(&mut user, UserCheck::UPDATE).await?;
        self.inner.update(user).await
    }

    async fn delete(&self, user: &User) -> AppResult<()> {
        let mut target = User {
            id: user.id,
            ..Default::default()
        };
        self.run(&mut target, UserCheck::DELETE).await?;
        self.inner.delete(user).await
    }
}
