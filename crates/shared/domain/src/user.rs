//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User domain entity
///
/// `password` and `remember` are transient plaintexts: the validation
/// pipeline derives `password_hash` and `remember_hash` from them, and only
/// the derived values are ever persisted.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct User {
    /// Surrogate key, 0 until the user is persisted
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub email: String,
    #[serde(skip)]
    pub password: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip)]
    pub remember: String,
    #[serde(skip_serializing)]
    pub remember_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft delete timestamp (None = active, Some = deleted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// A new, unpersisted user carrying a plaintext password.
    pub fn new(
        name: impl Into<String>,
        age: i32,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            email: email.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    /// Check if user is soft deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Whether the user has been assigned a surrogate key
    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }
}

// Plaintext secrets and their digests stay out of logs.
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("age", &self.age)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("password_hash", &"[REDACTED]")
            .field("remember", &"[REDACTED]")
            .field("remember_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .field("deleted_at", &self.deleted_at)
            .finish()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            age: user.age,
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}
