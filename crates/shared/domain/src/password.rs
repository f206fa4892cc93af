//! Password value object - peppered Argon2 hashing.

use argon2::{
    password_hash::{self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::CryptoError;

/// Salted hash of `password + pepper`.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plaintext password with the server pepper appended.
    ///
    /// Length rules are enforced by the user validation pipeline, not here.
    pub fn hash(plain_text: &str, pepper: &str) -> Result<Self, CryptoError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(peppered(plain_text, pepper).as_bytes(), &salt)
            .map_err(|e| CryptoError::PasswordHash(e.to_string()))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Wrap an existing hash (from the database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Constant-time check of `plain_text + pepper` against this hash.
    ///
    /// A mismatch is `Ok(false)`; a malformed stored hash or any other
    /// verifier failure is an error.
    pub fn verify(&self, plain_text: &str, pepper: &str) -> Result<bool, CryptoError> {
        let parsed =
            PasswordHash::new(&self.hash).map_err(|e| CryptoError::PasswordHash(e.to_string()))?;
        match Self::argon2().verify_password(peppered(plain_text, pepper).as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(CryptoError::PasswordHash(e.to_string())),
        }
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

fn peppered(plain_text: &str, pepper: &str) -> String {
    format!("{plain_text}{pepper}")
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}
