//! Domain-level errors.
//!
//! `ModelError` is the closed set of conditions the data-access layer can
//! report. Each variant is classified once, here, as either public (its text
//! may be shown to a visitor after formatting) or private (logged, replaced by
//! a generic message). `CryptoError` covers failures of the cryptographic
//! primitives and is always treated as infrastructure.

use thiserror::Error;

use crate::constants::{ERROR_PREFIX, MIN_PASSWORD_LENGTH, REMEMBER_TOKEN_BYTES};

/// Whether an error's text may be shown to an end user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// Business rule violations raised by stores, validators and services.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelError {
    #[error("domain: Resource not found")]
    NotFound,

    #[error("domain: Age received must be greater than 0")]
    InvalidAge,

    #[error("domain: Incorrect password provided")]
    InvalidPassword,

    #[error("domain: Email address is required")]
    EmailRequired,

    #[error("domain: Email address is not valid")]
    EmailInvalid,

    #[error("domain: Email address is already taken")]
    EmailTaken,

    #[error("domain: Password must be at least {min} characters long", min = MIN_PASSWORD_LENGTH)]
    PasswordTooShort,

    #[error("domain: Password is required")]
    PasswordRequired,

    #[error("domain: Remember token is required")]
    RememberRequired,

    #[error("domain: Title is required")]
    TitleRequired,

    #[error("domain: Remember token must be at least {min} bytes", min = REMEMBER_TOKEN_BYTES)]
    TokenTooShort,

    #[error("domain: Owner ID is required")]
    OwnerIdRequired,

    #[error("domain: ID must be greater than 0")]
    InvalidId,
}

impl ModelError {
    /// Classification of this error, fixed per variant.
    pub fn visibility(&self) -> Visibility {
        match self {
            ModelError::TokenTooShort | ModelError::OwnerIdRequired | ModelError::InvalidId => {
                Visibility::Private
            }
            _ => Visibility::Public,
        }
    }

    pub fn is_public(&self) -> bool {
        self.visibility() == Visibility::Public
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::NotFound => "NOT_FOUND",
            ModelError::InvalidAge => "INVALID_AGE",
            ModelError::InvalidPassword => "INVALID_PASSWORD",
            ModelError::EmailRequired => "EMAIL_REQUIRED",
            ModelError::EmailInvalid => "EMAIL_INVALID",
            ModelError::EmailTaken => "EMAIL_TAKEN",
            ModelError::PasswordTooShort => "PASSWORD_TOO_SHORT",
            ModelError::PasswordRequired => "PASSWORD_REQUIRED",
            ModelError::RememberRequired => "REMEMBER_REQUIRED",
            ModelError::TitleRequired => "TITLE_REQUIRED",
            ModelError::TokenTooShort => "TOKEN_TOO_SHORT",
            ModelError::OwnerIdRequired => "OWNER_ID_REQUIRED",
            ModelError::InvalidId => "INVALID_ID",
        }
    }

    /// Text safe to show a visitor, or `None` for private errors.
    ///
    /// The internal prefix is stripped, every word lowercased, the first word
    /// capitalized and a period appended: `"domain: Email address is
    /// required"` becomes `"Email address is required."`.
    pub fn public_message(&self) -> Option<String> {
        if !self.is_public() {
            return None;
        }
        Some(format_public(&self.to_string()))
    }
}

fn format_public(raw: &str) -> String {
    let stripped = raw.strip_prefix(ERROR_PREFIX).unwrap_or(raw);
    let mut words: Vec<String> = stripped.split_whitespace().map(str::to_lowercase).collect();
    if let Some(first) = words.first_mut() {
        let mut chars = first.chars();
        if let Some(head) = chars.next() {
            *first = head.to_uppercase().chain(chars).collect();
        }
    }
    let mut message = words.join(" ");
    message.push('.');
    message
}

/// Failures of the token generator, keyed hasher and password hasher.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// The operating system's secure random source could not be read
    #[error("Secure random source unavailable: {0}")]
    RandomSource(String),

    /// A token was not valid URL-safe base64
    #[error("Malformed token encoding: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// Hashing or verifying a password failed for a reason other than a mismatch
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}
