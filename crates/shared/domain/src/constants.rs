//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Email address pattern, applied after normalization
pub const EMAIL_PATTERN: &str = r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,16}$";

// =============================================================================
// Sessions
// =============================================================================

/// Number of random bytes in a remember token
pub const REMEMBER_TOKEN_BYTES: usize = 32;

/// Cookie carrying the plaintext remember token
pub const REMEMBER_COOKIE: &str = "remember_token";

// =============================================================================
// Errors
// =============================================================================

/// Prefix carried by every model error message
pub const ERROR_PREFIX: &str = "domain: ";

/// Message shown in place of private and infrastructure failures
pub const GENERIC_ERROR_MESSAGE: &str =
    "Something went wrong. Please try again, or contact us if the problem persists.";

// =============================================================================
// Images
// =============================================================================

/// Directory (relative to the image root) holding one folder per gallery
pub const GALLERIES_DIR: &str = "galleries";

/// URL prefix under which image files are served
pub const IMAGES_URL_PREFIX: &str = "/images";
