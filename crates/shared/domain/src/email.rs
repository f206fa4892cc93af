//! Email normalization and format checks.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::EMAIL_PATTERN;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// Lowercase and trim an address. Idempotent.
pub fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Whether an already-normalized address matches the accepted format.
pub fn is_valid(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_trims() {
        assert_eq!(normalize("  Jon@Example.COM \n"), "jon@example.com");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["A@B.com", "  mixed.Case+tag@Host.IO ", "", "already@normal.org"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_valid_addresses() {
        assert!(is_valid("a@b.com"));
        assert!(is_valid("first.last+tag@sub.example.co"));
        assert!(is_valid("x_y%z@host-name.museum"));
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(!is_valid(""));
        assert!(!is_valid("no-at-sign.com"));
        assert!(!is_valid("a@b"));
        assert!(!is_valid("a@b.c"));
        assert!(!is_valid("Upper@Case.com"));
        assert!(!is_valid("spaces in@here.com"));
    }
}
