//! Keyed hashing of remember tokens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA-256 bound to a server-side secret.
///
/// The digest of a plaintext token is what gets persisted and looked up, so
/// a leaked database row cannot be replayed as a cookie. Hashing is
/// deterministic for a given key and input; there is no reverse operation.
#[derive(Clone)]
pub struct KeyedHasher {
    mac: HmacSha256,
}

impl KeyedHasher {
    pub fn new(key: &str) -> Self {
        let mac = HmacSha256::new_from_slice(key.as_bytes())
            .expect("HMAC can take a key of any length");
        Self { mac }
    }

    /// Digest of `input`, rendered as URL-safe unpadded base64.
    pub fn hash(&self, input: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(input.as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for KeyedHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedHasher")
            .field("key", &"[REDACTED]")
            .finish()
    }
}
