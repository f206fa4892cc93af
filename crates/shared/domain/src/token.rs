//! Session token generation.
//!
//! Tokens are URL-safe base64 (no padding) over bytes drawn from the OS
//! CSPRNG. A failing random source is surfaced as an error; there is no
//! fallback to a weaker generator.

use base64::{
    alphabet,
    engine::{general_purpose::URL_SAFE_NO_PAD, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use rand::{rngs::OsRng, RngCore};

use crate::constants::REMEMBER_TOKEN_BYTES;
use crate::error::CryptoError;

/// URL-safe decoder that accepts tokens with or without trailing padding.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// `n` random bytes from the OS CSPRNG.
pub fn bytes(n: usize) -> Result<Vec<u8>, CryptoError> {
    let mut buf = vec![0u8; n];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| CryptoError::RandomSource(e.to_string()))?;
    Ok(buf)
}

/// A random token encoding `n_bytes` bytes.
pub fn generate(n_bytes: usize) -> Result<String, CryptoError> {
    Ok(URL_SAFE_NO_PAD.encode(bytes(n_bytes)?))
}

/// A fresh remember token.
pub fn remember_token() -> Result<String, CryptoError> {
    generate(REMEMBER_TOKEN_BYTES)
}

/// Number of bytes a token decodes to.
pub fn decoded_length(token: &str) -> Result<usize, CryptoError> {
    Ok(URL_SAFE_LENIENT.decode(token)?.len())
}
