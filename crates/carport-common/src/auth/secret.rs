//! Opaque refresh token secrets
//!
//! Refresh tokens are 256-bit random values, not JWTs. The raw secret is
//! returned to the client exactly once; only its SHA-256 hex digest is
//! stored and used for lookup.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};

/// Generate a new opaque refresh secret (base64url, no padding)
#[must_use]
pub fn generate_refresh_secret() -> String {
    let token_bytes = rand::random::<[u8; 32]>();
    URL_SAFE_NO_PAD.encode(token_bytes)
}

/// Hash a refresh secret for storage and lookup
#[must_use]
pub fn hash_refresh_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret);
    format!("{:x}", hasher.finalize())
}
