//! API token generation and hashing.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "tp";

/// Mint a fresh bearer token. The raw value is shown once at issuance;
/// storage only ever sees its hash.
#[must_use]
pub fn generate_api_token() -> String {
    format!(
        "{API_TOKEN_PREFIX}_{}{}",
        Uuid::now_v7().simple(),
        Uuid::now_v7().simple()
    )
}

/// Sha-256 hex digest of a raw token, the stored and queried form.
#[must_use]
pub fn hash_api_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());

    encode_hex(digest.as_slice())
}

fn encode_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut encoded = String::with_capacity(bytes.len() * 2);

    for byte in bytes {
        encoded.push(HEX[(byte >> 4) as usize] as char);
        encoded.push(HEX[(byte & 0x0f) as usize] as char);
    }

    encoded
}
