use std::time::{SystemTime, UNIX_EPOCH};

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::{Error, Result};

/// Number of random bytes in an `oauth_nonce`.
pub const NONCE_LENGTH: usize = 32;

/// Generate a base64-encoded nonce of `length` random bytes from the OS source.
pub fn generate_nonce(length: usize) -> Result<String> {
    let mut bytes = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| Error::RandomnessUnavailable(e.to_string()))?;
    Ok(BASE64_STANDARD.encode(bytes))
}

/// Current Unix time in seconds.
pub fn generate_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
