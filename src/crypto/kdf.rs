//! Secret-based key derivation using Argon2id.
//!
//! Argon2id is a memory-hard KDF that protects against brute-force and
//! GPU-based attacks.  Envelope keys are always re-derived from the salt
//! stored inside the envelope itself, so the parameters here are fixed
//! constants rather than configuration: changing them would orphan every
//! envelope already written.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;

use crate::errors::{Result, VaultError};

/// Length of the per-envelope salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
const KEY_LEN: usize = 32;

/// Memory cost in KiB (64 MB).
const MEMORY_KIB: u32 = 65_536;

/// Number of iterations.
const ITERATIONS: u32 = 3;

/// Parallelism lanes.
const PARALLELISM: u32 = 4;

/// Derive a 32-byte entry-encryption key from a secret and salt.
///
/// The same secret + salt will always produce the same key.  This call is
/// deliberately CPU- and memory-expensive; callers on latency-sensitive
/// dispatch paths should run it on a blocking worker pool rather than
/// inline.
pub fn derive_entry_key(secret: &[u8], salt: &[u8]) -> Result<[u8; KEY_LEN]> {
    let params = Params::new(MEMORY_KIB, ITERATIONS, PARALLELISM, Some(KEY_LEN))
        .map_err(|e| VaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(secret, salt, &mut key)
        .map_err(|e| VaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}
