//! One-way secret hashing and verification.
//!
//! A `SecretGate` registers and verifies a single credential without ever
//! storing or reconstructing it.  Hashing uses Argon2id in its salted
//! PHC-string form, so two hashes of the same secret differ and every hash
//! carries its own salt and work-factor parameters.
//!
//! Each gate is bound to a purpose (login or master).  The purpose is mixed
//! into the hashed message as a context prefix — the same context-binding
//! trick used for derived sub-keys — so a hash written by the login gate
//! never verifies through the master gate, even when the two underlying
//! secrets are the identical string.

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::Zeroize;

use crate::errors::{Result, VaultError};

/// Which credential a gate guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretPurpose {
    /// The login secret — proves identity for API access.
    Login,
    /// The master secret — authorizes decryption of vault contents.
    Master,
}

impl SecretPurpose {
    /// Domain-separation prefix mixed into the hashed message.
    fn context(self) -> &'static [u8] {
        match self {
            SecretPurpose::Login => b"passvault-login:",
            SecretPurpose::Master => b"passvault-master:",
        }
    }
}

/// Configurable Argon2id work factors for secret hashing.
///
/// These map 1:1 to the fields in `Settings`.  Verification always uses the
/// parameters embedded in the stored hash, so changing these only affects
/// newly written hashes.
#[derive(Debug, Clone, Copy)]
pub struct GateParams {
    /// Memory cost in KiB (default: 19 456 = 19 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 2).
    pub iterations: u32,
    /// Parallelism lanes (default: 1).
    pub parallelism: u32,
}

impl Default for GateParams {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// A one-way verification gate for a single credential purpose.
#[derive(Clone)]
pub struct SecretGate {
    purpose: SecretPurpose,
    params: GateParams,
}

impl SecretGate {
    /// Create a gate with default work factors.
    pub fn new(purpose: SecretPurpose) -> Self {
        Self::with_params(purpose, GateParams::default())
    }

    /// Create a gate with explicit work factors (from `Settings`).
    pub fn with_params(purpose: SecretPurpose, params: GateParams) -> Self {
        Self { purpose, params }
    }

    /// Hash a secret into a self-describing PHC string.
    ///
    /// A random salt is generated per call, so hashing the same secret
    /// twice yields two different strings that both verify.
    pub fn hash(&self, secret: &str) -> Result<String> {
        let params = Params::new(
            self.params.memory_kib,
            self.params.iterations,
            self.params.parallelism,
            None,
        )
        .map_err(|e| VaultError::HashingFailed(format!("invalid Argon2 params: {e}")))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);

        let mut message = self.tagged(secret);
        let hash = argon2
            .hash_password(&message, &salt)
            .map(|h| h.to_string())
            .map_err(|e| VaultError::HashingFailed(format!("Argon2id hashing failed: {e}")));
        message.zeroize();

        hash
    }

    /// Check a secret against a stored hash.
    ///
    /// Returns `true` iff the secret matches under the parameters embedded
    /// in the hash itself.  Never fails: a malformed or unparseable stored
    /// hash verifies as `false`.
    pub fn verify(&self, secret: &str, stored_hash: &str) -> bool {
        let parsed = match PasswordHash::new(stored_hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        let mut message = self.tagged(secret);
        let ok = Argon2::default().verify_password(&message, &parsed).is_ok();
        message.zeroize();

        ok
    }

    /// Prefix the secret with this gate's purpose context.
    fn tagged(&self, secret: &str) -> Vec<u8> {
        let context = self.purpose.context();
        let mut message = Vec::with_capacity(context.len() + secret.len());
        message.extend_from_slice(context);
        message.extend_from_slice(secret.as_bytes());
        message
    }
}
