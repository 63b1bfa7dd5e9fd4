//! Self-contained ciphertext envelopes.
//!
//! Each call to `seal` draws a fresh random IV and salt, derives a one-time
//! AES-256 key from the caller's secret, and prepends both values to the
//! ciphertext.  `open` splits them back out before decrypting.
//!
//! Layout of an envelope, in this exact order:
//!   [ 16-byte IV | 16-byte salt | ciphertext + 16-byte auth tag ]
//!
//! The byte order and field widths are a compatibility contract with stored
//! data — do not reorder or resize them.  AES-256-GCM is used with the
//! 16-byte IV as its nonce, so a failed open means either a wrong secret or
//! tampered data; the two cases are deliberately indistinguishable.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce};
use rand::RngCore;
use zeroize::Zeroize;

use crate::crypto::kdf::{derive_entry_key, generate_salt, SALT_LEN};
use crate::errors::{Result, VaultError};

/// AES-256-GCM parameterized with a 16-byte nonce so the envelope's
/// fixed-width IV field can be fed to it directly.
type EnvelopeCipher = AesGcm<Aes256, U16>;

/// Size of the envelope IV in bytes.
pub const IV_LEN: usize = 16;

/// Fixed-width envelope prefix: IV followed by salt.
pub const HEADER_LEN: usize = IV_LEN + SALT_LEN;

/// Encrypt `plaintext` under a key derived from `secret`.
///
/// A fresh salt and IV are generated on every call, so sealing the same
/// plaintext twice with the same secret yields two different envelopes.
/// The derived key lives only for the duration of this call and is wiped
/// before returning.
pub fn seal(plaintext: &[u8], secret: &str) -> Result<Vec<u8>> {
    let salt = generate_salt();
    let iv = generate_iv();

    let mut key = derive_entry_key(secret.as_bytes(), &salt)?;
    let cipher = EnvelopeCipher::new_from_slice(&key)
        .map_err(|e| VaultError::EncryptionFailed(format!("invalid key length: {e}")));
    key.zeroize();
    let cipher = cipher?;

    let ciphertext = cipher
        .encrypt(Nonce::<U16>::from_slice(&iv), plaintext)
        .map_err(|e| VaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    // Prepend IV and salt so the envelope is self-contained.
    let mut output = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    output.extend_from_slice(&iv);
    output.extend_from_slice(&salt);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt an envelope produced by `seal`.
///
/// Fails with `MalformedEnvelope` if the buffer is shorter than the fixed
/// 32-byte prefix, and with `DecryptionFailure` for everything else — a
/// wrong secret and corrupted ciphertext are not distinguished.
pub fn open(envelope: &[u8], secret: &str) -> Result<Vec<u8>> {
    if envelope.len() < HEADER_LEN {
        return Err(VaultError::MalformedEnvelope);
    }

    let (iv, rest) = envelope.split_at(IV_LEN);
    let (salt, ciphertext) = rest.split_at(SALT_LEN);

    // Re-derive the key with the same fixed KDF parameters.
    let mut key = derive_entry_key(secret.as_bytes(), salt)?;
    let cipher = EnvelopeCipher::new_from_slice(&key).map_err(|_| VaultError::DecryptionFailure);
    key.zeroize();
    let cipher = cipher?;

    cipher
        .decrypt(Nonce::<U16>::from_slice(iv), ciphertext)
        .map_err(|_| VaultError::DecryptionFailure)
}

/// Generate a cryptographically random 16-byte IV.
pub fn generate_iv() -> [u8; IV_LEN] {
    let mut iv = [0u8; IV_LEN];
    rand::rngs::OsRng.fill_bytes(&mut iv);
    iv
}

// ---------------------------------------------------------------------------
// Transport encoding — base64 only at the system boundary
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Encode an envelope for transport (base64).
pub fn to_transport(envelope: &[u8]) -> String {
    BASE64.encode(envelope)
}

/// Decode a transport-encoded envelope back into bytes.
pub fn from_transport(encoded: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(encoded)
        .map_err(|_| VaultError::MalformedEnvelope)
}

/// Serde helper: serialize an envelope field as a base64 string.
pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&BASE64.encode(data))
}

/// Serde helper: deserialize a base64 string back into envelope bytes.
pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
