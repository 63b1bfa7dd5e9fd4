use thiserror::Error;

/// All errors that can occur in PassVault.
///
/// The security-sensitive variants are unit variants on purpose: callers
/// switch on the kind and get nothing else. In particular, a wrong master
/// secret and corrupted ciphertext both surface as `DecryptionFailure`.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Account errors ---
    #[error("Registration failed — handle is already taken")]
    DuplicateHandle,

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[error("Invalid handle or login secret")]
    InvalidCredentials,

    // --- Vault errors ---
    #[error("Invalid master secret")]
    InvalidMasterSecret,

    #[error("Entry not found")]
    NotFound,

    // --- Crypto errors ---
    #[error("Stored ciphertext is malformed")]
    MalformedEnvelope,

    #[error("Decryption failed")]
    DecryptionFailure,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Secret hashing failed: {0}")]
    HashingFailed(String),

    // --- Storage errors ---
    #[error("Storage error: {0}")]
    Storage(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

impl From<rusqlite::Error> for VaultError {
    fn from(e: rusqlite::Error) -> Self {
        VaultError::Storage(e.to_string())
    }
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
