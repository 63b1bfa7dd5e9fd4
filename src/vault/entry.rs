//! Account and vault-entry types.
//!
//! The `encrypted_secret` field uses custom serde helpers so it serializes
//! as a base64 string in JSON rather than a raw byte array; everywhere else
//! it is a plain byte buffer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crypto::envelope::{base64_decode, base64_encode};

/// Fixed placeholder shown in place of a secret on every read path that is
/// not the explicit reveal operation.
pub const MASKED_SECRET: &str = "********";

/// Minimum length of an account handle.
pub const HANDLE_MIN_LEN: usize = 3;

/// Maximum length of an account handle.
pub const HANDLE_MAX_LEN: usize = 50;

/// A registered account.
///
/// The two hashes are independent: the login hash authenticates access, the
/// master hash authorizes decryption.  They are never compared against each
/// other, and no plaintext secret ever reaches persistent storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,

    /// Globally unique human-readable handle (3-50 chars).
    pub handle: String,

    /// One-way hash of the login secret (PHC string).
    pub login_secret_hash: String,

    /// One-way hash of the master secret (PHC string), stored separately
    /// from the login hash.
    pub master_secret_hash: String,

    /// Set once at creation, immutable thereafter.
    pub created_at: DateTime<Utc>,
}

/// A single encrypted credential owned by exactly one account.
///
/// Entries are created, revealed, and deleted — never updated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultEntry {
    pub id: Uuid,

    /// The owning account.  Used purely for authorization filtering.
    pub account_id: Uuid,

    /// Target application or site name — stored in clear.
    pub label: String,

    /// The credential's username at that target — stored in clear.
    pub entry_username: String,

    /// The ciphertext envelope (IV + salt + ciphertext).  The only
    /// sensitive field; serialized as base64 in JSON.
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub encrypted_secret: Vec<u8>,

    /// Set once at creation, immutable thereafter.
    pub created_at: DateTime<Utc>,
}

/// Public view of an entry with the secret replaced by the mask token.
///
/// This is the only entry shape that leaves the orchestrator on list and
/// add paths.
#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    pub id: Uuid,
    pub label: String,
    pub entry_username: String,
    pub secret: String,
    pub created_at: DateTime<Utc>,
}

impl EntryView {
    /// Build the masked view of an entry.  Never touches the ciphertext.
    pub fn masked(entry: &VaultEntry) -> Self {
        Self {
            id: entry.id,
            label: entry.label.clone(),
            entry_username: entry.entry_username.clone(),
            secret: MASKED_SECRET.to_string(),
            created_at: entry.created_at,
        }
    }
}
