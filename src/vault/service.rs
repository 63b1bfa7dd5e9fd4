//! Vault orchestration.
//!
//! `VaultService` is the only place allowed to open envelopes or persist
//! new ciphertext.  Every sensitive operation re-verifies the master secret
//! against the account's stored hash — there is no cached "unlocked" state,
//! so a stolen login session alone can never decrypt anything.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use zeroize::{Zeroize, Zeroizing};

use crate::crypto::{envelope, SecretGate};
use crate::errors::{Result, VaultError};
use crate::store::VaultStore;

use super::entry::{EntryView, VaultEntry};

/// The vault orchestrator.
///
/// Takes its collaborators as constructor arguments; it holds no state of
/// its own beyond them, so one instance serves any number of concurrent
/// callers.
pub struct VaultService {
    store: Arc<dyn VaultStore>,
    master_gate: SecretGate,
}

impl VaultService {
    /// Build a service from its store and the master-purpose gate.
    pub fn new(store: Arc<dyn VaultStore>, master_gate: SecretGate) -> Self {
        Self { store, master_gate }
    }

    /// List every entry owned by the account, secrets masked.
    ///
    /// Read-only; never touches the cipher.
    pub fn list(&self, account_id: Uuid) -> Result<Vec<EntryView>> {
        let entries = self.store.entries_for_account(account_id)?;
        Ok(entries.iter().map(EntryView::masked).collect())
    }

    /// Add a new credential to the account's vault.
    ///
    /// The master attempt is verified first; on failure nothing is
    /// persisted.  The attempt value itself is the key material for the
    /// envelope — no separately stored key exists.  The plaintext is
    /// dropped as soon as the envelope is sealed.
    pub fn add(
        &self,
        account_id: Uuid,
        label: &str,
        entry_username: &str,
        plaintext_secret: &str,
        master_attempt: &str,
    ) -> Result<EntryView> {
        self.check_master(account_id, master_attempt)?;

        let encrypted_secret = envelope::seal(plaintext_secret.as_bytes(), master_attempt)?;

        let entry = VaultEntry {
            id: Uuid::new_v4(),
            account_id,
            label: label.to_string(),
            entry_username: entry_username.to_string(),
            encrypted_secret,
            created_at: Utc::now(),
        };

        let entry = self.store.save_entry(entry)?;
        Ok(EntryView::masked(&entry))
    }

    /// Reveal one entry's secret.
    ///
    /// The lookup is simultaneously an existence and an ownership check: an
    /// entry owned by a different account is indistinguishable from a
    /// missing one.  The master secret is verified on every call.
    pub fn show(
        &self,
        account_id: Uuid,
        entry_id: Uuid,
        master_attempt: &str,
    ) -> Result<Zeroizing<String>> {
        let entry = self
            .store
            .entry_by_id_and_account(entry_id, account_id)?
            .ok_or(VaultError::NotFound)?;

        self.check_master(account_id, master_attempt)?;

        let plaintext = match envelope::open(&entry.encrypted_secret, master_attempt) {
            Ok(p) => p,
            Err(e) => {
                // A cipher failure after a successful master check should not
                // happen in correct operation.  Ids only — never key material
                // or cipher details.
                log::error!(
                    "decryption failed for entry {} (account {})",
                    entry.id,
                    account_id
                );
                return Err(e);
            }
        };

        // Take ownership without copying; wipe the bytes if they turn out
        // not to be valid UTF-8 before discarding them.
        String::from_utf8(plaintext).map(Zeroizing::new).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            VaultError::SerializationError("entry secret is not valid UTF-8".to_string())
        })
    }

    /// Delete an entry, with the same non-leaking ownership lookup as
    /// `show`.
    ///
    /// No master verification: deletion destroys the secret, it does not
    /// reveal it.
    pub fn delete(&self, account_id: Uuid, entry_id: Uuid) -> Result<()> {
        let entry = self
            .store
            .entry_by_id_and_account(entry_id, account_id)?
            .ok_or(VaultError::NotFound)?;

        self.store.delete_entry(&entry)
    }

    /// Verify a master-secret attempt against the account's stored hash.
    fn check_master(&self, account_id: Uuid, master_attempt: &str) -> Result<()> {
        let account = self
            .store
            .find_account_by_id(account_id)?
            .ok_or(VaultError::NotFound)?;

        if !self
            .master_gate
            .verify(master_attempt, &account.master_secret_hash)
        {
            return Err(VaultError::InvalidMasterSecret);
        }

        Ok(())
    }
}
