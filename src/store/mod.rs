//! Persistence contract and the in-memory reference backend.
//!
//! The services above are stateless; all shared state and locking live
//! behind a `VaultStore` implementation.  Backends enforce handle
//! uniqueness themselves so a registration race cannot slip past the
//! service-level duplicate check.

pub mod sqlite;

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use crate::errors::{Result, VaultError};
use crate::vault::entry::{Account, VaultEntry};

pub use sqlite::SqliteStore;

/// Persistence contract for accounts and their entries.
pub trait VaultStore: Send + Sync {
    /// Persist an account.  Fails with `DuplicateHandle` if the handle is
    /// already taken by a different account.
    fn save_account(&self, account: Account) -> Result<Account>;

    fn find_account_by_handle(&self, handle: &str) -> Result<Option<Account>>;

    fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>>;

    /// Persist an entry.  Either the full entry is written or nothing is.
    fn save_entry(&self, entry: VaultEntry) -> Result<VaultEntry>;

    /// All entries owned by the account, oldest first.
    fn entries_for_account(&self, account_id: Uuid) -> Result<Vec<VaultEntry>>;

    /// Look up an entry by id *and* owner in one query.  Returns `None`
    /// both when the id does not exist and when it belongs to another
    /// account — callers cannot tell the two apart.
    fn entry_by_id_and_account(
        &self,
        entry_id: Uuid,
        account_id: Uuid,
    ) -> Result<Option<VaultEntry>>;

    fn delete_entry(&self, entry: &VaultEntry) -> Result<()>;
}

/// In-memory backend used by tests and embeddings that do not need a
/// database on disk.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    accounts: HashMap<Uuid, Account>,
    entries: HashMap<Uuid, VaultEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryInner>> {
        self.inner
            .lock()
            .map_err(|_| VaultError::Storage("memory store lock poisoned".to_string()))
    }
}

impl VaultStore for MemoryStore {
    fn save_account(&self, account: Account) -> Result<Account> {
        let mut inner = self.lock()?;

        let taken = inner
            .accounts
            .values()
            .any(|a| a.handle == account.handle && a.id != account.id);
        if taken {
            return Err(VaultError::DuplicateHandle);
        }

        inner.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    fn find_account_by_handle(&self, handle: &str) -> Result<Option<Account>> {
        let inner = self.lock()?;
        Ok(inner.accounts.values().find(|a| a.handle == handle).cloned())
    }

    fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        let inner = self.lock()?;
        Ok(inner.accounts.get(&id).cloned())
    }

    fn save_entry(&self, entry: VaultEntry) -> Result<VaultEntry> {
        let mut inner = self.lock()?;
        inner.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    fn entries_for_account(&self, account_id: Uuid) -> Result<Vec<VaultEntry>> {
        let inner = self.lock()?;
        let mut entries: Vec<VaultEntry> = inner
            .entries
            .values()
            .filter(|e| e.account_id == account_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.created_at);
        Ok(entries)
    }

    fn entry_by_id_and_account(
        &self,
        entry_id: Uuid,
        account_id: Uuid,
    ) -> Result<Option<VaultEntry>> {
        let inner = self.lock()?;
        Ok(inner
            .entries
            .get(&entry_id)
            .filter(|e| e.account_id == account_id)
            .cloned())
    }

    fn delete_entry(&self, entry: &VaultEntry) -> Result<()> {
        let mut inner = self.lock()?;
        inner.entries.remove(&entry.id);
        Ok(())
    }
}
