//! Account registration and login.
//!
//! Registration computes two independent hashes — one per gate purpose —
//! and login verifies only the login-secret hash.  Master-secret
//! verification happens inside the vault orchestrator, on every sensitive
//! operation.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::crypto::SecretGate;
use crate::errors::{Result, VaultError};
use crate::store::VaultStore;
use crate::vault::entry::{Account, HANDLE_MAX_LEN, HANDLE_MIN_LEN};

/// Account registration and authentication service.
pub struct AccountService {
    store: Arc<dyn VaultStore>,
    login_gate: SecretGate,
    master_gate: SecretGate,
}

impl AccountService {
    /// Build a service from its store and the two purpose-bound gates.
    pub fn new(store: Arc<dyn VaultStore>, login_gate: SecretGate, master_gate: SecretGate) -> Self {
        Self {
            store,
            login_gate,
            master_gate,
        }
    }

    /// Register a new account.
    ///
    /// Both secrets are hashed through their own gate before anything is
    /// persisted; the plaintexts never reach the store.
    pub fn register(
        &self,
        handle: &str,
        login_secret: &str,
        master_secret: &str,
    ) -> Result<Account> {
        validate_handle(handle)?;

        if self.store.find_account_by_handle(handle)?.is_some() {
            return Err(VaultError::DuplicateHandle);
        }

        let login_secret_hash = self.login_gate.hash(login_secret)?;
        let master_secret_hash = self.master_gate.hash(master_secret)?;

        let account = Account {
            id: Uuid::new_v4(),
            handle: handle.to_string(),
            login_secret_hash,
            master_secret_hash,
            created_at: Utc::now(),
        };

        self.store.save_account(account)
    }

    /// Authenticate with handle and login secret.
    ///
    /// An unknown handle and a wrong secret produce the same error kind, so
    /// a caller cannot probe which handles exist.
    pub fn login(&self, handle: &str, login_secret: &str) -> Result<Account> {
        let account = self
            .store
            .find_account_by_handle(handle)?
            .ok_or(VaultError::InvalidCredentials)?;

        if !self
            .login_gate
            .verify(login_secret, &account.login_secret_hash)
        {
            return Err(VaultError::InvalidCredentials);
        }

        Ok(account)
    }
}

/// Validate that an account handle is safe and sensible.
///
/// Allowed: ASCII letters, digits, underscores, hyphens, periods.
/// Length must be between 3 and 50 characters.
pub fn validate_handle(handle: &str) -> Result<()> {
    if handle.len() < HANDLE_MIN_LEN {
        return Err(VaultError::InvalidHandle(format!(
            "handle must be at least {HANDLE_MIN_LEN} characters"
        )));
    }

    if handle.len() > HANDLE_MAX_LEN {
        return Err(VaultError::InvalidHandle(format!(
            "handle cannot exceed {HANDLE_MAX_LEN} characters"
        )));
    }

    if !handle
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.')
    {
        return Err(VaultError::InvalidHandle(format!(
            "handle '{handle}' contains invalid characters — only ASCII letters, digits, underscores, hyphens, and periods are allowed"
        )));
    }

    Ok(())
}
