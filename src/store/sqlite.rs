//! SQLite-backed persistence.
//!
//! Envelopes are stored as BLOBs — they stay byte buffers inside the
//! system and only become base64 at transport boundaries.  Timestamps are
//! stored as RFC 3339 text, uuids as text.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::errors::{Result, VaultError};
use crate::vault::entry::{Account, VaultEntry};

use super::VaultStore;

/// A `VaultStore` backed by a single SQLite database file.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the schema
    /// exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;

             CREATE TABLE IF NOT EXISTS accounts (
                 id                 TEXT PRIMARY KEY,
                 handle             TEXT NOT NULL UNIQUE,
                 login_secret_hash  TEXT NOT NULL,
                 master_secret_hash TEXT NOT NULL,
                 created_at         TEXT NOT NULL
             );

             CREATE TABLE IF NOT EXISTS vault_entries (
                 id               TEXT PRIMARY KEY,
                 account_id       TEXT NOT NULL REFERENCES accounts(id),
                 label            TEXT NOT NULL,
                 entry_username   TEXT NOT NULL,
                 encrypted_secret BLOB NOT NULL,
                 created_at       TEXT NOT NULL
             );

             CREATE INDEX IF NOT EXISTS idx_entries_account
                 ON vault_entries(account_id);",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| VaultError::Storage("sqlite connection lock poisoned".to_string()))
    }
}

impl VaultStore for SqliteStore {
    fn save_account(&self, account: Account) -> Result<Account> {
        let conn = self.lock()?;

        let result = conn.execute(
            "INSERT INTO accounts (id, handle, login_secret_hash, master_secret_hash, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                account.id.to_string(),
                account.handle,
                account.login_secret_hash,
                account.master_secret_hash,
                account.created_at.to_rfc3339(),
            ],
        );

        match result {
            Ok(_) => Ok(account),
            // The UNIQUE constraint on `handle` is the backstop against a
            // registration race slipping past the service-level check.
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(VaultError::DuplicateHandle)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn find_account_by_handle(&self, handle: &str) -> Result<Option<Account>> {
        let conn = self.lock()?;
        let row: Option<AccountRow> = conn
            .query_row(
                "SELECT id, handle, login_secret_hash, master_secret_hash, created_at
                 FROM accounts WHERE handle = ?1",
                params![handle],
                account_row,
            )
            .optional()?;
        row.map(AccountRow::into_account).transpose()
    }

    fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        let conn = self.lock()?;
        let row: Option<AccountRow> = conn
            .query_row(
                "SELECT id, handle, login_secret_hash, master_secret_hash, created_at
                 FROM accounts WHERE id = ?1",
                params![id.to_string()],
                account_row,
            )
            .optional()?;
        row.map(AccountRow::into_account).transpose()
    }

    fn save_entry(&self, entry: VaultEntry) -> Result<VaultEntry> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO vault_entries
                 (id, account_id, label, entry_username, encrypted_secret, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.id.to_string(),
                entry.account_id.to_string(),
                entry.label,
                entry.entry_username,
                entry.encrypted_secret,
                entry.created_at.to_rfc3339(),
            ],
        )?;
        Ok(entry)
    }

    fn entries_for_account(&self, account_id: Uuid) -> Result<Vec<VaultEntry>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, account_id, label, entry_username, encrypted_secret, created_at
             FROM vault_entries WHERE account_id = ?1 ORDER BY created_at",
        )?;

        let rows = stmt.query_map(params![account_id.to_string()], entry_row)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?.into_entry()?);
        }
        Ok(entries)
    }

    fn entry_by_id_and_account(
        &self,
        entry_id: Uuid,
        account_id: Uuid,
    ) -> Result<Option<VaultEntry>> {
        let conn = self.lock()?;
        let row: Option<EntryRow> = conn
            .query_row(
                "SELECT id, account_id, label, entry_username, encrypted_secret, created_at
                 FROM vault_entries WHERE id = ?1 AND account_id = ?2",
                params![entry_id.to_string(), account_id.to_string()],
                entry_row,
            )
            .optional()?;
        row.map(EntryRow::into_entry).transpose()
    }

    fn delete_entry(&self, entry: &VaultEntry) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "DELETE FROM vault_entries WHERE id = ?1 AND account_id = ?2",
            params![entry.id.to_string(), entry.account_id.to_string()],
        )?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

struct AccountRow {
    id: String,
    handle: String,
    login_secret_hash: String,
    master_secret_hash: String,
    created_at: String,
}

fn account_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AccountRow> {
    Ok(AccountRow {
        id: row.get(0)?,
        handle: row.get(1)?,
        login_secret_hash: row.get(2)?,
        master_secret_hash: row.get(3)?,
        created_at: row.get(4)?,
    })
}

impl AccountRow {
    fn into_account(self) -> Result<Account> {
        Ok(Account {
            id: parse_uuid(&self.id)?,
            handle: self.handle,
            login_secret_hash: self.login_secret_hash,
            master_secret_hash: self.master_secret_hash,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

struct EntryRow {
    id: String,
    account_id: String,
    label: String,
    entry_username: String,
    encrypted_secret: Vec<u8>,
    created_at: String,
}

fn entry_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EntryRow> {
    Ok(EntryRow {
        id: row.get(0)?,
        account_id: row.get(1)?,
        label: row.get(2)?,
        entry_username: row.get(3)?,
        encrypted_secret: row.get(4)?,
        created_at: row.get(5)?,
    })
}

impl EntryRow {
    fn into_entry(self) -> Result<VaultEntry> {
        Ok(VaultEntry {
            id: parse_uuid(&self.id)?,
            account_id: parse_uuid(&self.account_id)?,
            label: self.label,
            entry_username: self.entry_username,
            encrypted_secret: self.encrypted_secret,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

fn parse_uuid(text: &str) -> Result<Uuid> {
    Uuid::parse_str(text).map_err(|e| VaultError::Storage(format!("bad uuid in database: {e}")))
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| VaultError::Storage(format!("bad timestamp in database: {e}")))
}
