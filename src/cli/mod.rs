//! CLI module — Clap argument parser, prompt helpers, and command implementations.

pub mod commands;
pub mod output;

use std::sync::Arc;

use clap::Parser;
use zeroize::Zeroizing;

use crate::auth::AccountService;
use crate::config::Settings;
use crate::crypto::{SecretGate, SecretPurpose};
use crate::errors::{Result, VaultError};
use crate::store::{SqliteStore, VaultStore};
use crate::vault::entry::Account;
use crate::vault::VaultService;

/// Minimum secret length to prevent trivially weak secrets.
const MIN_SECRET_LEN: usize = 8;

/// PassVault CLI: dual-secret personal password vault.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Dual-secret personal password vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Account handle to operate as
    #[arg(long, global = true, env = "PASSVAULT_HANDLE")]
    pub handle: Option<String>,

    /// Path to the vault database (overrides passvault.toml)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Register a new account with independent login and master secrets
    Register {
        /// Account handle (3-50 characters)
        handle: String,
    },

    /// Encrypt and store a credential
    Add {
        /// Target application or site name (e.g. github)
        label: String,
        /// The credential's username at that target
        username: String,
        /// Secret value (omit for interactive prompt)
        secret: Option<String>,
    },

    /// List all entries (secrets masked)
    List {
        /// Print the masked entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reveal one entry's secret (requires the master secret)
    Show {
        /// Entry id (from `passvault list`)
        entry_id: String,
    },

    /// Delete an entry
    Delete {
        /// Entry id (from `passvault list`)
        entry_id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Service wiring
// ---------------------------------------------------------------------------

/// The wired-up service stack behind every command.
pub struct Services {
    pub accounts: AccountService,
    pub vault: VaultService,
}

/// Load settings, open the database, and construct the services with their
/// collaborators passed in explicitly.
pub fn open_services(cli: &Cli) -> Result<Services> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;

    let db_path = cli.db.clone().unwrap_or_else(|| settings.db_path.clone());
    let store: Arc<dyn VaultStore> = Arc::new(SqliteStore::open(db_path)?);

    let login_gate = SecretGate::with_params(SecretPurpose::Login, settings.gate_params());
    let master_gate = SecretGate::with_params(SecretPurpose::Master, settings.gate_params());

    Ok(Services {
        accounts: AccountService::new(Arc::clone(&store), login_gate, master_gate.clone()),
        vault: VaultService::new(store, master_gate),
    })
}

/// Authenticate the caller (handle + login secret) and return their account.
///
/// Every command except `register` goes through this; the vault services
/// themselves trust the returned account id.
pub fn authenticate(cli: &Cli, services: &Services) -> Result<Account> {
    let handle = require_handle(cli)?;
    let login_secret = prompt_login_secret()?;
    services.accounts.login(handle, &login_secret)
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// The handle this invocation operates as.
pub fn require_handle(cli: &Cli) -> Result<&str> {
    cli.handle.as_deref().ok_or_else(|| {
        VaultError::CommandFailed(
            "no handle given — pass --handle or set PASSVAULT_HANDLE".to_string(),
        )
    })
}

/// Read the login secret, trying `PASSVAULT_LOGIN_SECRET` first (CI/scripted
/// use), then an interactive prompt.
///
/// Returns `Zeroizing<String>` so the secret is wiped from memory on drop.
pub fn prompt_login_secret() -> Result<Zeroizing<String>> {
    env_or_prompt("PASSVAULT_LOGIN_SECRET", "Enter login secret")
}

/// Read the master secret, trying `PASSVAULT_MASTER_SECRET` first, then an
/// interactive prompt.
///
/// Returns `Zeroizing<String>` so the secret is wiped from memory on drop.
pub fn prompt_master_secret() -> Result<Zeroizing<String>> {
    env_or_prompt("PASSVAULT_MASTER_SECRET", "Enter master secret")
}

fn env_or_prompt(var: &str, prompt: &str) -> Result<Zeroizing<String>> {
    if let Ok(value) = std::env::var(var) {
        if !value.is_empty() {
            return Ok(Zeroizing::new(value));
        }
    }

    let value = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("secret prompt: {e}")))?;
    Ok(Zeroizing::new(value))
}

/// Prompt for a new secret with confirmation (used during `register`).
///
/// Also respects the given env var for scripted usage.  Enforces a minimum
/// secret length either way.
pub fn prompt_new_secret(label: &str, var: &str) -> Result<Zeroizing<String>> {
    if let Ok(value) = std::env::var(var) {
        if !value.is_empty() {
            if value.len() < MIN_SECRET_LEN {
                return Err(VaultError::CommandFailed(format!(
                    "{label} must be at least {MIN_SECRET_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(value));
        }
    }

    loop {
        let secret = dialoguer::Password::new()
            .with_prompt(format!("Choose {label}"))
            .with_confirmation(format!("Confirm {label}"), "Secrets do not match, try again")
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("secret prompt: {e}")))?;

        if secret.len() < MIN_SECRET_LEN {
            output::warning(&format!(
                "The {label} must be at least {MIN_SECRET_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(secret));
    }
}

/// Parse a CLI entry-id argument.
pub fn parse_entry_id(raw: &str) -> Result<uuid::Uuid> {
    uuid::Uuid::parse_str(raw)
        .map_err(|_| VaultError::CommandFailed(format!("'{raw}' is not a valid entry id")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_entry_ids() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(parse_entry_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn rejects_bad_entry_ids() {
        assert!(parse_entry_id("").is_err());
        assert!(parse_entry_id("42").is_err());
        assert!(parse_entry_id("not-a-uuid").is_err());
    }
}
