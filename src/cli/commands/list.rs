//! `passvault list` — display all entries with secrets masked.

use crate::cli::{authenticate, open_services, output, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `list` command.
pub fn execute(cli: &Cli, json: bool) -> Result<()> {
    let services = open_services(cli)?;
    let account = authenticate(cli, &services)?;

    let entries = services.vault.list(account.id)?;

    if json {
        let rendered = serde_json::to_string_pretty(&entries)
            .map_err(|e| VaultError::SerializationError(e.to_string()))?;
        println!("{rendered}");
        return Ok(());
    }

    output::info(&format!("{} — {} entries", account.handle, entries.len()));
    output::print_entries_table(&entries);

    Ok(())
}
