//! `passvault delete` — remove an entry after an ownership check.

use crate::cli::{authenticate, open_services, output, parse_entry_id, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, entry_id: &str, force: bool) -> Result<()> {
    let entry_id = parse_entry_id(entry_id)?;

    let services = open_services(cli)?;
    let account = authenticate(cli, &services)?;

    if !force {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete entry {entry_id}? This cannot be undone"))
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            return Err(VaultError::UserCancelled);
        }
    }

    services.vault.delete(account.id, entry_id)?;

    output::success("Entry deleted");

    Ok(())
}
