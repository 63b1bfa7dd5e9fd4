//! `passvault show` — reveal one entry's secret.

use crate::cli::{authenticate, open_services, parse_entry_id, prompt_master_secret, Cli};
use crate::errors::Result;

/// Execute the `show` command.
pub fn execute(cli: &Cli, entry_id: &str) -> Result<()> {
    let entry_id = parse_entry_id(entry_id)?;

    let services = open_services(cli)?;
    let account = authenticate(cli, &services)?;

    let master_secret = prompt_master_secret()?;
    let secret = services.vault.show(account.id, entry_id, &master_secret)?;

    // The plaintext goes to stdout and nowhere else.
    println!("{}", secret.as_str());

    Ok(())
}
