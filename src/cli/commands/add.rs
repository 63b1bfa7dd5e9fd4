//! `passvault add` — encrypt and store a credential.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::{authenticate, open_services, output, prompt_master_secret, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `add` command.
pub fn execute(cli: &Cli, label: &str, username: &str, secret: Option<&str>) -> Result<()> {
    let services = open_services(cli)?;
    let account = authenticate(cli, &services)?;

    // Determine the entry secret from one of three sources.
    let entry_secret = if let Some(v) = secret {
        // Source 1: Inline value on the command line.
        output::warning("Secret provided on command line — it may appear in shell history.");
        Zeroizing::new(v.to_string())
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Zeroizing::new(buf.trim_end().to_string())
    } else {
        // Source 3: Interactive secure prompt (default).
        let value = dialoguer::Password::new()
            .with_prompt(format!("Enter secret for {label}"))
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?;
        Zeroizing::new(value)
    };

    let master_secret = prompt_master_secret()?;

    let view = services
        .vault
        .add(account.id, label, username, &entry_secret, &master_secret)?;

    output::success(&format!(
        "Entry '{}' ({}) added — id {}",
        view.label, view.entry_username, view.id
    ));
    output::tip("Reveal it later with: passvault show <entry-id>");

    Ok(())
}
