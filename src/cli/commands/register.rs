//! `passvault register` — create a new account with two independent secrets.

use crate::cli::{open_services, output, prompt_new_secret, Cli};
use crate::errors::Result;

/// Execute the `register` command.
pub fn execute(cli: &Cli, handle: &str) -> Result<()> {
    let services = open_services(cli)?;

    let login_secret = prompt_new_secret("login secret", "PASSVAULT_LOGIN_SECRET")?;
    let master_secret = prompt_new_secret("master secret", "PASSVAULT_MASTER_SECRET")?;

    if *login_secret == *master_secret {
        output::warning(
            "Login and master secrets are identical — the two-secret split protects you only if they differ.",
        );
    }

    let account = services
        .accounts
        .register(handle, &login_secret, &master_secret)?;

    output::success(&format!("Account '{}' registered", account.handle));
    output::tip("Keep the master secret safe — entries cannot be decrypted without it.");

    Ok(())
}
