//! `passvault init`: set up the master password and create an empty vault.

use crate::cli::output;
use crate::cli::{audit, data_dir, prompt_new_password, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::VaultStore;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let dir = data_dir(cli);
    let mut store = VaultStore::new(&dir);

    // 1. Never overwrite an existing vault.
    if store.master_password_exists() {
        output::tip("Use `passvault sections` to open the existing vault.");
        return Err(PassVaultError::AlreadyInitialized(dir));
    }

    // 2. Prompt for a strong password (with confirmation).
    let password = prompt_new_password()?;

    // 3. Write master.key, secret.key, passwords.enc and settings.json.
    store.setup(&password)?;
    audit(cli, "setup", None, None, Some("vault created"));

    output::success(&format!("Vault created at {}", dir.display()));

    // 4. Show helpful tips.
    output::tip("Run `passvault section add <NAME>` to create a section.");
    output::tip("Run `passvault add <SECTION> <TYPE> <IDENTIFIER>` to store an account.");

    Ok(())
}
