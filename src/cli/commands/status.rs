//! `passvault status`: report whether a vault exists, without unlocking it.

use crate::cli::output;
use crate::cli::{data_dir, Cli};
use crate::errors::Result;
use crate::vault::{VaultState, VaultStore};

/// Execute the `status` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let dir = data_dir(cli);
    let store = VaultStore::new(&dir);
    let layout = store.layout();

    output::info(&format!("Data directory: {}", dir.display()));

    match store.state() {
        VaultState::Uninitialized => {
            output::info("No vault has been set up yet.");
            output::tip("Run `passvault init` to create one.");
        }
        VaultState::Locked | VaultState::Unlocked => {
            output::success("Vault initialized (locked).");
            if !layout.secret_key().exists() {
                output::warning("secret.key is missing; the vault cannot be unlocked.");
            }
            if !layout.passwords().exists() {
                output::warning("passwords.enc is missing; the vault will open empty.");
            }
        }
    }

    Ok(())
}
