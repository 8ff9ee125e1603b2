//! `passvault remove`: delete an account from a section.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{account_index, audit, open_vault, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `remove` command.
pub fn execute(cli: &Cli, section: &str, number: usize, force: bool) -> Result<()> {
    let index = account_index(number)?;
    let mut store = open_vault(cli)?;

    let section_name = store.section(section)?.name.clone();
    let label = store.account(&section_name, index)?.label();

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete #{number} {label} from '{section_name}'?"))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    store.remove_account(&section_name, index)?;

    audit(cli, "remove-account", Some(&section_name), Some(&label), None);
    output::success(&format!("Deleted {label} from '{section_name}'"));

    Ok(())
}
