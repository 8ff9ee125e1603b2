//! `passvault section add|remove`: manage sections.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{audit, open_vault, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute `section add`.
pub fn execute_add(cli: &Cli, name: &str) -> Result<()> {
    let mut store = open_vault(cli)?;
    store.add_section(name)?;

    audit(cli, "add-section", Some(name.trim()), None, None);
    output::success(&format!("Added section '{}'", name.trim()));

    Ok(())
}

/// Execute `section remove`.
pub fn execute_remove(cli: &Cli, name: &str, force: bool) -> Result<()> {
    let mut store = open_vault(cli)?;
    let section = store.section(name)?;
    let section_name = section.name.clone();
    let count = section.accounts.len();

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete section '{section_name}' and its {count} account(s)?"
            ))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    store.remove_section(&section_name)?;

    audit(
        cli,
        "remove-section",
        Some(&section_name),
        None,
        Some(&format!("{count} account(s)")),
    );
    output::success(&format!("Deleted section '{section_name}'"));

    Ok(())
}
