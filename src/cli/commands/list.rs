//! `passvault list`: display the accounts of one section in a table.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;
use crate::vault::Account;

/// Execute the `list` command.
pub fn execute(cli: &Cli, section: &str, filter: Option<&str>, reveal: bool) -> Result<()> {
    let store = open_vault(cli)?;
    let section = store.section(section)?;

    let accounts = filter_accounts(&section.accounts, filter);

    output::info(&format!(
        "{}: {} of {} account(s)",
        section.name,
        accounts.len(),
        section.accounts.len()
    ));
    output::print_accounts_table(&accounts, reveal);

    Ok(())
}

/// Keep accounts whose identifier contains `filter`, ignoring case.
/// Each account is paired with its position in the section.
pub fn filter_accounts<'a>(accounts: &'a [Account], filter: Option<&str>) -> Vec<(usize, &'a Account)> {
    let needle = filter.map(|f| f.trim().to_lowercase()).unwrap_or_default();
    accounts
        .iter()
        .enumerate()
        .filter(|(_, a)| needle.is_empty() || a.identifier.to_lowercase().contains(&needle))
        .collect()
}
