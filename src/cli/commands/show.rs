//! `passvault show`: print one account's current secret to stdout.

use crate::cli::{account_index, audit, open_vault, Cli};
use crate::errors::Result;

/// Execute the `show` command.
pub fn execute(cli: &Cli, section: &str, number: usize) -> Result<()> {
    let index = account_index(number)?;
    let store = open_vault(cli)?;

    let account = store.account(section, index)?;
    println!("{}", account.secret);

    let section_name = &store.section(section)?.name;
    audit(cli, "show", Some(section_name), Some(&account.label()), None);

    Ok(())
}
