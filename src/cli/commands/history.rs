//! `passvault history`: list every secret an account has held.

use console::style;

use crate::cli::output;
use crate::cli::{account_index, open_vault, Cli};
use crate::errors::Result;

/// Execute the `history` command.
pub fn execute(cli: &Cli, section: &str, number: usize, reveal: bool) -> Result<()> {
    let index = account_index(number)?;
    let store = open_vault(cli)?;

    let account = store.account(section, index)?;

    println!("{}", style(account.label()).bold());
    output::print_history_table(&account.history, reveal);
    if !reveal {
        output::tip("Pass --reveal to show the secrets.");
    }

    Ok(())
}
