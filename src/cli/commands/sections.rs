//! `passvault sections`: list sections with their account counts.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;
use crate::vault::Section;

/// Execute the `sections` command.
pub fn execute(cli: &Cli, filter: Option<&str>) -> Result<()> {
    let store = open_vault(cli)?;
    let sections = filter_sections(store.sections()?, filter);

    output::info(&format!("{} section(s)", sections.len()));
    output::print_sections_table(&sections);

    Ok(())
}

/// Keep sections whose name contains `filter`, ignoring case.
pub fn filter_sections<'a>(sections: &'a [Section], filter: Option<&str>) -> Vec<&'a Section> {
    let needle = filter.map(|f| f.trim().to_lowercase()).unwrap_or_default();
    sections
        .iter()
        .filter(|s| needle.is_empty() || s.name.to_lowercase().contains(&needle))
        .collect()
}
