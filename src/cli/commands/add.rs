//! `passvault add`: store a new account in a section.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{audit, data_dir, open_vault, prompt_secret, Cli};
use crate::config::AppConfig;
use crate::crypto::generate_password;
use crate::errors::Result;

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    section: &str,
    kind: &str,
    identifier: &str,
    secret: Option<&str>,
    generate: bool,
) -> Result<()> {
    let mut store = open_vault(cli)?;
    // Fail on an unknown section before prompting for a secret.
    let section_name = store.section(section)?.name.clone();

    let secret = match secret {
        Some(s) => Zeroizing::new(s.to_string()),
        None if generate => {
            let config = AppConfig::load(&data_dir(cli))?;
            generate_password(config.generated_password_length)?
        }
        None => prompt_secret()?,
    };

    let position = store.add_account(&section_name, kind, identifier, &secret)?;

    let label = store.account(&section_name, position)?.label();
    audit(cli, "add-account", Some(&section_name), Some(&label), None);

    output::success(&format!(
        "Added #{} {} to '{}'",
        position + 1,
        label,
        section_name
    ));
    if generate {
        println!("{}", secret.as_str());
    }

    Ok(())
}
