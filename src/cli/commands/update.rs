//! `passvault update`: edit an account.  Fields not given keep their
//! current value.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{account_index, audit, data_dir, open_vault, Cli};
use crate::config::AppConfig;
use crate::crypto::generate_password;
use crate::errors::{PassVaultError, Result};

/// Field changes requested on the command line.
pub struct AccountChanges<'a> {
    pub kind: Option<&'a str>,
    pub identifier: Option<&'a str>,
    pub secret: Option<&'a str>,
    pub generate: bool,
}

impl AccountChanges<'_> {
    fn is_empty(&self) -> bool {
        self.kind.is_none() && self.identifier.is_none() && self.secret.is_none() && !self.generate
    }
}

/// Execute the `update` command.
pub fn execute(cli: &Cli, section: &str, number: usize, changes: &AccountChanges<'_>) -> Result<()> {
    if changes.is_empty() {
        return Err(PassVaultError::CommandFailed(
            "nothing to update, pass --type, --identifier, --secret or --generate".into(),
        ));
    }

    let index = account_index(number)?;
    let mut store = open_vault(cli)?;

    let section_name = store.section(section)?.name.clone();
    let current = store.account(&section_name, index)?;

    let kind = changes.kind.unwrap_or(&current.kind).to_string();
    let identifier = changes.identifier.unwrap_or(&current.identifier).to_string();
    let secret = if changes.generate {
        let config = AppConfig::load(&data_dir(cli))?;
        generate_password(config.generated_password_length)?
    } else {
        Zeroizing::new(changes.secret.unwrap_or(&current.secret).to_string())
    };

    let secret_changed = store.update_account(&section_name, index, &kind, &identifier, &secret)?;

    let label = store.account(&section_name, index)?.label();
    audit(
        cli,
        "update-account",
        Some(&section_name),
        Some(&label),
        secret_changed.then_some("secret changed"),
    );

    output::success(&format!("Updated #{number} {label} in '{section_name}'"));
    if secret_changed {
        output::info("Previous secret kept in history.");
    }
    if changes.generate {
        println!("{}", secret.as_str());
    }

    Ok(())
}
