//! `passvault export`: write every account to a CSV file.
//!
//! Columns: `Section,Type,Email,Password`, one row per account in vault
//! order.  The file is readable by its owner only.

use std::path::Path;

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{audit, data_dir, open_vault, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::layout::{write_atomic, MASTER_KEY_FILE, PASSWORDS_FILE, SECRET_KEY_FILE, SETTINGS_FILE};
use crate::vault::Section;

/// Header row of an exported file.
pub const EXPORT_HEADER: [&str; 4] = ["Section", "Type", "Email", "Password"];

/// Execute the `export` command.
pub fn execute(cli: &Cli, file: &Path) -> Result<()> {
    check_destination(file, &data_dir(cli))?;

    let store = open_vault(cli)?;
    let sections = store.sections()?;
    let content = format_csv(sections)?;
    let count: usize = sections.iter().map(|s| s.accounts.len()).sum();

    write_atomic(file, &content).map_err(|e| {
        PassVaultError::CommandFailed(format!("failed to write export file: {e}"))
    })?;

    audit(
        cli,
        "export",
        None,
        None,
        Some(&format!("{count} account(s) to {}", file.display())),
    );
    output::success(&format!("Exported {count} account(s) to {}", file.display()));
    output::warning("The export file contains plaintext secrets.");

    Ok(())
}

/// Refuse destinations that would clobber a vault file.
fn check_destination(file: &Path, vault_dir: &Path) -> Result<()> {
    let name = file.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let reserved = [MASTER_KEY_FILE, SECRET_KEY_FILE, PASSWORDS_FILE, SETTINGS_FILE];

    let parent = match file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let in_vault_dir = match (parent.canonicalize(), vault_dir.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };

    if in_vault_dir || reserved.contains(&name) {
        return Err(PassVaultError::CommandFailed(format!(
            "refusing to export over vault data: {}",
            file.display()
        )));
    }
    Ok(())
}

/// Render all accounts as CSV (CRLF line endings, quoting only where
/// needed).
pub fn format_csv(sections: &[Section]) -> Result<Zeroizing<Vec<u8>>> {
    let mut out = Zeroizing::new(Vec::new());
    {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(&mut *out);

        writer.write_record(EXPORT_HEADER).map_err(csv_error)?;
        for section in sections {
            for account in &section.accounts {
                writer
                    .write_record([
                        section.name.as_str(),
                        account.kind.as_str(),
                        account.identifier.as_str(),
                        account.secret.as_str(),
                    ])
                    .map_err(csv_error)?;
            }
        }
        writer.flush()?;
    }
    Ok(out)
}

fn csv_error(e: csv::Error) -> PassVaultError {
    PassVaultError::CommandFailed(format!("failed to write CSV: {e}"))
}
