//! `passvault audit`: display the audit log.
//!
//! Usage:
//!   passvault audit               # show last 50 entries
//!   passvault audit --last 20     # show last 20
//!   passvault audit --since 7d    # entries from last 7 days

use chrono::{TimeDelta, Utc};

use crate::audit::{AuditEntry, AuditLog};
use crate::cli::output;
use crate::cli::{data_dir, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `audit` command.
pub fn execute(cli: &Cli, last: usize, since: Option<&str>) -> Result<()> {
    let dir = data_dir(cli);
    if !dir.is_dir() {
        return Err(PassVaultError::NotInitialized(dir));
    }

    let audit = AuditLog::open(&dir)
        .ok_or_else(|| PassVaultError::AuditError("failed to open audit database".into()))?;

    let since_dt = match since {
        Some(s) => Some(parse_duration(s)?),
        None => None,
    };

    let entries = audit.query(last, since_dt)?;

    if entries.is_empty() {
        output::info("No audit entries found.");
        return Ok(());
    }

    print_audit_table(&entries);

    Ok(())
}

/// Parse a human-friendly duration string like "7d", "24h", "30m".
fn parse_duration(input: &str) -> Result<chrono::DateTime<Utc>> {
    let input = input.trim();

    let invalid = || {
        PassVaultError::CommandFailed(format!(
            "invalid duration '{input}', use a number followed by d, h or m (e.g. 7d)"
        ))
    };

    let split = input.len().checked_sub(1).ok_or_else(invalid)?;
    if !input.is_char_boundary(split) {
        return Err(invalid());
    }
    let (num_str, unit) = input.split_at(split);
    let num: i64 = num_str.parse().map_err(|_| invalid())?;
    if num < 0 {
        return Err(invalid());
    }

    let duration = match unit {
        "d" => TimeDelta::try_days(num),
        "h" => TimeDelta::try_hours(num),
        "m" => TimeDelta::try_minutes(num),
        _ => return Err(invalid()),
    }
    .ok_or_else(invalid)?;

    Utc::now().checked_sub_signed(duration).ok_or_else(invalid)
}

/// Print audit entries in a formatted table.
pub fn print_audit_table(entries: &[AuditEntry]) {
    use comfy_table::{ContentArrangement, Table};
    use console::style;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Operation", "Section", "Account", "Details"]);

    for entry in entries {
        let dash = |v: &Option<String>| v.as_deref().unwrap_or("-").to_string();

        table.add_row(vec![
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            colorize_operation(&entry.operation),
            dash(&entry.section),
            dash(&entry.account),
            dash(&entry.details),
        ]);
    }

    println!(
        "{}",
        style(format!("{} audit entries:", entries.len())).bold()
    );
    println!("{table}");
}

/// Colorize operation names for display.
fn colorize_operation(op: &str) -> String {
    use console::style;

    match op {
        "setup" | "add-section" | "add-account" => style(op).green().to_string(),
        "update-account" | "settings" => style(op).blue().to_string(),
        "remove-section" | "remove-account" => style(op).red().to_string(),
        "unlock-failed" => style(op).yellow().to_string(),
        "export" | "import" => style(op).cyan().to_string(),
        "show" => style(op).magenta().to_string(),
        _ => op.to_string(),
    }
}
