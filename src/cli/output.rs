//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{Account, HistoryEntry, Section};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Mask a secret for display.
pub fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "\u{2022}".repeat(8)
    }
}

/// Print a table of sections (Name, Accounts).
pub fn print_sections_table(sections: &[&Section]) {
    if sections.is_empty() {
        info("No sections found.");
        tip("Run `passvault section add <NAME>` to create one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Section", "Accounts"]);

    for s in sections {
        table.add_row(vec![s.name.clone(), s.accounts.len().to_string()]);
    }

    println!("{table}");
}

/// Print numbered accounts (#, Type, Identifier, Secret, Changes).
///
/// `accounts` pairs each account with its zero-based position so the
/// numbers stay stable when a filter hides some rows.
pub fn print_accounts_table(accounts: &[(usize, &Account)], reveal: bool) {
    if accounts.is_empty() {
        info("No accounts found.");
        tip("Run `passvault add <SECTION> <TYPE> <IDENTIFIER>` to add one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Type", "Identifier", "Secret", "Changes"]);

    for (index, acc) in accounts {
        let secret = if reveal {
            acc.secret.clone()
        } else {
            mask(&acc.secret)
        };
        table.add_row(vec![
            (index + 1).to_string(),
            acc.kind.clone(),
            acc.identifier.clone(),
            secret,
            acc.history.len().to_string(),
        ]);
    }

    println!("{table}");
}

/// Print a secret history, oldest first.
pub fn print_history_table(history: &[HistoryEntry], reveal: bool) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Set at", "Secret"]);

    for (i, entry) in history.iter().enumerate() {
        let secret = if reveal {
            entry.secret.clone()
        } else {
            mask(&entry.secret)
        };
        table.add_row(vec![
            (i + 1).to_string(),
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            secret,
        ]);
    }

    println!("{table}");
}
