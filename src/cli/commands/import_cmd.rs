//! `passvault import`: import accounts from a CSV file.
//!
//! The first row is a header.  Recognised columns (any order):
//!
//! | field      | accepted headers                              |
//! |------------|-----------------------------------------------|
//! | section    | `Section`, `Sección`                          |
//! | type       | `Type`, `name`, `Name`, `De qué es la cuenta` |
//! | url        | `url`, `URL`                                  |
//! | identifier | `username`, `Username`, `Email`               |
//! | secret     | `password`, `Password`, `Contraseña`          |
//!
//! Browser password exports (name, url, username, password) and files
//! written by `passvault export` therefore import as-is.

use std::fs;
use std::path::Path;

use zeroize::Zeroize;

use crate::cli::output;
use crate::cli::{audit, open_vault, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::VaultStore;

const SECTION_HEADERS: &[&str] = &["Section", "Sección"];
const TYPE_HEADERS: &[&str] = &["Type", "name", "Name", "De qué es la cuenta"];
const URL_HEADERS: &[&str] = &["url", "URL"];
const IDENTIFIER_HEADERS: &[&str] = &["username", "Username", "Email"];
const SECRET_HEADERS: &[&str] = &["password", "Password", "Contraseña"];

const DEFAULT_SECTION: &str = "Imported";
const DEFAULT_TYPE: &str = "Unknown";
const DEFAULT_IDENTIFIER: &str = "No email";

/// One account read from the CSV file, defaults already applied.
#[derive(Debug, PartialEq, Eq, Zeroize)]
pub struct ImportRecord {
    pub section: String,
    pub kind: String,
    pub identifier: String,
    pub secret: String,
}

/// Column positions resolved from the header row.
struct Columns {
    section: Option<usize>,
    kind: Option<usize>,
    url: Option<usize>,
    identifier: Option<usize>,
    secret: usize,
}

impl Columns {
    fn from_header(header: &csv::StringRecord) -> Result<Self> {
        let find = |names: &[&str]| {
            header
                .iter()
                .position(|h| names.iter().any(|n| *n == h.trim()))
        };

        let secret = find(SECRET_HEADERS).ok_or_else(|| {
            PassVaultError::CommandFailed(
                "CSV header has no password column (password, Password or Contraseña)".into(),
            )
        })?;

        Ok(Self {
            section: find(SECTION_HEADERS),
            kind: find(TYPE_HEADERS),
            url: find(URL_HEADERS),
            identifier: find(IDENTIFIER_HEADERS),
            secret,
        })
    }
}

/// Execute the `import` command.
pub fn execute(cli: &Cli, file: &Path) -> Result<()> {
    if !file.exists() {
        return Err(PassVaultError::CommandFailed(format!(
            "import file not found: {}",
            file.display()
        )));
    }

    let content = fs::read_to_string(file)
        .map_err(|e| PassVaultError::CommandFailed(format!("failed to read file: {e}")))?;
    let mut records = parse_records(&content)?;

    if records.is_empty() {
        output::warning("No accounts with a password found in the import file.");
        return Ok(());
    }

    let mut store = open_vault(cli)?;
    let result = apply(&mut store, &records);
    records.zeroize();
    let (count, created) = result?;

    audit(
        cli,
        "import",
        None,
        None,
        Some(&format!("{count} account(s) from {}", file.display())),
    );

    for name in &created {
        output::info(&format!("  + section '{name}'"));
    }
    output::success(&format!(
        "Imported {count} account(s) from {}",
        file.display()
    ));

    Ok(())
}

/// Turn CSV text into import records.
///
/// Rows whose secret is empty or only whitespace are skipped, as are rows
/// the CSV reader cannot decode.  A leading UTF-8 BOM is ignored.
pub fn parse_records(content: &str) -> Result<Vec<ImportRecord>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let header = reader
        .headers()
        .map_err(|e| PassVaultError::CommandFailed(format!("invalid CSV header: {e}")))?
        .clone();
    if header.iter().all(|h| h.trim().is_empty()) {
        return Ok(Vec::new());
    }
    let columns = Columns::from_header(&header)?;

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                tracing::debug!(row = line + 1, error = %e, "skipping malformed CSV row");
                continue;
            }
        };

        let cell = |index: Option<usize>| -> String {
            index
                .and_then(|i| row.get(i))
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        let secret = row.get(columns.secret).unwrap_or_default().to_string();
        if secret.trim().is_empty() {
            continue;
        }

        let mut section = cell(columns.section);
        if section.is_empty() {
            section = DEFAULT_SECTION.to_string();
        }

        let mut kind = cell(columns.kind);
        if kind.is_empty() {
            kind = cell(columns.url);
        }
        if kind.is_empty() {
            kind = DEFAULT_TYPE.to_string();
        }

        let mut identifier = cell(columns.identifier);
        if identifier.is_empty() {
            identifier = DEFAULT_IDENTIFIER.to_string();
        }

        records.push(ImportRecord {
            section,
            kind,
            identifier,
            secret,
        });
    }

    Ok(records)
}

/// Add every record through the store, creating sections on demand.
/// Returns the number of accounts added and the names of new sections.
fn apply(store: &mut VaultStore, records: &[ImportRecord]) -> Result<(usize, Vec<String>)> {
    let mut created = Vec::new();
    for record in records {
        if !store.sections()?.iter().any(|s| s.name_matches(&record.section)) {
            store.add_section(&record.section)?;
            created.push(record.section.clone());
        }
        store.add_account(&record.section, &record.kind, &record.identifier, &record.secret)?;
    }
    Ok((records.len(), created))
}
