//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::{default_data_dir, AppConfig};
use crate::crypto::hasher;
use crate::errors::{PassVaultError, Result};
use crate::vault::VaultStore;

/// Environment variable holding the master password for scripted use.
pub const PASSWORD_ENV: &str = "PASSVAULT_PASSWORD";

/// PassVault CLI: local encrypted credential vault.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Local encrypted credential vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault data directory (default: ~/.passvault)
    #[arg(long, env = "PASSVAULT_DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Set up the master password and create an empty vault
    Init,

    /// Show whether a vault exists in the data directory
    Status,

    /// List sections
    Sections {
        /// Only show sections whose name contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Manage sections (add, remove)
    Section {
        #[command(subcommand)]
        action: SectionAction,
    },

    /// List the accounts in a section
    List {
        /// Section name
        section: String,
        /// Only show accounts whose identifier contains this text
        #[arg(short, long)]
        filter: Option<String>,
        /// Show secrets instead of masking them
        #[arg(long)]
        reveal: bool,
    },

    /// Add an account to a section
    Add {
        /// Section name
        section: String,
        /// What the account is for (e.g. Gmail)
        #[arg(value_name = "TYPE")]
        kind: String,
        /// Login name or e-mail address
        identifier: String,
        /// Secret (omit for interactive prompt)
        secret: Option<String>,
        /// Generate a strong random secret
        #[arg(short, long, conflicts_with = "secret")]
        generate: bool,
    },

    /// Edit an account (history grows only when the secret changes)
    Update {
        /// Section name
        section: String,
        /// Account number as shown by `list`
        number: usize,
        /// New account type
        #[arg(long = "type")]
        kind: Option<String>,
        /// New identifier
        #[arg(long)]
        identifier: Option<String>,
        /// New secret
        #[arg(long)]
        secret: Option<String>,
        /// Replace the secret with a generated one
        #[arg(short, long, conflicts_with = "secret")]
        generate: bool,
    },

    /// Remove an account
    Remove {
        /// Section name
        section: String,
        /// Account number as shown by `list`
        number: usize,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Print an account's current secret
    Show {
        /// Section name
        section: String,
        /// Account number as shown by `list`
        number: usize,
    },

    /// Show every secret an account has held
    History {
        /// Section name
        section: String,
        /// Account number as shown by `list`
        number: usize,
        /// Show secrets instead of masking them
        #[arg(long)]
        reveal: bool,
    },

    /// Generate a strong random password
    Generate {
        /// Password length (default from passvault.toml, else 16)
        #[arg(short, long)]
        length: Option<usize>,
    },

    /// Import accounts from a CSV file
    Import {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// Export all accounts to a CSV file
    Export {
        /// Destination CSV file
        file: PathBuf,
    },

    /// View or change user preferences
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

/// Section subcommands.
#[derive(clap::Subcommand)]
pub enum SectionAction {
    /// Create a new, empty section
    Add {
        /// Section name (unique, case-insensitive)
        name: String,
    },

    /// Delete a section and every account in it
    Remove {
        /// Section name
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Settings subcommands.
#[derive(clap::Subcommand)]
pub enum SettingsAction {
    /// Print the current preferences
    Show,

    /// Change one or more preferences
    Set {
        /// Theme key
        #[arg(long)]
        theme: Option<String>,
        /// Volume, 0-100
        #[arg(long)]
        volume: Option<u32>,
        /// Enable or disable music
        #[arg(long)]
        music_enabled: Option<bool>,
        /// Whether music is playing
        #[arg(long)]
        music_playing: Option<bool>,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the vault data directory from `--data-dir` / `PASSVAULT_DIR`,
/// falling back to `~/.passvault`.
pub fn data_dir(cli: &Cli) -> PathBuf {
    cli.data_dir.clone().unwrap_or_else(default_data_dir)
}

/// Read the master password from `PASSVAULT_PASSWORD`, if set.
fn password_from_env() -> Option<Zeroizing<String>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

/// Get the master password, trying in order:
/// 1. `PASSVAULT_PASSWORD` env var (scripts)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Master password")
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used during `init`).
///
/// Also respects `PASSVAULT_PASSWORD`.  Keeps asking until the password
/// passes the strength policy; a weak password from the environment is
/// an error.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        if !hasher::is_strong(&pw) {
            return Err(PassVaultError::WeakPassword);
        }
        return Ok(pw);
    }

    loop {
        let password = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Choose master password")
                .with_confirmation(
                    "Confirm master password",
                    "Passwords do not match, try again",
                )
                .interact()
                .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?,
        );

        if !hasher::is_strong(&password) {
            output::warning(&PassVaultError::WeakPassword.to_string());
            continue;
        }

        return Ok(password);
    }
}

/// Prompt for an account secret (hidden input, confirmed).
pub fn prompt_secret() -> Result<Zeroizing<String>> {
    let secret = dialoguer::Password::new()
        .with_prompt("Secret")
        .with_confirmation("Confirm secret", "Secrets do not match, try again")
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("secret prompt: {e}")))?;
    Ok(Zeroizing::new(secret))
}

/// Unlock the vault in the data directory.
///
/// Interactive unlock allows `max_unlock_attempts` tries (default 3).
/// A password taken from the environment gets exactly one.  A wrong
/// password and a damaged vault are reported differently: only the
/// former is retried.
pub fn open_vault(cli: &Cli) -> Result<VaultStore> {
    let dir = data_dir(cli);
    let mut store = VaultStore::new(&dir);

    if !store.master_password_exists() {
        return Err(PassVaultError::NotInitialized(dir));
    }

    let config = AppConfig::load(&dir)?;
    let scripted = password_from_env().is_some();
    let max_attempts = if scripted { 1 } else { config.max_unlock_attempts };

    for attempt in 1..=max_attempts {
        let password = prompt_password()?;
        if store.unlock(&password)? {
            audit(cli, "unlock", None, None, None);
            return Ok(store);
        }

        audit(cli, "unlock-failed", None, None, None);
        if scripted {
            return Err(PassVaultError::InvalidCredentials);
        }

        let remaining = max_attempts - attempt;
        if remaining > 0 {
            output::warning(&format!(
                "Incorrect password. {remaining} attempt(s) remaining."
            ));
        }
    }

    Err(PassVaultError::TooManyAttempts(max_attempts))
}

/// Convert a 1-based account number from the command line to an index.
pub fn account_index(number: usize) -> Result<usize> {
    number
        .checked_sub(1)
        .ok_or_else(|| PassVaultError::CommandFailed("account numbers start at 1".into()))
}

/// Record an audit event (no-op without the `audit-log` feature).
pub fn audit(
    cli: &Cli,
    op: &str,
    section: Option<&str>,
    account: Option<&str>,
    details: Option<&str>,
) {
    #[cfg(feature = "audit-log")]
    crate::audit::log_audit(&data_dir(cli), op, section, account, details);

    #[cfg(not(feature = "audit-log"))]
    let _ = (cli, op, section, account, details);
}
