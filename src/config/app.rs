use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::hasher::{DEFAULT_GENERATED_LEN, MIN_PASSWORD_LEN};
use crate::errors::{PassVaultError, Result};

/// Tool configuration, loaded from `<data_dir>/passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// How many wrong master passwords are accepted before giving up.
    #[serde(default = "default_max_unlock_attempts")]
    pub max_unlock_attempts: u32,

    /// Length of passwords produced by `generate` and `--generate`.
    #[serde(default = "default_generated_password_length")]
    pub generated_password_length: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_max_unlock_attempts() -> u32 {
    3
}

fn default_generated_password_length() -> usize {
    DEFAULT_GENERATED_LEN
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_unlock_attempts: default_max_unlock_attempts(),
            generated_password_length: default_generated_password_length(),
        }
    }
}

impl AppConfig {
    /// Name of the config file we look for in the data directory.
    pub const FILE_NAME: &'static str = "passvault.toml";

    /// Load config from `<data_dir>/passvault.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed or holds out-of-range
    /// values, an error is returned.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let config: AppConfig = toml::from_str(&contents).map_err(|e| {
            PassVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_unlock_attempts < 1 {
            return Err(PassVaultError::ConfigError(
                "max_unlock_attempts must be at least 1".into(),
            ));
        }
        if self.generated_password_length < MIN_PASSWORD_LEN {
            return Err(PassVaultError::ConfigError(format!(
                "generated_password_length must be at least {MIN_PASSWORD_LEN}"
            )));
        }
        Ok(())
    }
}

/// Default data directory: `$HOME/.passvault` (`USERPROFILE` on Windows).
pub fn default_data_dir() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_or_else(|_| PathBuf::from("."), PathBuf::from)
        .join(".passvault")
}

// ── Tests ────────────────────────────────────────────────────────────
