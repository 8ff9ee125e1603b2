//! User preferences stored in plaintext next to the vault.
//!
//! Settings are not security sensitive.  A missing or unreadable
//! `settings.json` never blocks an unlock: defaults are used instead.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use super::layout::write_atomic;
use crate::errors::{PassVaultError, Result};

/// Highest accepted volume.
pub const MAX_VOLUME: u8 = 100;

/// Preferences record persisted as `settings.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Theme key (e.g. "default").
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_true")]
    pub music_enabled: bool,

    /// 0–100.  Out-of-range values on disk are clamped, not rejected.
    #[serde(default = "default_volume", deserialize_with = "deserialize_volume")]
    pub volume: u8,

    #[serde(default = "default_true")]
    pub music_playing: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_theme() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

fn default_volume() -> u8 {
    3
}

fn deserialize_volume<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    i64::deserialize(deserializer).map(clamp_volume)
}

fn clamp_volume(volume: i64) -> u8 {
    u8::try_from(volume.clamp(0, i64::from(MAX_VOLUME))).unwrap_or(MAX_VOLUME)
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            music_enabled: true,
            volume: default_volume(),
            music_playing: true,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when the file
    /// is missing or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|contents| {
                serde_json::from_str::<Settings>(&contents).map_err(|e| e.to_string())
            });

        match parsed {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable settings, using defaults");
                Self::default()
            }
        }
    }

    /// Write settings to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PassVaultError::SerializationError(format!("settings: {e}")))?;
        write_atomic(path, json.as_bytes())
    }

    /// Set the volume, clamped to 0–100.
    pub fn set_volume(&mut self, volume: u32) {
        self.volume = clamp_volume(i64::from(volume));
    }
}

// ── Tests ────────────────────────────────────────────────────────────
