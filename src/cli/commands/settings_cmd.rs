//! `passvault settings show|set`: view or change user preferences.

use crate::cli::output;
use crate::cli::{audit, open_vault, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::Settings;

/// Execute `settings show`.
pub fn execute_show(cli: &Cli) -> Result<()> {
    let store = open_vault(cli)?;
    print_settings(store.settings());
    Ok(())
}

/// Requested preference changes.
#[derive(Debug, Default)]
pub struct SettingsChanges<'a> {
    pub theme: Option<&'a str>,
    pub volume: Option<u32>,
    pub music_enabled: Option<bool>,
    pub music_playing: Option<bool>,
}

impl SettingsChanges<'_> {
    /// Apply the changes.  Returns `false` if nothing was requested.
    pub fn apply(&self, settings: &mut Settings) -> bool {
        let mut touched = false;
        if let Some(theme) = self.theme {
            settings.theme = theme.to_string();
            touched = true;
        }
        if let Some(volume) = self.volume {
            settings.set_volume(volume);
            touched = true;
        }
        if let Some(enabled) = self.music_enabled {
            settings.music_enabled = enabled;
            touched = true;
        }
        if let Some(playing) = self.music_playing {
            settings.music_playing = playing;
            touched = true;
        }
        touched
    }
}

/// Execute `settings set`.
pub fn execute_set(cli: &Cli, changes: &SettingsChanges<'_>) -> Result<()> {
    let mut store = open_vault(cli)?;

    if !changes.apply(store.settings_mut()) {
        return Err(PassVaultError::CommandFailed(
            "nothing to change, pass --theme, --volume, --music-enabled or --music-playing".into(),
        ));
    }
    store.save_settings()?;

    audit(cli, "settings", None, None, None);
    output::success("Settings saved.");
    print_settings(store.settings());

    Ok(())
}

fn print_settings(settings: &Settings) {
    println!("theme          {}", settings.theme);
    println!("music_enabled  {}", settings.music_enabled);
    println!("volume         {}", settings.volume);
    println!("music_playing  {}", settings.music_playing);
}
