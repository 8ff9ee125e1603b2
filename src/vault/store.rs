//! High-level vault operations used by CLI commands.
//!
//! `VaultStore` is the only code that touches the vault files.  It owns
//! the vault key and the decrypted section list while unlocked, and
//! writes the complete, re-encrypted snapshot after every mutation.
//!
//! States:
//!
//! ```text
//! Uninitialized --setup--> Unlocked
//! Locked --unlock--> Unlocked --lock--> Locked
//! ```

use std::fs;
use std::path::Path;

use tracing::{debug, info};
use zeroize::{Zeroize, Zeroizing};

use crate::crypto::cipher::CryptoManager;
use crate::crypto::hasher;
use crate::crypto::keys::VaultKey;
use crate::errors::{PassVaultError, Result};

use super::layout::{write_atomic, VaultLayout};
use super::model::{Account, Section};
use super::settings::Settings;

/// Lifecycle state of a vault directory as seen by one `VaultStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultState {
    /// No `master.key` exists yet.
    Uninitialized,
    /// The vault exists but its key is not loaded.
    Locked,
    /// Key loaded and snapshot decrypted in memory.
    Unlocked,
}

/// Key and decrypted snapshot, present only while unlocked.
struct Session {
    crypto: CryptoManager,
    sections: Vec<Section>,
}

/// The main vault handle.  Create one with `VaultStore::new` (then call
/// `setup` or `unlock`) or with `VaultStore::open`.
pub struct VaultStore {
    layout: VaultLayout,
    session: Option<Session>,
    settings: Settings,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction and state transitions
    // ------------------------------------------------------------------

    /// Create a locked handle for the vault in `dir`.  Nothing is read
    /// from disk until `setup` or `unlock` is called.
    pub fn new(dir: &Path) -> Self {
        Self {
            layout: VaultLayout::new(dir),
            session: None,
            settings: Settings::default(),
        }
    }

    /// Open an existing vault and unlock it with `password`.
    ///
    /// Fails with `NotInitialized` when no vault exists in `dir` and with
    /// `InvalidCredentials` when the password is wrong.
    pub fn open(dir: &Path, password: &str) -> Result<Self> {
        let mut store = Self::new(dir);
        if !store.master_password_exists() {
            return Err(PassVaultError::NotInitialized(dir.to_path_buf()));
        }
        if store.unlock(password)? {
            Ok(store)
        } else {
            Err(PassVaultError::InvalidCredentials)
        }
    }

    /// Returns `true` once a master password has been set up.
    pub fn master_password_exists(&self) -> bool {
        self.layout.master_key().exists()
    }

    pub fn state(&self) -> VaultState {
        if self.session.is_some() {
            VaultState::Unlocked
        } else if self.master_password_exists() {
            VaultState::Locked
        } else {
            VaultState::Uninitialized
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.session.is_some()
    }

    /// Initialize a brand-new vault and leave it unlocked.
    ///
    /// Writes the master-password hash, a fresh vault key, an empty
    /// encrypted snapshot and default settings.  Refuses to run when a
    /// vault (or stray vault data) already exists in the directory.
    pub fn setup(&mut self, password: &str) -> Result<()> {
        if self.master_password_exists() || self.layout.passwords().exists() {
            return Err(PassVaultError::AlreadyInitialized(
                self.layout.dir().to_path_buf(),
            ));
        }
        if !hasher::is_strong(password) {
            return Err(PassVaultError::WeakPassword);
        }

        self.layout.ensure_dir()?;

        // secret.key before master.key: the master file marks the vault as
        // initialized, so it must never exist without a key next to it.
        let key = CryptoManager::generate_key();
        key.store(&self.layout.secret_key())?;

        let artifact = hasher::hash_password(password);
        write_atomic(&self.layout.master_key(), artifact.as_bytes())?;

        let crypto = CryptoManager::from_key(key);
        write_snapshot(&self.layout, &crypto, &[])?;

        self.settings = Settings::default();
        self.settings.save(&self.layout.settings())?;

        self.session = Some(Session {
            crypto,
            sections: Vec::new(),
        });

        info!(dir = %self.layout.dir().display(), "vault initialized");
        Ok(())
    }

    /// Verify `password` and, on success, load the key, the snapshot and
    /// the settings.
    ///
    /// Returns `Ok(false)` when no vault exists or the password is wrong;
    /// the store stays as it was.  Missing key material and corrupted or
    /// tampered vault data are errors, never `false`.
    pub fn unlock(&mut self, password: &str) -> Result<bool> {
        let master_path = self.layout.master_key();
        if !master_path.exists() {
            return Ok(false);
        }

        let artifact = fs::read_to_string(&master_path)?;
        let artifact = artifact.trim_start_matches('\u{feff}');
        if !hasher::verify_password(password, artifact) {
            debug!("master password rejected");
            return Ok(false);
        }

        let key = VaultKey::load(&self.layout.secret_key())?;
        let crypto = CryptoManager::from_key(key);
        let sections = read_snapshot(&self.layout, &crypto)?;

        if let Some(mut old) = self.session.take() {
            old.sections.zeroize();
        }
        self.settings = Settings::load_or_default(&self.layout.settings());
        self.session = Some(Session { crypto, sections });

        debug!(dir = %self.layout.dir().display(), "vault unlocked");
        Ok(true)
    }

    /// Drop the key and wipe the decrypted snapshot from memory.
    pub fn lock(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.sections.zeroize();
            debug!("vault locked");
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    /// All sections in order.
    pub fn sections(&self) -> Result<&[Section]> {
        Ok(&self.session()?.sections)
    }

    /// Look up a section by name (case-insensitive).
    pub fn section(&self, name: &str) -> Result<&Section> {
        let index = self.section_index(name)?;
        Ok(&self.session()?.sections[index])
    }

    /// Look up an account by section name and zero-based position.
    pub fn account(&self, section: &str, index: usize) -> Result<&Account> {
        let s = self.section(section)?;
        s.accounts
            .get(index)
            .ok_or_else(|| PassVaultError::AccountNotFound {
                section: s.name.clone(),
                index: index + 1,
            })
    }

    // ------------------------------------------------------------------
    // Mutations (each one is persisted before it returns)
    // ------------------------------------------------------------------

    /// Add an empty section.  Names are unique, ignoring case.
    pub fn add_section(&mut self, name: &str) -> Result<()> {
        let name = validate_section_name(name)?;
        let current = self.sections()?;
        if let Some(existing) = current.iter().find(|s| s.name_matches(name)) {
            return Err(PassVaultError::DuplicateSection(existing.name.clone()));
        }

        let mut next = current.to_vec();
        next.push(Section::new(name));
        self.commit(next)?;

        debug!(section = name, "section added");
        Ok(())
    }

    /// Remove a section together with all of its accounts.
    pub fn remove_section(&mut self, name: &str) -> Result<()> {
        let index = self.section_index(name)?;

        let mut next = self.sections()?.to_vec();
        let mut removed = next.remove(index);
        removed.zeroize();
        self.commit(next)?;

        debug!(section = name, "section removed");
        Ok(())
    }

    /// Append an account to a section.  Returns its zero-based position.
    pub fn add_account(
        &mut self,
        section: &str,
        kind: &str,
        identifier: &str,
        secret: &str,
    ) -> Result<usize> {
        let index = self.section_index(section)?;

        let mut next = self.sections()?.to_vec();
        next[index]
            .accounts
            .push(Account::new(kind, identifier, secret));
        let position = next[index].accounts.len() - 1;
        self.commit(next)?;

        debug!(section, position, "account added");
        Ok(position)
    }

    /// Edit an account.  The secret history grows only when `secret`
    /// differs from the current one.  Returns `true` if it did.
    pub fn update_account(
        &mut self,
        section: &str,
        index: usize,
        kind: &str,
        identifier: &str,
        secret: &str,
    ) -> Result<bool> {
        let s = self.section_index(section)?;
        self.account(section, index)?;

        let mut next = self.sections()?.to_vec();
        let changed = next[s].accounts[index].update(kind, identifier, secret);
        self.commit(next)?;

        debug!(section, index, secret_changed = changed, "account updated");
        Ok(changed)
    }

    /// Remove one account from a section.
    pub fn remove_account(&mut self, section: &str, index: usize) -> Result<()> {
        let s = self.section_index(section)?;
        self.account(section, index)?;

        let mut next = self.sections()?.to_vec();
        let mut removed = next[s].accounts.remove(index);
        removed.zeroize();
        self.commit(next)?;

        debug!(section, index, "account removed");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable access to the settings.  Call `save_settings` to persist.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Persist the settings.  Requires an unlocked store: before unlock
    /// the in-memory settings are defaults, not what is on disk.
    pub fn save_settings(&self) -> Result<()> {
        self.session()?;
        self.layout.ensure_dir()?;
        self.settings.save(&self.layout.settings())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the vault directory.
    pub fn dir(&self) -> &Path {
        self.layout.dir()
    }

    pub fn layout(&self) -> &VaultLayout {
        &self.layout
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(PassVaultError::VaultLocked)
    }

    fn section_index(&self, name: &str) -> Result<usize> {
        self.session()?
            .sections
            .iter()
            .position(|s| s.name_matches(name.trim()))
            .ok_or_else(|| PassVaultError::SectionNotFound(name.to_string()))
    }

    /// Persist `next` and only then make it the in-memory snapshot.
    ///
    /// If the write fails the previous snapshot stays in place, so memory
    /// and disk never disagree.
    fn commit(&mut self, mut next: Vec<Section>) -> Result<()> {
        let session = self.session.as_mut().ok_or(PassVaultError::VaultLocked)?;

        if let Err(e) = write_snapshot(&self.layout, &session.crypto, &next) {
            next.zeroize();
            return Err(e);
        }

        let mut previous = std::mem::replace(&mut session.sections, next);
        previous.zeroize();
        Ok(())
    }
}

impl Drop for VaultStore {
    fn drop(&mut self) {
        self.lock();
    }
}

/// Serialize, encrypt and atomically write the full section list.
fn write_snapshot(layout: &VaultLayout, crypto: &CryptoManager, sections: &[Section]) -> Result<()> {
    let json = Zeroizing::new(
        serde_json::to_string_pretty(sections)
            .map_err(|e| PassVaultError::SerializationError(format!("sections: {e}")))?,
    );
    let blob = crypto.encrypt(&json)?;
    write_atomic(&layout.passwords(), &blob)?;

    debug!(sections = sections.len(), bytes = blob.len(), "snapshot written");
    Ok(())
}

/// Read and decrypt the snapshot.  A missing file is an empty vault.
fn read_snapshot(layout: &VaultLayout, crypto: &CryptoManager) -> Result<Vec<Section>> {
    let path = layout.passwords();
    if !path.exists() {
        debug!("no snapshot on disk, starting empty");
        return Ok(Vec::new());
    }

    let blob = fs::read(&path)?;
    let json = Zeroizing::new(crypto.decrypt(&blob)?);

    serde_json::from_str(&json)
        .map_err(|e| PassVaultError::SerializationError(format!("vault contents: {e}")))
}

/// Section names are trimmed and must not be empty.
fn validate_section_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PassVaultError::CommandFailed(
            "section name cannot be empty".into(),
        ));
    }
    Ok(name)
}
