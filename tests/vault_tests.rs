//! Integration tests for the PassVault vault module.

use std::fs;
use std::path::Path;

use passvault::errors::PassVaultError;
use passvault::vault::{Settings, VaultState, VaultStore};
use tempfile::TempDir;

const PASSWORD: &str = "Str0ng!Pw";

/// Helper: a fresh temp dir with an initialized (and unlocked) vault.
fn new_vault() -> (TempDir, VaultStore) {
    let dir = TempDir::new().expect("create temp dir");
    let mut store = VaultStore::new(dir.path());
    store.setup(PASSWORD).expect("setup vault");
    (dir, store)
}

fn reopen(dir: &Path) -> VaultStore {
    VaultStore::open(dir, PASSWORD).expect("reopen vault")
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn setup_lock_unlock_lifecycle() {
    let dir = TempDir::new().unwrap();
    let mut store = VaultStore::new(dir.path());
    assert_eq!(store.state(), VaultState::Uninitialized);
    assert!(!store.master_password_exists());

    store.setup(PASSWORD).unwrap();
    assert_eq!(store.state(), VaultState::Unlocked);
    assert!(store.sections().unwrap().is_empty());

    for file in ["master.key", "secret.key", "passwords.enc", "settings.json"] {
        assert!(dir.path().join(file).exists(), "{file} should exist");
    }

    store.lock();
    assert_eq!(store.state(), VaultState::Locked);
    assert!(matches!(store.sections(), Err(PassVaultError::VaultLocked)));

    assert!(!store.unlock("wrong").unwrap());
    assert_eq!(store.state(), VaultState::Locked);

    assert!(store.unlock(PASSWORD).unwrap());
    assert_eq!(store.state(), VaultState::Unlocked);
}

#[test]
fn master_key_never_contains_the_password() {
    let (dir, _store) = new_vault();
    let artifact = fs::read_to_string(dir.path().join("master.key")).unwrap();
    assert!(!artifact.contains(PASSWORD));
}

#[test]
fn unlock_without_vault_returns_false() {
    let dir = TempDir::new().unwrap();
    let mut store = VaultStore::new(dir.path());
    assert!(!store.unlock(PASSWORD).unwrap());
    assert_eq!(store.state(), VaultState::Uninitialized);
}

#[test]
fn open_reports_missing_vault_and_wrong_password() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        VaultStore::open(dir.path(), PASSWORD),
        Err(PassVaultError::NotInitialized(_))
    ));

    let (dir, _store) = new_vault();
    assert!(matches!(
        VaultStore::open(dir.path(), "Wr0ng!Pw"),
        Err(PassVaultError::InvalidCredentials)
    ));
}

#[test]
fn setup_refuses_existing_vault() {
    let (dir, mut store) = new_vault();
    store.add_section("Email").unwrap();
    let before = fs::read(dir.path().join("passwords.enc")).unwrap();

    let mut other = VaultStore::new(dir.path());
    assert!(matches!(
        other.setup("An0ther!Pw"),
        Err(PassVaultError::AlreadyInitialized(_))
    ));

    assert_eq!(fs::read(dir.path().join("passwords.enc")).unwrap(), before);
    assert!(VaultStore::open(dir.path(), PASSWORD).is_ok());
}

#[test]
fn setup_refuses_stray_vault_data() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("passwords.enc"), b"leftover").unwrap();

    let mut store = VaultStore::new(dir.path());
    assert!(matches!(
        store.setup(PASSWORD),
        Err(PassVaultError::AlreadyInitialized(_))
    ));
}

#[test]
fn setup_rejects_weak_password() {
    let dir = TempDir::new().unwrap();
    let mut store = VaultStore::new(dir.path());

    assert!(matches!(
        store.setup("password"),
        Err(PassVaultError::WeakPassword)
    ));
    assert!(!dir.path().join("master.key").exists());
    assert_eq!(store.state(), VaultState::Uninitialized);
}

#[test]
fn master_key_with_bom_still_unlocks() {
    let (dir, _store) = new_vault();
    let path = dir.path().join("master.key");
    let artifact = fs::read_to_string(&path).unwrap();
    fs::write(&path, format!("\u{feff}{artifact}")).unwrap();

    let mut store = VaultStore::new(dir.path());
    assert!(store.unlock(PASSWORD).unwrap());
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn accounts_persist_across_unlocks() {
    let (dir, mut store) = new_vault();
    store.add_section("Email").unwrap();
    let position = store
        .add_account("Email", "Gmail", "a@b.com", "Secr3t!1")
        .unwrap();
    assert_eq!(position, 0);
    drop(store);

    let store = reopen(dir.path());
    let account = store.account("Email", 0).unwrap();
    assert_eq!(account.kind, "Gmail");
    assert_eq!(account.identifier, "a@b.com");
    assert_eq!(account.secret, "Secr3t!1");
    assert_eq!(account.history.len(), 1);
    assert_eq!(account.history[0].secret, "Secr3t!1");
}

#[test]
fn snapshot_on_disk_is_not_plaintext() {
    let (dir, mut store) = new_vault();
    store.add_section("Email").unwrap();
    store
        .add_account("Email", "Gmail", "a@b.com", "Secr3t!1")
        .unwrap();

    let bytes = fs::read(dir.path().join("passwords.enc")).unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(!text.contains("Secr3t!1"));
    assert!(!text.contains("Gmail"));
}

#[test]
fn sections_keep_insertion_order() {
    let (dir, mut store) = new_vault();
    for name in ["Work", "Email", "Banking"] {
        store.add_section(name).unwrap();
    }
    drop(store);

    let store = reopen(dir.path());
    let names: Vec<&str> = store
        .sections()
        .unwrap()
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec!["Work", "Email", "Banking"]);
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[test]
fn history_grows_only_when_secret_changes() {
    let (dir, mut store) = new_vault();
    store.add_section("Email").unwrap();
    store.add_account("Email", "Gmail", "a@b.com", "first!1A").unwrap();

    // Same secret, new identifier: no history entry.
    assert!(!store
        .update_account("Email", 0, "Gmail", "new@b.com", "first!1A")
        .unwrap());
    assert_eq!(store.account("Email", 0).unwrap().history.len(), 1);

    assert!(store
        .update_account("Email", 0, "Gmail", "new@b.com", "second!2B")
        .unwrap());
    drop(store);

    let store = reopen(dir.path());
    let account = store.account("Email", 0).unwrap();
    assert_eq!(account.identifier, "new@b.com");
    assert_eq!(account.secret, "second!2B");
    let secrets: Vec<&str> = account.history.iter().map(|h| h.secret.as_str()).collect();
    assert_eq!(secrets, vec!["first!1A", "second!2B"]);
    assert!(account.history[0].timestamp <= account.history[1].timestamp);
}

// ---------------------------------------------------------------------------
// Sections and accounts
// ---------------------------------------------------------------------------

#[test]
fn duplicate_section_names_ignore_case() {
    let (_dir, mut store) = new_vault();
    store.add_section("Email").unwrap();

    let err = store.add_section("email").unwrap_err();
    assert!(matches!(err, PassVaultError::DuplicateSection(ref name) if name == "Email"));
    assert_eq!(store.sections().unwrap().len(), 1);
}

#[test]
fn blank_section_name_is_rejected() {
    let (_dir, mut store) = new_vault();
    assert!(store.add_section("   ").is_err());
    assert!(store.sections().unwrap().is_empty());
}

#[test]
fn remove_section_and_account() {
    let (dir, mut store) = new_vault();
    store.add_section("Email").unwrap();
    store.add_section("Bank").unwrap();
    store.add_account("Email", "Gmail", "a@b.com", "x").unwrap();
    store.add_account("Email", "Outlook", "c@d.com", "y").unwrap();

    store.remove_account("Email", 0).unwrap();
    store.remove_section("BANK").unwrap();
    drop(store);

    let store = reopen(dir.path());
    assert_eq!(store.sections().unwrap().len(), 1);
    let email = store.section("Email").unwrap();
    assert_eq!(email.accounts.len(), 1);
    assert_eq!(email.accounts[0].kind, "Outlook");
}

#[test]
fn missing_section_and_account_are_errors() {
    let (_dir, mut store) = new_vault();
    store.add_section("Email").unwrap();

    assert!(matches!(
        store.add_account("Nope", "Gmail", "a", "b"),
        Err(PassVaultError::SectionNotFound(_))
    ));
    assert!(matches!(
        store.remove_account("Email", 3),
        Err(PassVaultError::AccountNotFound { index: 4, .. })
    ));
    assert!(matches!(
        store.update_account("Email", 0, "a", "b", "c"),
        Err(PassVaultError::AccountNotFound { .. })
    ));
}

#[test]
fn mutations_while_locked_fail() {
    let (_dir, mut store) = new_vault();
    store.lock();

    assert!(matches!(store.add_section("Email"), Err(PassVaultError::VaultLocked)));
    assert!(matches!(
        store.add_account("Email", "Gmail", "a", "b"),
        Err(PassVaultError::VaultLocked)
    ));
    assert!(matches!(store.remove_section("Email"), Err(PassVaultError::VaultLocked)));
}

// ---------------------------------------------------------------------------
// Damaged or missing files
// ---------------------------------------------------------------------------

#[test]
fn tampered_snapshot_fails_authentication() {
    let (dir, mut store) = new_vault();
    store.add_section("Email").unwrap();
    drop(store);

    let path = dir.path().join("passwords.enc");
    let mut bytes = fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;
    fs::write(&path, bytes).unwrap();

    let mut store = VaultStore::new(dir.path());
    assert!(matches!(
        store.unlock(PASSWORD),
        Err(PassVaultError::AuthenticationFailed)
    ));
    assert_eq!(store.state(), VaultState::Locked);
}

#[test]
fn truncated_snapshot_is_malformed() {
    let (dir, _store) = new_vault();
    fs::write(dir.path().join("passwords.enc"), [0u8; 10]).unwrap();

    let mut store = VaultStore::new(dir.path());
    assert!(matches!(
        store.unlock(PASSWORD),
        Err(PassVaultError::MalformedCiphertext(_))
    ));
}

#[test]
fn missing_secret_key_is_reported() {
    let (dir, _store) = new_vault();
    fs::remove_file(dir.path().join("secret.key")).unwrap();

    let mut store = VaultStore::new(dir.path());
    assert!(matches!(
        store.unlock(PASSWORD),
        Err(PassVaultError::MissingKeyMaterial(_))
    ));
}

#[test]
fn missing_snapshot_opens_empty() {
    let (dir, _store) = new_vault();
    fs::remove_file(dir.path().join("passwords.enc")).unwrap();

    let store = reopen(dir.path());
    assert!(store.sections().unwrap().is_empty());
}

#[test]
fn corrupt_settings_fall_back_to_defaults() {
    let (dir, _store) = new_vault();
    fs::write(dir.path().join("settings.json"), "{ not json").unwrap();

    let store = reopen(dir.path());
    assert_eq!(store.settings(), &Settings::default());
}

#[test]
fn settings_persist() {
    let (dir, mut store) = new_vault();
    store.settings_mut().theme = "dark".into();
    store.settings_mut().set_volume(500);
    store.save_settings().unwrap();
    drop(store);

    let store = reopen(dir.path());
    assert_eq!(store.settings().theme, "dark");
    assert_eq!(store.settings().volume, 100);
}

#[test]
fn save_settings_requires_unlock() {
    let (dir, mut store) = new_vault();
    store.settings_mut().theme = "dark".into();
    store.save_settings().unwrap();
    drop(store);

    let fresh = VaultStore::new(dir.path());
    assert!(matches!(fresh.save_settings(), Err(PassVaultError::VaultLocked)));

    let mut locked = reopen(dir.path());
    locked.lock();
    assert!(matches!(locked.save_settings(), Err(PassVaultError::VaultLocked)));

    assert_eq!(reopen(dir.path()).settings().theme, "dark");
}

// ---------------------------------------------------------------------------
// Durability
// ---------------------------------------------------------------------------

#[test]
fn failed_write_leaves_memory_unchanged() {
    let (dir, mut store) = new_vault();
    store.add_section("Email").unwrap();

    // A non-empty directory in place of the snapshot makes the rename fail.
    let path = dir.path().join("passwords.enc");
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();
    fs::write(path.join("blocker"), b"x").unwrap();

    assert!(store.add_section("Bank").is_err());
    let names: Vec<&str> = store
        .sections()
        .unwrap()
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec!["Email"]);
}

#[test]
fn writes_leave_no_temp_files() {
    let (dir, mut store) = new_vault();
    store.add_section("Email").unwrap();
    store.add_account("Email", "Gmail", "a@b.com", "x").unwrap();

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}
