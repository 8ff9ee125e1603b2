//! Integration tests for the PassVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! The master password is supplied through `PASSVAULT_PASSWORD` so no
//! interactive prompt is ever shown.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const PASSWORD: &str = "Str0ng!Pw";

/// Helper: get a Command pointing at the passvault binary.
fn passvault() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("passvault").expect("binary should exist");
    cmd.env_remove("PASSVAULT_DIR")
        .env_remove("PASSVAULT_PASSWORD")
        .env_remove("PASSVAULT_LOG");
    cmd
}

/// Helper: a command bound to `dir` and unlocked with `PASSWORD`.
fn vault_cmd(dir: &TempDir) -> Command {
    let mut cmd = passvault();
    cmd.arg("--data-dir")
        .arg(dir.path())
        .env("PASSVAULT_PASSWORD", PASSWORD);
    cmd
}

/// Helper: initialize a vault with one section and one account.
fn seeded_vault() -> TempDir {
    let tmp = TempDir::new().unwrap();
    vault_cmd(&tmp).arg("init").assert().success();
    vault_cmd(&tmp)
        .args(["section", "add", "Email"])
        .assert()
        .success();
    vault_cmd(&tmp)
        .args(["add", "Email", "Gmail", "a@b.com", "Secr3t!1"])
        .assert()
        .success();
    tmp
}

#[test]
fn help_flag_shows_usage() {
    passvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local encrypted credential vault"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("sections"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn version_flag_shows_version() {
    passvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("passvault"));
}

#[test]
fn no_args_shows_help() {
    passvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn status_on_empty_dir() {
    let tmp = TempDir::new().unwrap();
    passvault()
        .arg("--data-dir")
        .arg(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No vault"));
}

#[test]
fn sections_on_missing_vault_fails() {
    let tmp = TempDir::new().unwrap();
    vault_cmd(&tmp)
        .arg("sections")
        .assert()
        .failure()
        .stderr(predicate::str::contains("passvault init"));
}

#[test]
fn init_rejects_weak_password() {
    let tmp = TempDir::new().unwrap();
    passvault()
        .arg("--data-dir")
        .arg(tmp.path())
        .env("PASSVAULT_PASSWORD", "password")
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("too weak"));

    tmp.child("master.key").assert(predicate::path::missing());
}

#[test]
fn init_creates_vault_files_and_refuses_second_run() {
    let tmp = TempDir::new().unwrap();
    vault_cmd(&tmp).arg("init").assert().success();

    tmp.child("master.key").assert(predicate::path::exists());
    tmp.child("secret.key").assert(predicate::path::exists());
    tmp.child("passwords.enc").assert(predicate::path::exists());
    tmp.child("settings.json").assert(predicate::path::exists());

    vault_cmd(&tmp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn wrong_password_is_rejected() {
    let tmp = seeded_vault();
    passvault()
        .arg("--data-dir")
        .arg(tmp.path())
        .env("PASSVAULT_PASSWORD", "Wr0ng!Pw")
        .arg("sections")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incorrect master password"));
}

#[test]
fn list_masks_and_show_reveals() {
    let tmp = seeded_vault();

    vault_cmd(&tmp)
        .args(["list", "Email"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a@b.com"))
        .stdout(predicate::str::contains("Secr3t!1").not());

    vault_cmd(&tmp)
        .args(["list", "email", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Secr3t!1"));

    vault_cmd(&tmp)
        .args(["show", "Email", "1"])
        .assert()
        .success()
        .stdout("Secr3t!1\n");
}

#[test]
fn duplicate_section_is_rejected() {
    let tmp = seeded_vault();
    vault_cmd(&tmp)
        .args(["section", "add", "EMAIL"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn update_records_history() {
    let tmp = seeded_vault();

    vault_cmd(&tmp)
        .args(["update", "Email", "1", "--secret", "N3w!Secret"])
        .assert()
        .success();

    vault_cmd(&tmp)
        .args(["show", "Email", "1"])
        .assert()
        .success()
        .stdout("N3w!Secret\n");

    vault_cmd(&tmp)
        .args(["history", "Email", "1", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Secr3t!1"))
        .stdout(predicate::str::contains("N3w!Secret"));
}

#[test]
fn remove_account_and_section() {
    let tmp = seeded_vault();

    vault_cmd(&tmp)
        .args(["remove", "Email", "1", "--force"])
        .assert()
        .success();
    vault_cmd(&tmp)
        .args(["show", "Email", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    vault_cmd(&tmp)
        .args(["section", "remove", "Email", "--force"])
        .assert()
        .success();
    vault_cmd(&tmp)
        .args(["list", "Email"])
        .assert()
        .failure();
}

#[test]
fn remove_without_terminal_fails_and_keeps_account() {
    let tmp = seeded_vault();

    vault_cmd(&tmp)
        .args(["remove", "Email", "1"])
        .write_stdin("y\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("confirm prompt"));

    vault_cmd(&tmp)
        .args(["show", "Email", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Secr3t!1"));
}

#[test]
fn export_then_import_into_new_vault() {
    let source = seeded_vault();
    let out = TempDir::new().unwrap();
    let csv = out.child("dump.csv");

    vault_cmd(&source)
        .arg("export")
        .arg(csv.path())
        .assert()
        .success();
    csv.assert(predicate::str::starts_with("Section,Type,Email,Password\r\n"));
    csv.assert(predicate::str::contains("Email,Gmail,a@b.com,Secr3t!1"));

    let target = TempDir::new().unwrap();
    vault_cmd(&target).arg("init").assert().success();
    vault_cmd(&target)
        .arg("import")
        .arg(csv.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 account(s)"));

    vault_cmd(&target)
        .args(["show", "Email", "1"])
        .assert()
        .success()
        .stdout("Secr3t!1\n");
}

#[test]
fn export_refuses_vault_directory() {
    let tmp = seeded_vault();
    vault_cmd(&tmp)
        .arg("export")
        .arg(tmp.path().join("dump.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing"));
}

#[test]
fn generate_prints_password_of_requested_length() {
    let tmp = TempDir::new().unwrap();
    let output = passvault()
        .arg("--data-dir")
        .arg(tmp.path())
        .args(["generate", "--length", "20"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim_end().chars().count(), 20);
}

#[test]
fn generate_rejects_short_length() {
    passvault()
        .args(["generate", "--length", "4"])
        .assert()
        .failure();
}

#[test]
fn settings_set_clamps_volume() {
    let tmp = seeded_vault();
    vault_cmd(&tmp)
        .args(["settings", "set", "--volume", "400", "--theme", "dark"])
        .assert()
        .success();

    tmp.child("settings.json")
        .assert(predicate::str::contains("\"volume\": 100"))
        .assert(predicate::str::contains("\"theme\": \"dark\""));
}

#[test]
fn completions_mention_binary_name() {
    passvault()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("passvault"));
}
