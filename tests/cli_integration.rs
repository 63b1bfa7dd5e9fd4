//! Integration tests for the PassVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.  The
//! secret prompts all honor environment variables for scripted use, so no
//! interactive input is needed anywhere.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper: get a Command pointing at the passvault binary.
fn passvault() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("passvault").expect("binary should exist")
}

/// Helper: a Command with the database and both secrets pre-wired.
fn passvault_in(tmp: &TempDir, login: &str, master: &str) -> Command {
    let mut cmd = passvault();
    cmd.current_dir(tmp.path())
        .env("PASSVAULT_LOGIN_SECRET", login)
        .env("PASSVAULT_MASTER_SECRET", master)
        .args(["--db", tmp.path().join("vault.db").to_str().unwrap()]);
    cmd
}

#[test]
fn help_flag_shows_usage() {
    passvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dual-secret personal password vault"))
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("delete"));
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
    // Running with no subcommand should show an error or help.
    passvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn register_add_list_show_delete_flow() {
    let tmp = TempDir::new().unwrap();
    let login = "alice-login-secret";
    let master = "alice-master-secret";

    // Register.
    passvault_in(&tmp, login, master)
        .args(["register", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("registered"));

    // Add a credential (inline secret keeps the test non-interactive).
    passvault_in(&tmp, login, master)
        .args(["--handle", "alice", "add", "github", "alice@x", "p@ssw0rd!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("github"));

    // List shows the entry masked — never the plaintext.
    passvault_in(&tmp, login, master)
        .args(["--handle", "alice", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("github"))
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("p@ssw0rd!").not());

    // Grab the entry id from the JSON listing.
    let output = passvault_in(&tmp, login, master)
        .args(["--handle", "alice", "list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let entries: serde_json::Value =
        serde_json::from_slice(&output).expect("list --json should emit valid JSON");
    let entry_id = entries[0]["id"].as_str().expect("entry id").to_string();
    assert_eq!(entries[0]["secret"], "********");

    // Show reveals the plaintext with the right master secret.
    passvault_in(&tmp, login, master)
        .args(["--handle", "alice", "show", &entry_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("p@ssw0rd!"));

    // A wrong master secret is rejected...
    passvault_in(&tmp, login, "wrong-master-secret")
        .args(["--handle", "alice", "show", &entry_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid master secret"));

    // ...and the entry is still retrievable afterwards.
    passvault_in(&tmp, login, master)
        .args(["--handle", "alice", "show", &entry_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("p@ssw0rd!"));

    // Delete, then the entry is gone.
    passvault_in(&tmp, login, master)
        .args(["--handle", "alice", "delete", "--force", &entry_id])
        .assert()
        .success();

    passvault_in(&tmp, login, master)
        .args(["--handle", "alice", "show", &entry_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn duplicate_registration_fails() {
    let tmp = TempDir::new().unwrap();

    passvault_in(&tmp, "some-login-pw", "some-master-pw")
        .args(["register", "taken"])
        .assert()
        .success();

    passvault_in(&tmp, "other-login-pw", "other-master-pw")
        .args(["register", "taken"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already taken"));
}

#[test]
fn wrong_login_secret_is_rejected() {
    let tmp = TempDir::new().unwrap();

    passvault_in(&tmp, "right-login-pw", "some-master-pw")
        .args(["register", "alice"])
        .assert()
        .success();

    passvault_in(&tmp, "wrong-login-pw", "some-master-pw")
        .args(["--handle", "alice", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid handle or login secret"));
}

#[test]
fn short_secrets_are_rejected_at_registration() {
    let tmp = TempDir::new().unwrap();

    passvault_in(&tmp, "short", "long-enough-master")
        .args(["register", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8 characters"));
}
