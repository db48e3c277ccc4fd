//! Smoke tests to verify command wiring (no database needed)

use assert_cmd::Command;
use predicates::prelude::*;

fn todoctl() -> Command {
    let mut cmd = Command::cargo_bin("todoctl").unwrap();
    cmd.env_remove("TODOCTL_USER")
        .env_remove("TODOCTL_PASSWORD")
        .env_remove("DATABASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

// === Help ===

#[test]
fn test_top_level_help_lists_commands() {
    todoctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("lists"))
        .stdout(predicate::str::contains("complete-all"))
        .stdout(predicate::str::contains("hash-password"));
}

#[test]
fn test_show_help() {
    todoctl()
        .arg("show")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Todo list ID"));
}

#[test]
fn test_add_help() {
    todoctl()
        .arg("add")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Todo title"));
}

// === Argument validation ===

#[test]
fn test_blank_title_rejected_before_connecting() {
    todoctl()
        .args(["new-list", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title cannot be empty"));
}

#[test]
fn test_overlong_title_rejected() {
    let title = "x".repeat(101);
    todoctl()
        .args(["add", "1", title.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 100 characters"));
}

#[test]
fn test_non_numeric_id_rejected() {
    todoctl().args(["toggle", "abc", "1"]).assert().failure();
}

#[test]
fn test_missing_user_is_reported() {
    todoctl()
        .arg("lists")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TODOCTL_USER"));
}

#[test]
fn test_missing_password_is_reported() {
    todoctl()
        .args(["--user", "admin", "lists"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TODOCTL_PASSWORD"));
}

// === Hashing ===

#[test]
fn test_hash_password_argument() {
    todoctl()
        .args(["hash-password", "secret"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("$argon2id$"));
}

#[test]
fn test_hash_password_stdin() {
    todoctl()
        .arg("hash-password")
        .write_stdin("secret\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("$argon2id$"));
}

#[test]
fn test_hash_password_rejects_empty_stdin() {
    todoctl()
        .arg("hash-password")
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("password cannot be empty"));
}
