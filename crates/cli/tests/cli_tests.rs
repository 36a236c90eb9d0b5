#![expect(clippy::unwrap_used, reason = "test code")]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Sandbox {
    data: TempDir,
    session: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self { data: TempDir::new().unwrap(), session: TempDir::new().unwrap() }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("quotesync").unwrap();
        cmd.env("QUOTESYNC_DATA_DIR", self.data.path())
            .env("QUOTESYNC_SESSION_DIR", self.session.path())
            .env("RUST_LOG", "warn");
        cmd
    }
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("quotesync").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local quote collection with remote sync"));
}

#[test]
fn test_cli_categories_include_seeds() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Motivation").and(predicate::str::contains("Life")));
}

#[test]
fn test_cli_add_then_list_by_category() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["add", "Ship it anyway", "Work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quote added successfully!"));

    sandbox
        .cmd()
        .args(["list", "--category", "Work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ship it anyway"));
}

#[test]
fn test_cli_add_duplicate_fails() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["add", "Once only", "Work"]).assert().success();
    sandbox
        .cmd()
        .args(["add", "Once only", "Work"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate quote"));
}

#[test]
fn test_cli_export_to_stdout() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["export", "-"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[").and(predicate::str::contains("\"category\"")));
}

#[test]
fn test_cli_import_file() {
    let sandbox = Sandbox::new();
    let file = sandbox.data.path().join("incoming.json");
    std::fs::write(&file, r#"[{"text":"Imported line","category":"Imported"}]"#).unwrap();

    sandbox
        .cmd()
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Added: 1"));

    sandbox.cmd().arg("categories").assert().stdout(predicate::str::contains("Imported"));
}

#[test]
fn test_cli_import_rejects_non_array() {
    let sandbox = Sandbox::new();
    let file = sandbox.data.path().join("bad.json");
    std::fs::write(&file, r#"{"text":"Not a list"}"#).unwrap();

    sandbox
        .cmd()
        .arg("import")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid import file"));
}

#[test]
fn test_cli_sync_failure_is_not_fatal() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("QUOTESYNC_REMOTE_URL", "http://127.0.0.1:9/posts")
        .env("QUOTESYNC_HTTP_TIMEOUT_SECS", "1")
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sync failed"));
}
