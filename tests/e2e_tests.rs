//! End-to-end tests for the wheel binary
//!
//! These tests verify:
//! - Exit codes and error lines for fatal startup failures
//! - `--version` and `--debug` handling
//! - The update advisory against a mock registry
//!
//! A fake `node` script is placed first on PATH so results do not depend
//! on the host's Node.js installation.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use assert_cmd::Command;
use mockito::Server;
use predicates::prelude::*;
use tempfile::TempDir;

/// Directory holding a fake `node` that reports `version`
fn fake_node(version: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let script = dir.path().join("node");
    fs::write(&script, format!("#!/bin/sh\necho v{}\n", version)).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    dir
}

/// Command with a controlled PATH, HOME and environment
fn wheel(node_dir: &Path, home: &Path) -> Command {
    let path = format!(
        "{}:{}",
        node_dir.display(),
        std::env::var("PATH").unwrap_or_default()
    );
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_wheel"));
    cmd.env("PATH", path)
        .env("HOME", home)
        .env("NO_COLOR", "1")
        .env("WHEEL_NO_UPDATE_CHECK", "1")
        .env_remove("CLICOLOR_FORCE")
        .env_remove("LOG_LEVEL")
        .env_remove("CLI_HOME")
        .env_remove("WHEEL_REGISTRY")
        .env_remove("SUDO_UID")
        .env_remove("SUDO_GID");
    cmd
}

#[test]
fn test_version_flag_prints_version() {
    let node = fake_node("18.19.0");
    let home = tempfile::tempdir().unwrap();

    wheel(node.path(), home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_startup_logs_current_version() {
    let node = fake_node("18.19.0");
    let home = tempfile::tempdir().unwrap();

    wheel(node.path(), home.path())
        .assert()
        .success()
        .stderr(predicate::str::contains(format!(
            "wheel info current version: {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_old_node_fails_with_both_versions() {
    let node = fake_node("10.0.0");
    let home = tempfile::tempdir().unwrap();

    wheel(node.path(), home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("ERR!"))
        .stderr(predicate::str::contains("12.0.0"))
        .stderr(predicate::str::contains("10.0.0"));
}

#[test]
fn test_missing_home_fails() {
    let node = fake_node("18.19.0");
    let home = tempfile::tempdir().unwrap();
    let missing = home.path().join("does-not-exist");

    wheel(node.path(), &missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("home directory does not exist"));
}

#[test]
fn test_debug_flag_enables_verbose_logs() {
    let node = fake_node("18.19.0");
    let home = tempfile::tempdir().unwrap();

    wheel(node.path(), home.path())
        .args(["init", "--debug"])
        .assert()
        .success()
        .stderr(predicate::str::contains("wheel verb startup complete"));

    wheel(node.path(), home.path())
        .arg("init")
        .assert()
        .success()
        .stderr(predicate::str::contains("verb").not());
}

#[test]
fn test_update_advisory_warns_about_newer_release() {
    let node = fake_node("18.19.0");
    let home = tempfile::tempdir().unwrap();
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/@wheel-cli%2Fcore")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"versions": {"1.0.0": {}, "99.0.0": {}, "not-a-version": {}}}"#)
        .create();

    wheel(node.path(), home.path())
        .env_remove("WHEEL_NO_UPDATE_CHECK")
        .env("WHEEL_REGISTRY", server.url())
        .assert()
        .success()
        .stderr(predicate::str::contains("WARN"))
        .stderr(predicate::str::contains("latest version: 99.0.0"))
        .stderr(predicate::str::contains("npm install -g @wheel-cli/core"));
}

#[test]
fn test_unreachable_registry_does_not_fail_startup() {
    let node = fake_node("18.19.0");
    let home = tempfile::tempdir().unwrap();

    wheel(node.path(), home.path())
        .env_remove("WHEEL_NO_UPDATE_CHECK")
        .env("WHEEL_REGISTRY", "http://127.0.0.1:1")
        .assert()
        .success()
        .stderr(predicate::str::contains("WARN").not());
}

#[test]
fn test_unknown_registry_name_is_a_config_error() {
    let node = fake_node("18.19.0");
    let home = tempfile::tempdir().unwrap();

    wheel(node.path(), home.path())
        .env("WHEEL_REGISTRY", "not-a-mirror")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown registry mirror"));
}
