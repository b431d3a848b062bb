//! TUI headless smoke tests.
//!
//! `FOLIO_TUI_HEADLESS=1 folio tui` renders one settled frame to stdout
//! instead of taking over the terminal.

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a base command with headless mode and an isolated environment.
fn base_cmd(temp_home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("folio"));
    cmd.env("FOLIO_TUI_HEADLESS", "1");
    cmd.env("HOME", temp_home);
    cmd.env("XDG_DATA_HOME", temp_home.join(".local/share"));
    cmd.env("XDG_CONFIG_HOME", temp_home.join(".config"));
    cmd.env_remove("FOLIO_CONFIG");
    cmd.env("RUST_LOG", "info,folio_term=debug");
    cmd
}

#[test]
fn headless_tui_prints_first_screen() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .arg("tui")
        .assert()
        .success()
        .stdout(contains("~/folio"))
        .stdout(contains("Priyansh Gandharv"))
        .stdout(contains("[ >_ terminal ]"))
        .stdout(contains("BIOS").not());
}

#[test]
fn bare_invocation_defaults_to_tui() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .assert()
        .success()
        .stdout(contains("Full Stack Software Engineer"));
}

#[test]
fn headless_frame_has_fixed_height() {
    let tmp = TempDir::new().unwrap();
    let output = base_cmd(tmp.path()).arg("tui").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), folio_term::HEADLESS_SIZE.1 as usize);
    assert!(
        stdout
            .lines()
            .all(|l| l.chars().count() <= folio_term::HEADLESS_SIZE.0 as usize)
    );
}

#[test]
fn headless_respects_config_overrides() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("folio.toml");
    fs::write(
        &path,
        "[owner]\nname = \"Ada Lovelace\"\nrole = \"Analyst\"\n\n[ui]\nboot = false\n",
    )
    .unwrap();
    base_cmd(tmp.path())
        .arg("--config")
        .arg(&path)
        .arg("tui")
        .assert()
        .success()
        .stdout(contains("Ada Lovelace"))
        .stdout(contains("Analyst"));
}

#[test]
fn headless_tui_logs_to_stderr_not_stdout() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .args(["tui", "-v"])
        .assert()
        .success()
        .stdout(contains("rendering headless frame").not());
}
