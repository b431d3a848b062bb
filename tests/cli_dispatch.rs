//! Subprocess tests for the `folio` binary surface: exec, palette, config,
//! completions, man, and error envelopes.

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a base command with an isolated environment.
fn base_cmd(temp_home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("folio"));
    cmd.env("HOME", temp_home);
    cmd.env("XDG_DATA_HOME", temp_home.join(".local/share"));
    cmd.env("XDG_CONFIG_HOME", temp_home.join(".config"));
    cmd.env_remove("FOLIO_CONFIG");
    cmd.env_remove("FOLIO_LOG");
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    cmd
}

fn write_config(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("folio.toml");
    fs::write(&path, body).expect("write config");
    path
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("run folio");
    assert!(output.status.success(), "folio failed: {output:?}");
    serde_json::from_slice(&output.stdout).expect("valid JSON on stdout")
}

// =============================================================================
// exec
// =============================================================================

#[test]
fn exec_help_lists_commands() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .args(["exec", "help"])
        .assert()
        .success()
        .stdout(contains("visitor@portfolio:~$ help"))
        .stdout(contains("goto [section]"))
        .stdout(contains("close this terminal"));
}

#[test]
fn exec_unknown_command_is_reported_not_fatal() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .args(["exec", "foobar"])
        .assert()
        .success()
        .stdout(contains("command not found: foobar"));
}

#[test]
fn exec_goto_known_and_unknown_sections() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .args(["exec", "goto about", "goto nowhere"])
        .assert()
        .success()
        .stdout(contains("Navigating to #about..."))
        .stdout(contains("Section not found: nowhere"));
}

#[test]
fn exec_escapes_user_input() {
    let tmp = TempDir::new().unwrap();
    let json = stdout_json(base_cmd(tmp.path()).args(["--json", "exec", "<b>hi</b>"]));
    let echo = json["lines"][0]["markup"].as_str().unwrap();
    assert!(echo.contains("&lt;b&gt;hi&lt;/b&gt;"));
    assert!(!echo.contains("<b>"));
}

#[test]
fn exec_json_shape() {
    let tmp = TempDir::new().unwrap();
    let json = stdout_json(base_cmd(tmp.path()).args(["--json", "exec", "about", "goto contact"]));

    let lines = json["lines"].as_array().expect("lines array");
    assert_eq!(lines[0]["kind"], "echo");
    assert_eq!(lines[0]["text"], "visitor@portfolio:~$ about");
    assert!(lines.iter().any(|l| l["kind"] == "output"));
    assert_eq!(json["open"], true);
    assert!(json["scroll_target"].is_u64());
}

#[test]
fn exec_clear_and_exit() {
    let tmp = TempDir::new().unwrap();
    let json = stdout_json(base_cmd(tmp.path()).args(["--json", "exec", "help", "clear", "exit"]));
    let lines = json["lines"].as_array().unwrap();
    // The spacer left by `clear`, then the echo of `exit` and its spacer.
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["text"], "");
    assert_eq!(lines[1]["text"], "visitor@portfolio:~$ exit");
    assert_eq!(lines[2]["text"], "");
    assert_eq!(json["open"], false);
}

#[test]
fn exec_requires_a_line() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path()).arg("exec").assert().code(2);
}

// =============================================================================
// palette
// =============================================================================

#[test]
fn palette_lists_all_entries_without_query() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .arg("palette")
        .assert()
        .success()
        .stdout(contains("> Go to Home"))
        .stdout(contains("Open Terminal CLI"))
        .stdout(contains("Ctrl+T"));
}

#[test]
fn palette_filter_is_case_insensitive() {
    let tmp = TempDir::new().unwrap();
    let json = stdout_json(base_cmd(tmp.path()).args(["palette", "GIT", "--json"]));
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["label"], "Open GitHub");
    assert_eq!(entries[0]["target"], "https://github.com/Rxpriyansh");
    assert_eq!(json["highlighted"], 0);
}

#[test]
fn palette_no_match() {
    let tmp = TempDir::new().unwrap();
    let json = stdout_json(base_cmd(tmp.path()).args(["--json", "palette", "zzz"]));
    assert!(json["entries"].as_array().unwrap().is_empty());
    assert!(json["highlighted"].is_null());

    base_cmd(tmp.path())
        .args(["palette", "zzz"])
        .assert()
        .success()
        .stdout(contains("No matching commands"));
}

// =============================================================================
// config
// =============================================================================

#[test]
fn config_overrides_owner_and_links() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        tmp.path(),
        r#"
[owner]
name = "Ada Lovelace"

[links]
github = "https://github.com/ada"
"#,
    );
    base_cmd(tmp.path())
        .arg("--config")
        .arg(&path)
        .args(["exec", "about", "contact"])
        .assert()
        .success()
        .stdout(contains("ADA LOVELACE"))
        .stdout(contains("@ada"));
}

#[test]
fn config_env_var_is_honoured() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(tmp.path(), "[owner]\nname = \"Grace Hopper\"\n");
    base_cmd(tmp.path())
        .env("FOLIO_CONFIG", &path)
        .args(["exec", "about"])
        .assert()
        .success()
        .stdout(contains("GRACE HOPPER"));
}

#[test]
fn hidden_section_is_not_navigable() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(tmp.path(), "[ui]\nhidden_sections = [\"skills\"]\n");
    base_cmd(tmp.path())
        .arg("--config")
        .arg(&path)
        .args(["exec", "goto skills"])
        .assert()
        .success()
        .stdout(contains("Section not found: skills"));
}

#[test]
fn invalid_config_exits_with_code_3() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(tmp.path(), "[owner]\nname = \"\"\n");
    base_cmd(tmp.path())
        .arg("--config")
        .arg(&path)
        .args(["exec", "help"])
        .assert()
        .code(3)
        .stderr(contains("Validation error"));
}

#[test]
fn malformed_config_json_error_envelope() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(tmp.path(), "[owner\nname = ");
    let output = base_cmd(tmp.path())
        .arg("--config")
        .arg(&path)
        .args(["--json", "palette"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let err: Value = serde_json::from_slice(&output.stderr).expect("JSON error on stderr");
    assert_eq!(err["error"]["kind"], "config");
    assert_eq!(err["error"]["code"], 3);
    assert_eq!(err["error"]["retryable"], false);
}

#[test]
fn config_subcommand_prints_effective_toml() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(contains("[owner]"))
        .stdout(contains("[ui]"))
        .stdout(contains("boot = true"));
}

// =============================================================================
// completions / man / usage
// =============================================================================

#[test]
fn completions_bash() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(contains("folio"))
        .stdout(contains("exec"));
}

#[test]
fn man_page_renders() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .arg("man")
        .assert()
        .success()
        .stdout(contains(".TH"));
}

#[test]
fn unknown_flag_is_usage_error() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .arg("--definitely-not-a-flag")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
}

#[test]
fn help_exits_zero() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("palette"));
}
