//! Integration tests for the `fleetmon` CLI binary.
//!
//! Validate argument parsing, help output, shell completions, config
//! handling, and the validate-before-connect ordering of `assign` — all
//! without a live backend.
#![allow(clippy::unwrap_used)]

use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `fleetmon` binary with env isolation.
///
/// Clears all `FLEET_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn fleetmon_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("fleetmon").unwrap();
    cmd.env("HOME", "/tmp/fleetmon-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/fleetmon-cli-test-nonexistent")
        .env_remove("FLEET_SERVER")
        .env_remove("FLEET_SERVER_URL")
        .env_remove("FLEET_SERVER_TIMEOUT")
        .env_remove("FLEET_OUTPUT")
        .env_remove("FLEET_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = fleetmon_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    fleetmon_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("balises")
            .and(predicate::str::contains("reports"))
            .and(predicate::str::contains("assign"))
            .and(predicate::str::contains("sync")),
    );
}

#[test]
fn test_version_flag() {
    fleetmon_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fleetmon"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    fleetmon_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    fleetmon_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = fleetmon_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_balises_without_server_config() {
    let output = fleetmon_cmd().arg("balises").output().unwrap();
    assert_eq!(output.status.code(), Some(2), "no-server is a usage error");
    let text = combined_output(&output);
    assert!(
        text.contains("server") || text.contains("FLEET_SERVER") || text.contains("config"),
        "Expected pointer at server configuration:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let output = fleetmon_cmd()
        .args(["--output", "invalid", "balises"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

// ── Assignment validation ordering ──────────────────────────────────

#[test]
fn test_assign_cmacgm_without_refs_fails_locally() {
    // No server is configured anywhere, so reaching the network would
    // fail with the no-server error instead — seeing the validation
    // message proves no request was even attempted.
    let output = fleetmon_cmd()
        .args(["assign", "--balise", "12", "--customer", "CMACGM"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("equipment reference") && text.contains("carrier booking reference"),
        "Expected the CMA-CGM field message:\n{text}"
    );
    assert!(
        !text.contains("No backend server"),
        "Validation must run before server resolution:\n{text}"
    );
}

#[test]
fn test_assign_cmacgm_with_one_ref_still_fails_locally() {
    fleetmon_cmd()
        .args([
            "assign",
            "--balise",
            "12",
            "--customer",
            "CMACGM",
            "--equipment-ref",
            "APZU2106333",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("carrier booking reference"));
}

#[test]
fn test_assign_requires_customer_flag() {
    let output = fleetmon_cmd()
        .args(["assign", "--balise", "12"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("--customer"), "Expected clap missing-flag error:\n{text}");
}

#[test]
fn test_assign_rejects_unknown_customer() {
    fleetmon_cmd()
        .args(["assign", "--balise", "12", "--customer", "EVERGREEN"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown customer"));
}

// ── Config commands ─────────────────────────────────────────────────

#[test]
fn test_config_show_without_config_file() {
    // `config show` uses load_config_or_default(), so it succeeds and
    // renders the defaults even with no file on disk.
    fleetmon_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("timeout"));
}

#[test]
fn test_config_path_prints_a_path() {
    fleetmon_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_writes_file() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = assert_cmd::Command::cargo_bin("fleetmon").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("FLEET_SERVER")
        .args([
            "config",
            "init",
            "--server",
            "http://tracker.example.net:6062",
        ])
        .assert()
        .success();
}

// ── Flag parsing ────────────────────────────────────────────────────

#[test]
fn test_global_flags_parse() {
    // All flags parse; the failure must be about the missing server,
    // not about argument syntax.
    let output = fleetmon_cmd()
        .args([
            "--output",
            "json",
            "--verbose",
            "--quiet",
            "--timeout",
            "5",
            "stats",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("server") || text.contains("FLEET_SERVER"),
        "Expected no-server error:\n{text}"
    );
}
