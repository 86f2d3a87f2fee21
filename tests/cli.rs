//! Binary smoke tests

use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("domain-toolkit").unwrap();
    cmd.env("DOMAIN_TOOLKIT_STORAGE", "memory")
        .env("DOMAIN_TOOLKIT_API_URL", "http://127.0.0.1:9/api")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_estimate_prints_score_and_value() {
    cli()
        .args(["estimate", "ai.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("100/100"))
        .stdout(predicate::str::contains("$6,000"));
}

#[test]
fn test_estimate_json_output() {
    let output = cli().args(["estimate", "--json", "cloud.io"]).output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["domain"], "cloud.io");
    assert!(parsed[0]["breakdown"]["tld"].is_string());
}

#[test]
fn test_estimate_without_domain_fails() {
    cli()
        .arg("estimate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a domain name"));
}

#[test]
fn test_watch_rejects_script_urls() {
    cli()
        .args(["watch", "?video_url=javascript:alert(1)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid Watch Link"));
}

#[test]
fn test_unknown_command_fails() {
    cli()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown command"));
}

#[test]
fn test_help_lists_commands() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("estimate"))
        .stdout(predicate::str::contains("combine"));
}

#[test]
fn test_check_splits_comma_separated_domains() {
    // nothing listens on the configured backend port, so both checks fail
    cli()
        .args(["check", "first.com,second.io"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 domain(s) could not be checked"));
}
