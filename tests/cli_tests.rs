use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn betslip(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("betslip").expect("betslip binary");
    cmd.current_dir(dir)
        .env_remove("BETSLIP_DATABASE")
        .env("RUST_LOG", "error")
        .arg("--database")
        .arg(dir.join("cli.db"));
    cmd
}

fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn codes_lists_the_catalog() {
    let dir = TempDir::new().unwrap();
    betslip(dir.path())
        .arg("codes")
        .assert()
        .success()
        .stdout(predicate::str::contains("selection_distinct"))
        .stdout(predicate::str::contains("Insufficient balance"));
}

#[test]
fn codes_json_has_twelve_entries() {
    let dir = TempDir::new().unwrap();
    let output = betslip(dir.path()).args(["--json", "codes"]).output().unwrap();

    assert!(output.status.success());
    let codes = json_stdout(&output);
    assert_eq!(codes.as_array().unwrap().len(), 12);
    assert_eq!(codes[11]["code"], 11);
    assert_eq!(codes[11]["kind"], "balance_insufficient");
}

#[test]
fn accepted_submit_debits_balance() {
    let dir = TempDir::new().unwrap();
    betslip(dir.path())
        .args(["submit", "--player", "1", "--stake", "10", "--selection", "5@2.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("accepted"));

    let output = betslip(dir.path())
        .args(["--json", "balance", "--player", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(json_stdout(&output)["balance"], "990");
}

#[test]
fn rejected_submit_exits_nonzero_with_messages() {
    let dir = TempDir::new().unwrap();
    betslip(dir.path())
        .args(["submit", "--player", "1", "--stake", "0.1", "--selection", "5@2"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Minimum stake amount is 0.3"));
}

#[test]
fn rejected_submit_json_carries_status_and_body() {
    let dir = TempDir::new().unwrap();
    let output = betslip(dir.path())
        .args([
            "--json",
            "submit",
            "--player",
            "1",
            "--stake",
            "1",
            "--selection",
            "42@2",
            "--selection",
            "42@3",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let payload = json_stdout(&output);
    assert_eq!(payload["status"], 422);
    assert_eq!(payload["response"]["selections"][0]["id"], 42);
    assert_eq!(payload["response"]["selections"][0]["errors"][0]["code"], 8);
}

#[test]
fn malformed_slip_file_is_a_mismatch() {
    let dir = TempDir::new().unwrap();
    let slip = dir.path().join("slip.json");
    fs::write(&slip, r#"{"player_id": 1, "stake_amount": 10}"#).unwrap();

    betslip(dir.path())
        .args(["submit", "--file"])
        .arg(&slip)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Betslip structure mismatch"));
}

#[test]
fn history_lists_each_settlement() {
    let dir = TempDir::new().unwrap();
    for stake in ["100", "50"] {
        betslip(dir.path())
            .args(["submit", "--player", "3", "--stake", stake, "--selection", "1@2"])
            .assert()
            .success();
    }

    let output = betslip(dir.path())
        .args(["--json", "history", "--player", "3"])
        .output()
        .unwrap();
    let payload = json_stdout(&output);
    let transactions = payload["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[1]["amount_before"], "900");
}

#[test]
fn unknown_player_balance_is_reported() {
    let dir = TempDir::new().unwrap();
    betslip(dir.path())
        .args(["balance", "--player", "77"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown player 77"));
}

#[test]
fn invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[limits]\nstake_min = 5\nstake_max = 1\n").unwrap();

    betslip(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("codes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("stake_max"));
}
