// End-to-end CLI tests against a temporary SQLite database

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use std::fs;

fn setup_test_env() -> (TempDir, std::sync::MutexGuard<'static, ()>) {
    let guard = test_env::lock_test_env();
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let config_dir = temp_dir.path().join(".leadboard");
    fs::create_dir_all(&config_dir).unwrap();
    let config_file = config_dir.join("rc");
    fs::write(&config_file, format!("data.location={}\n", db_path.display())).unwrap();
    std::env::set_var("HOME", temp_dir.path().to_str().unwrap());
    (temp_dir, guard)
}

fn lead_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("leadboard").unwrap();
    cmd.env("HOME", temp_dir.path());
    cmd
}

#[test]
fn test_add_and_list() {
    let (temp_dir, _guard) = setup_test_env();

    lead_cmd(&temp_dir)
        .args(["add", "Acme intro", "--company", "Acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created lead 1"))
        .stdout(predicate::str::contains("New Lead"));

    lead_cmd(&temp_dir)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme intro"))
        .stdout(predicate::str::contains("Acme"))
        .stdout(predicate::str::contains("New Lead"));

    drop(temp_dir);
}

#[test]
fn test_add_with_initial_stage() {
    let (temp_dir, _guard) = setup_test_env();

    lead_cmd(&temp_dir)
        .args(["add", "Big deal", "--stage", "negotiation"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Negotiation"));

    // New lead shows up under its stage on the board after reload
    lead_cmd(&temp_dir)
        .args(["board"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Negotiation (1)"))
        .stdout(predicate::str::contains("Big deal"));

    drop(temp_dir);
}

#[test]
fn test_board_renders_all_stages_when_empty() {
    let (temp_dir, _guard) = setup_test_env();

    let assert = lead_cmd(&temp_dir).args(["board"]).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    for header in [
        "New Lead (0)",
        "Contacted (0)",
        "Qualified (0)",
        "Proposal Sent (0)",
        "Negotiation (0)",
        "Won (0)",
        "Lost (0)",
    ] {
        assert!(stdout.contains(header), "missing column header {}", header);
    }

    drop(temp_dir);
}

#[test]
fn test_move_lead_between_stages() {
    let (temp_dir, _guard) = setup_test_env();

    lead_cmd(&temp_dir).args(["add", "Prospect"]).assert().success();

    lead_cmd(&temp_dir)
        .args(["move", "1", "qualified"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lead moved"))
        .stdout(predicate::str::contains("Qualified"));

    lead_cmd(&temp_dir)
        .args(["board"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Qualified (1)"))
        .stdout(predicate::str::contains("New Lead (0)"));

    drop(temp_dir);
}

#[test]
fn test_move_accepts_stage_prefix() {
    let (temp_dir, _guard) = setup_test_env();

    lead_cmd(&temp_dir).args(["add", "Prospect"]).assert().success();

    lead_cmd(&temp_dir)
        .args(["move", "1", "prop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Proposal Sent"));

    drop(temp_dir);
}

#[test]
fn test_move_to_same_stage_is_noop() {
    let (temp_dir, _guard) = setup_test_env();

    lead_cmd(&temp_dir).args(["add", "Prospect"]).assert().success();

    lead_cmd(&temp_dir)
        .args(["move", "1", "new_lead"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to do"));

    drop(temp_dir);
}

#[test]
fn test_move_unknown_lead_fails() {
    let (temp_dir, _guard) = setup_test_env();

    lead_cmd(&temp_dir)
        .args(["move", "99", "won"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No lead with ID 99"));

    drop(temp_dir);
}

#[test]
fn test_move_misspelled_stage_suggests() {
    let (temp_dir, _guard) = setup_test_env();

    lead_cmd(&temp_dir).args(["add", "Prospect"]).assert().success();

    lead_cmd(&temp_dir)
        .args(["move", "1", "qualifed"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Did you mean 'qualified'"));

    drop(temp_dir);
}

#[test]
fn test_move_ambiguous_stage_lists_matches() {
    let (temp_dir, _guard) = setup_test_env();

    lead_cmd(&temp_dir).args(["add", "Prospect"]).assert().success();

    lead_cmd(&temp_dir)
        .args(["move", "1", "n"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Ambiguous stage"));

    drop(temp_dir);
}

#[test]
fn test_edit_lead_fields() {
    let (temp_dir, _guard) = setup_test_env();

    lead_cmd(&temp_dir).args(["add", "Prospect"]).assert().success();

    lead_cmd(&temp_dir)
        .args([
            "edit", "1",
            "--company", "Globex",
            "--email", "buyer@globex.test",
            "--stage", "contacted",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated lead 1"))
        .stdout(predicate::str::contains("Contacted"));

    lead_cmd(&temp_dir)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Globex"))
        .stdout(predicate::str::contains("buyer@globex.test"))
        .stdout(predicate::str::contains("Contacted"));

    drop(temp_dir);
}

#[test]
fn test_list_filter_by_stage() {
    let (temp_dir, _guard) = setup_test_env();

    lead_cmd(&temp_dir).args(["add", "Fresh one"]).assert().success();
    lead_cmd(&temp_dir)
        .args(["add", "Closed one", "--stage", "won"])
        .assert()
        .success();

    let assert = lead_cmd(&temp_dir)
        .args(["list", "--stage", "won"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("Closed one"));
    assert!(!stdout.contains("Fresh one"));

    drop(temp_dir);
}

#[test]
fn test_list_json_output() {
    let (temp_dir, _guard) = setup_test_env();

    lead_cmd(&temp_dir)
        .args(["add", "Acme intro", "--source", "referral"])
        .assert()
        .success();

    let assert = lead_cmd(&temp_dir)
        .args(["list", "--json"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(parsed[0]["name"], "Acme intro");
    assert_eq!(parsed[0]["stage"], "new_lead");
    assert_eq!(parsed[0]["source"], "referral");

    drop(temp_dir);
}

#[test]
fn test_list_orders_newest_first() {
    let (temp_dir, _guard) = setup_test_env();

    lead_cmd(&temp_dir).args(["add", "Older lead"]).assert().success();
    lead_cmd(&temp_dir).args(["add", "Newer lead"]).assert().success();

    let assert = lead_cmd(&temp_dir).args(["list"]).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    let older_pos = stdout.find("Older lead").unwrap();
    let newer_pos = stdout.find("Newer lead").unwrap();
    assert!(newer_pos < older_pos, "newest lead should be listed first");

    drop(temp_dir);
}

#[test]
fn test_add_requires_name() {
    let (temp_dir, _guard) = setup_test_env();

    lead_cmd(&temp_dir)
        .args(["add", "  "])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot be empty"));

    drop(temp_dir);
}

#[test]
fn test_show_unknown_lead_fails() {
    let (temp_dir, _guard) = setup_test_env();

    lead_cmd(&temp_dir)
        .args(["show", "7"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No lead with ID 7"));

    drop(temp_dir);
}

#[test]
fn test_add_with_contacted_date() {
    let (temp_dir, _guard) = setup_test_env();

    lead_cmd(&temp_dir)
        .args(["add", "Warm lead", "--contacted", "yesterday"])
        .assert()
        .success();

    lead_cmd(&temp_dir)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contacted:"))
        .stdout(predicate::str::contains("ago"));

    drop(temp_dir);
}
