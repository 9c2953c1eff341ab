//! Integration tests for the mapdiff CLI.
//!
//! These run the binary end to end against the documents in
//! `tests/fixtures` and check output and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;

fn mapdiff() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("mapdiff"))
}

#[test]
fn test_identical_files_exit_0() {
    mapdiff()
        .arg("tests/fixtures/identical_1.json")
        .arg("tests/fixtures/identical_2.json")
        .assert()
        .success()
        .code(0)
        .stdout(predicate::str::contains("No changes"));
}

#[test]
fn test_small_diff_plain() {
    mapdiff()
        .args(["-f", "plain", "-q"])
        .arg("tests/fixtures/small_old.json")
        .arg("tests/fixtures/small_new.json")
        .assert()
        .code(1)
        .stdout("Add d7: 3\nRemove d3: 3\nRemove d4[1]: 5\n");
}

#[test]
fn test_summary_line() {
    mapdiff()
        .args(["-f", "plain"])
        .arg("tests/fixtures/small_old.json")
        .arg("tests/fixtures/small_new.json")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Summary: 1 added, 2 removed"));
}

#[test]
fn test_nested_yaml_diff() {
    mapdiff()
        .args(["-f", "plain"])
        .arg("tests/fixtures/nested_old.yaml")
        .arg("tests/fixtures/nested_new.yaml")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Add a2[0].b2.c2[1].(e5.f1): v5"))
        .stdout(predicate::str::contains("Change a1.b1.c1.d5: <nil> -> nil"))
        .stdout(predicate::str::contains("Remove a2[0].b2.c2[1].e2: v2"));
}

#[test]
fn test_json_output() {
    mapdiff()
        .args(["-f", "json"])
        .arg("tests/fixtures/small_old.json")
        .arg("tests/fixtures/small_new.json")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"action\": \"Add\""))
        .stdout(predicate::str::contains("\"path\": \"d4[1]\""))
        .stdout(predicate::str::contains("\"stats\""));
}

#[test]
fn test_toml_at_subtree() {
    mapdiff()
        .args(["-f", "plain", "-q", "--at", "spec"])
        .arg("tests/fixtures/deploy_old.toml")
        .arg("tests/fixtures/deploy_new.toml")
        .assert()
        .code(1)
        .stdout("Change replicas: 3 -> 5\n");
}

#[test]
fn test_at_missing_path_exit_2() {
    mapdiff()
        .args(["--at", "status.phase"])
        .arg("tests/fixtures/deploy_old.toml")
        .arg("tests/fixtures/deploy_new.toml")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Cannot resolve path status.phase"));
}

#[test]
fn test_max_value_length() {
    mapdiff()
        .args(["-f", "plain", "-q", "--max-value-length", "6"])
        .arg("tests/fixtures/nested_old.yaml")
        .arg("tests/fixtures/nested_new.yaml")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Add a3: {\"b..."));
}

#[test]
fn test_file_not_found_exit_2() {
    mapdiff()
        .arg("tests/fixtures/nonexistent.json")
        .arg("tests/fixtures/identical_1.json")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_invalid_json_exit_2() {
    mapdiff()
        .arg("tests/fixtures/invalid.json")
        .arg("tests/fixtures/identical_1.json")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid JSON"));
}

#[test]
fn test_help() {
    mapdiff()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Structural diff"));
}
