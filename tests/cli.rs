// Drives the `lispy` binary end to end.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

fn lispy() -> Command {
    let mut cmd = Command::cargo_bin("lispy").unwrap();
    cmd.env_remove("RUST_LOG").arg("--color").arg("never");
    cmd
}

#[test]
fn eval_prints_each_result() {
    lispy()
        .args(["eval", "+ 1 2 3 4", "* 2 3 4", "- 10 2 3", "/ 10 2"])
        .assert()
        .success()
        .stdout("10\n24\n5\n5\n");
}

#[test]
fn eval_error_value_fails_the_run() {
    lispy()
        .args(["eval", "/ 5 (- 3 3)"])
        .assert()
        .failure()
        .stdout("Error: Division By Zero!\n");
}

#[test]
fn eval_reports_overflowing_literal() {
    lispy()
        .args(["eval", "+ 1 99999999999999999999"])
        .assert()
        .failure()
        .stdout("Error: Invalid Number!\n");
}

#[test]
fn parse_failure_renders_miette_diagnostic() {
    lispy()
        .args(["eval", "+ 1 2 )"])
        .assert()
        .failure()
        .stdout("")
        .stderr(contains("lispy::parse").and(contains("<arg>")));
}

#[test]
fn repl_keeps_going_after_errors() {
    lispy()
        .args(["repl", "--quiet"])
        .write_stdin("+ 1 2\n/ 1 0\n+ 1 2 )\n* 2 (+ 1 1)\n")
        .assert()
        .success()
        .stdout(
            contains("3\n")
                .and(contains("Error: Division By Zero!\n"))
                .and(contains("<stdin>:1:7: expected"))
                .and(contains("4\n")),
        );
}

#[test]
fn repl_is_the_default_command() {
    lispy()
        .write_stdin("+ 20 22\n")
        .assert()
        .success()
        .stdout(contains("Lispy v").and(contains("lispy> 42\n")));
}

#[test]
fn ast_dumps_tree() {
    lispy()
        .args(["ast", "+ 1 (* 2 3)"])
        .assert()
        .success()
        .stdout(
            contains("lispy '+ 1 (* 2 3)'")
                .and(contains("  expr '(* 2 3)'"))
                .and(contains("    lparen '('")),
        );
}

#[test]
fn ast_json_is_valid() {
    let output = lispy()
        .args(["ast", "--json", "- 4 1"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let tree: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tree["tag"], "lispy");
    assert_eq!(tree["children"][0]["contents"], "-");
    assert_eq!(tree["children"][2]["contents"], "1");
}
