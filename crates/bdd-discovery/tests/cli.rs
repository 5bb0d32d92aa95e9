//! Smoke tests for the `bdd-discover` binary.
#![expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]

use std::fs;
use std::str;

use assert_cmd::Command;
use rstest::{fixture, rstest};
use tempfile::TempDir;

const ORDERS: &str = "\
Feature: orders

  @smoke
  Scenario: place an order
    Given a basket

  Scenario: cancel an order
    Given an order
";

#[fixture]
fn workspace() -> TempDir {
    let temp = tempfile::tempdir().expect("create temp dir");
    fs::create_dir_all(temp.path().join("features")).expect("create features dir");
    fs::write(temp.path().join("features/orders.feature"), ORDERS).expect("write feature");
    temp
}

fn command(workspace: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bdd-discover").expect("binary exists");
    cmd.current_dir(workspace.path())
        .env_remove("BDD_DISCOVERY_TAGS")
        .env_remove("BDD_DISCOVERY_DIALECT")
        .env_remove("BDD_DISCOVERY_LOG_LEVEL");
    cmd
}

fn stdout_of(output: &std::process::Output) -> &str {
    str::from_utf8(&output.stdout).expect("utf8")
}

#[rstest]
fn lists_features_and_scenarios(workspace: TempDir) {
    let output = command(&workspace)
        .arg("features")
        .output()
        .expect("runs");
    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        "features/orders.feature\n  place an order (features/orders.feature) [@smoke]\n  cancel an order (features/orders.feature)\n"
    );
}

#[rstest]
fn line_suffix_selects_a_scenario(workspace: TempDir) {
    let output = command(&workspace)
        .arg("features/orders.feature:7")
        .output()
        .expect("runs");
    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        "features/orders.feature:7\n  cancel an order (features/orders.feature:7)\n"
    );
}

#[rstest]
fn tags_come_from_flag_or_environment(workspace: TempDir) {
    let from_flag = command(&workspace)
        .args(["--tags", "not @smoke", "features"])
        .output()
        .expect("runs");
    assert!(stdout_of(&from_flag).contains("cancel an order"));
    assert!(!stdout_of(&from_flag).contains("place an order"));

    let from_env = command(&workspace)
        .env("BDD_DISCOVERY_TAGS", "@smoke")
        .arg("features")
        .output()
        .expect("runs");
    assert!(stdout_of(&from_env).contains("place an order"));
    assert!(!stdout_of(&from_env).contains("cancel an order"));
}

#[rstest]
fn root_flag_resolves_relative_paths(workspace: TempDir) {
    let output = Command::cargo_bin("bdd-discover")
        .expect("binary exists")
        .arg("--root")
        .arg(workspace.path().join("features"))
        .arg("orders.feature")
        .output()
        .expect("runs");
    assert!(output.status.success());
    assert!(stdout_of(&output).starts_with("orders.feature\n"));
}

#[rstest]
fn reads_a_feature_from_stdin(workspace: TempDir) {
    let output = command(&workspace)
        .args(["--stdin-name", "piped.feature"])
        .write_stdin(ORDERS)
        .output()
        .expect("runs");
    assert!(output.status.success());
    assert!(stdout_of(&output).starts_with("piped.feature\n  place an order (piped.feature)"));
}

#[rstest]
fn missing_path_fails_with_message(workspace: TempDir) {
    let output = command(&workspace)
        .arg("missing.feature")
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(1));
    let stderr = str::from_utf8(&output.stderr).expect("utf8");
    assert!(
        stderr.contains("feature path \"missing.feature\" is not available"),
        "{stderr}"
    );
}

#[rstest]
fn absolute_paths_bypass_the_root(workspace: TempDir) {
    let absolute = workspace.path().join("features/orders.feature");
    let absolute = absolute.to_str().expect("utf8 temp path");
    let output = command(&workspace)
        .arg("--root")
        .arg(workspace.path().join("features"))
        .arg(format!("{absolute}:7"))
        .output()
        .expect("runs");
    assert!(output.status.success(), "{output:?}");
    assert_eq!(
        stdout_of(&output),
        format!("{absolute}:7\n  cancel an order ({absolute}:7)\n")
    );
}

#[rstest]
#[case::absolute(true)]
#[case::parent_relative(false)]
fn missing_paths_outside_the_root_are_not_available(workspace: TempDir, #[case] absolute: bool) {
    let specifier = if absolute {
        workspace
            .path()
            .join("missing.feature")
            .to_str()
            .expect("utf8 temp path")
            .to_string()
    } else {
        "../missing-bdd-discovery.feature".to_string()
    };
    let output = command(&workspace)
        .arg(&specifier)
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(1));
    let stderr = str::from_utf8(&output.stderr).expect("utf8");
    assert!(
        stderr.contains(&format!("feature path \"{specifier}\" is not available")),
        "{stderr}"
    );
}

#[rstest]
fn invalid_log_level_in_environment_fails(workspace: TempDir) {
    let output = command(&workspace)
        .env("BDD_DISCOVERY_LOG_LEVEL", "chatty")
        .arg("features")
        .output()
        .expect("runs");
    assert!(!output.status.success());
    let stderr = str::from_utf8(&output.stderr).expect("utf8");
    assert!(stderr.contains("unknown log level"), "{stderr}");
}
