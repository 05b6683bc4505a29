//! End-to-end tests for `hallseat strategies` command.

use tempfile::TempDir;

mod fixtures;
use fixtures::*;

#[test]
fn test_strategies_lists_every_key() {
    let config_dir = TempDir::new().unwrap();

    let output = isolated_command(&["strategies"], config_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    for key in [
        "sequential",
        "serpentine",
        "alternate",
        "evenOdd",
        "genderAlternating",
        "random",
    ] {
        assert!(stdout.contains(key), "missing {key} in: {stdout}");
    }
    assert!(stdout.contains("Serpentine Order (Snake-wise)"));
}

#[test]
fn test_strategies_json() {
    let config_dir = TempDir::new().unwrap();

    let output = isolated_command(&["strategies", "--json"], config_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let list: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON output");
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 6);
    assert_eq!(list[0]["key"], "sequential");
    assert_eq!(list[0]["leavesGaps"], false);
    assert_eq!(list[2]["key"], "alternate");
    assert_eq!(list[2]["leavesGaps"], true);
    assert_eq!(list[5]["displayName"], "Randomized Allocation");
}
