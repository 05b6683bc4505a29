//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use hallseat::models::{Cell, Person};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Header row used by every fixture roster.
pub fn header_row() -> Vec<Cell> {
    ["Roll No", "Name", "Department", "Subject", "Gender"]
        .iter()
        .map(|h| Cell::from(*h))
        .collect()
}

/// A roster row with a numeric id.
pub fn student_row(id: i64, gender: &str) -> Vec<Cell> {
    vec![
        Cell::from(id),
        Cell::from(format!("Student {id}")),
        Cell::from(if id % 2 == 0 { "CS" } else { "EE" }),
        Cell::from("Maths"),
        Cell::from(gender),
    ]
}

/// Header plus one row per id; genders alternate F, M starting with F.
pub fn roster_rows(ids: &[i64]) -> Vec<Vec<Cell>> {
    let mut rows = vec![header_row()];
    rows.extend(
        ids.iter()
            .enumerate()
            .map(|(idx, id)| student_row(*id, if idx % 2 == 0 { "F" } else { "M" })),
    );
    rows
}

/// Roster entries for `ids`, in the given order.
pub fn roster_people(ids: &[i64]) -> Vec<Person> {
    roster_rows(ids)
        .into_iter()
        .skip(1)
        .enumerate()
        .map(|(idx, row)| Person::from_row(row).at_row(idx + 2))
        .collect()
}

/// Ids `1..=n`.
pub fn ids(n: i64) -> Vec<i64> {
    (1..=n).collect()
}

/// Writes rows as a JSON roster file in a fresh temp directory.
pub fn create_temp_json_roster(rows: &[Vec<Cell>]) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("roster.json");
    write_json_roster(&path, rows);
    (path, temp_dir)
}

/// Writes rows as JSON to `path`.
pub fn write_json_roster(path: &Path, rows: &[Vec<Cell>]) {
    let content = serde_json::to_string_pretty(rows).expect("Failed to serialize roster");
    fs::write(path, content).expect("Failed to write roster file");
}

/// Writes rows as a single-sheet xlsx roster in a fresh temp directory.
pub fn create_temp_xlsx_roster(rows: &[Vec<Cell>]) -> (PathBuf, TempDir) {
    use hallseat::export::workbook::{write_sheets, SheetPlan};

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("roster.xlsx");
    let sheet = SheetPlan {
        name: "Students".to_string(),
        rows: rows.to_vec(),
        ..SheetPlan::default()
    };
    let bytes = write_sheets(&[sheet]).expect("Failed to build workbook");
    fs::write(&path, bytes).expect("Failed to write workbook");
    (path, temp_dir)
}

/// Path to the hallseat binary
pub fn hallseat_bin() -> &'static str {
    env!("CARGO_BIN_EXE_hallseat")
}

/// Creates a Command whose config directory is isolated in `config_dir`.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(hallseat_bin());
    cmd.env("HALLSEAT_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}
