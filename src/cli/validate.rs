//! Validation command for roster files.

use crate::cli::common::{CliError, CliResult};
use crate::engine::ordering::gender_group;
use crate::models::Cell;
use crate::parser::{normalize_rows, short_rows, NormalizeOptions, ROSTER_COLUMNS};
use crate::services::RosterService;
use clap::Args;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Validate a roster file for errors and warnings
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Roster file (.xlsx or .json)
    #[arg(short, long, value_name = "FILE")]
    pub roster: PathBuf,

    /// Accept short rows (they are padded when allocating with --lenient)
    #[arg(long)]
    pub lenient: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

/// One finding.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationMessage {
    /// "error" or "warning"
    pub severity: String,
    /// Human-readable description
    pub message: String,
    /// 1-based sheet row, when the finding is about a row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
}

impl ValidationMessage {
    fn error(message: String, row: Option<usize>) -> Self {
        Self {
            severity: "error".to_string(),
            message,
            row,
        }
    }

    fn warning(message: String, row: Option<usize>) -> Self {
        Self {
            severity: "warning".to_string(),
            message,
            row,
        }
    }

    fn is_error(&self) -> bool {
        self.severity == "error"
    }
}

/// Full validation report.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResponse {
    /// True when there are no errors
    pub valid: bool,
    /// Roster entries found (header and blank rows excluded)
    pub people: usize,
    /// Errors and warnings in row order
    pub messages: Vec<ValidationMessage>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let rows = RosterService::load_rows(&self.roster)
            .map_err(|e| CliError::io(format!("Failed to load roster: {e:#}")))?;

        let response = check_rows(&rows, self.lenient);

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            if response.valid {
                println!("✓ Validation passed ({} students)", response.people);
            } else {
                println!("✗ Validation failed");
            }

            if !response.messages.is_empty() {
                println!("\nIssues:");
                for msg in &response.messages {
                    let prefix = if msg.is_error() { "  ✗" } else { "  ⚠" };
                    match msg.row {
                        Some(row) => println!("{prefix} [row {row}] {}", msg.message),
                        None => println!("{prefix} {}", msg.message),
                    }
                }
            }
        }

        // Exit code
        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict && !response.messages.is_empty() {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}

/// Checks raw roster rows.
///
/// Errors: rows with fewer than five cells (unless `lenient`), duplicate ids.
/// Warnings: ids that are not numeric (they keep their place when sorting),
/// genders the gender-alternating strategy would leave out.
pub fn check_rows(rows: &[Vec<Cell>], lenient: bool) -> ValidationResponse {
    let mut messages = Vec::new();

    if !lenient {
        for (row, found) in short_rows(rows) {
            messages.push(ValidationMessage::error(
                format!("row has {found} column(s), expected at least {ROSTER_COLUMNS}"),
                Some(row),
            ));
        }
    }

    // Short rows are already reported; pad them so the remaining checks see every entry
    let people = normalize_rows(rows, NormalizeOptions::lenient()).unwrap_or_default();

    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    for person in &people {
        if let Some(first_row) = first_seen.get(person.id.as_str()) {
            messages.push(ValidationMessage::error(
                format!("duplicate id '{}' (first seen on row {first_row})", person.id),
                Some(person.source_row),
            ));
        } else {
            first_seen.insert(person.id.as_str(), person.source_row);
        }

        if person.numeric_id().is_none() {
            messages.push(ValidationMessage::warning(
                format!("id '{}' is not numeric", person.id),
                Some(person.source_row),
            ));
        }
        if gender_group(person).is_none() {
            messages.push(ValidationMessage::warning(
                format!(
                    "gender '{}' is neither male nor female; gender-alternating seating leaves this entry out",
                    person.gender
                ),
                Some(person.source_row),
            ));
        }
    }

    messages.sort_by_key(|m| m.row);

    ValidationResponse {
        valid: !messages.iter().any(ValidationMessage::is_error),
        people: people.len(),
        messages,
    }
}
