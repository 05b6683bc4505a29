//! Roster file I/O service.
//!
//! This module centralizes roster loading so the CLI and the web API read
//! spreadsheets and JSON row files the same way.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::debug;

use crate::models::{Cell, Person};
use crate::parser::{self, NormalizeOptions};

/// Supported roster file kinds, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterFormat {
    /// `.xlsx` workbook; the first sheet is read
    Workbook,
    /// `.json` array of rows
    Json,
}

impl RosterFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("xlsx" | "xlsm") => Ok(Self::Workbook),
            Some("json") => Ok(Self::Json),
            _ => bail!(
                "Unsupported roster file: {} (expected .xlsx or .json)",
                path.display()
            ),
        }
    }
}

/// Service for reading rosters.
pub struct RosterService;

impl RosterService {
    /// Reads the raw rows of a roster file, header included.
    ///
    /// # Errors
    ///
    /// Fails on unsupported extensions, I/O errors and unparseable content.
    pub fn load_rows(path: &Path) -> Result<Vec<Vec<Cell>>> {
        let rows = match RosterFormat::from_path(path)? {
            RosterFormat::Workbook => parser::read_first_sheet_rows(path)?,
            RosterFormat::Json => parser::read_json_rows(path)?,
        };
        debug!(path = %path.display(), rows = rows.len(), "read roster rows");
        Ok(rows)
    }

    /// Loads and normalizes a roster file.
    ///
    /// A malformed row surfaces as [`crate::error::AllocationError`] inside
    /// the returned error, so callers can tell it apart from I/O failures.
    pub fn load(path: &Path, options: NormalizeOptions) -> Result<Vec<Person>> {
        let rows = Self::load_rows(path)?;
        parser::normalize_rows(&rows, options)
            .with_context(|| format!("Invalid roster in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AllocationError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            RosterFormat::from_path(Path::new("a/Students.XLSX")).unwrap(),
            RosterFormat::Workbook
        );
        assert_eq!(
            RosterFormat::from_path(Path::new("rows.json")).unwrap(),
            RosterFormat::Json
        );
        assert!(RosterFormat::from_path(Path::new("rows.csv")).is_err());
        assert!(RosterFormat::from_path(Path::new("rows")).is_err());
    }

    #[test]
    fn test_load_json_roster() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("roster.json");
        fs::write(
            &path,
            r#"[["Roll No","Name","Dept","Subject","Gender"],[2,"Bo","EE","Physics","M"],[1,"Ann","CS","Maths","F"]]"#,
        )
        .unwrap();

        let people = RosterService::load(&path, NormalizeOptions::default()).unwrap();
        assert_eq!(people.len(), 2);
        assert_eq!(people[0].id, "2");
        assert_eq!(people[1].name, "Ann");
    }

    #[test]
    fn test_malformed_row_keeps_domain_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("roster.json");
        fs::write(&path, r#"[["id"],[1,"Ann"]]"#).unwrap();

        let err = RosterService::load(&path, NormalizeOptions::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AllocationError>(),
            Some(AllocationError::MalformedRoster { row: 2, .. })
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");
        let err = RosterService::load(&path, NormalizeOptions::default()).unwrap_err();
        assert!(err.downcast_ref::<AllocationError>().is_none());
    }
}
