//! JSON row documents: `[[cell, ...], ...]`.

use crate::models::Cell;
use anyhow::{Context, Result};
use std::path::Path;

/// Parses a JSON array of rows.
pub fn parse_json_rows(content: &str) -> Result<Vec<Vec<Cell>>> {
    serde_json::from_str(content).context("Expected a JSON array of rows (arrays of cell values)")
}

/// Reads a JSON rows file.
pub fn read_json_rows(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file: {}", path.display()))?;
    parse_json_rows(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
