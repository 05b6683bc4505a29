//! Roster entries and the raw spreadsheet cells they are built from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single spreadsheet cell value.
///
/// Cells keep their original type so that exported sheets can write numbers
/// back as numbers. Deserializes from plain JSON scalars (`null`, strings,
/// numbers, booleans).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Cell {
    /// Missing or blank cell
    #[default]
    Empty,
    /// Boolean cell
    Bool(bool),
    /// Numeric cell
    Number(f64),
    /// Text cell
    Text(String),
}

impl Cell {
    /// Returns true if the cell holds nothing (or only whitespace text).
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(true) => f.write_str("TRUE"),
            Self::Bool(false) => f.write_str("FALSE"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Cell {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

/// Formats a number the way spreadsheets display it: integral values have no
/// fractional part.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        #[allow(clippy::cast_possible_truncation)]
        let int = value as i64;
        int.to_string()
    } else {
        value.to_string()
    }
}

/// Coerces text to a number the way spreadsheet scripts do.
///
/// Whitespace around the value is ignored and an empty string is `0`.
/// Returns `None` for anything that is not a number.
pub fn coerce_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let radix = |digits: &str, base: u32| -> Option<f64> {
        u64::from_str_radix(digits, base).ok().map(|n| n as f64)
    };
    let lower = trimmed.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        return radix(hex, 16);
    }
    if let Some(oct) = lower.strip_prefix("0o") {
        return radix(oct, 8);
    }
    if let Some(bin) = lower.strip_prefix("0b") {
        return radix(bin, 2);
    }

    // Rust accepts "inf"/"nan" spellings that spreadsheets treat as text
    // At most one sign; "--1" is not a number
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    match unsigned {
        "Infinity" => {
            return Some(if trimmed.starts_with('-') {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            })
        }
        rest if rest.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => {
            return None
        }
        _ => {}
    }

    trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// One roster entry.
///
/// The five text fields are the display form of the first five cells of the
/// source row. The full row is kept for lossless pass-through into exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Roll number or other identifier (unique within a roster)
    pub id: String,
    /// Display name
    pub name: String,
    /// Department
    pub department: String,
    /// Exam subject
    pub subject: String,
    /// Gender as written in the roster
    pub gender: String,
    /// Original row, all columns
    pub row: Vec<Cell>,
    /// 1-based sheet row number the entry was read from (0 when unknown)
    #[serde(default)]
    pub source_row: usize,
}

impl Person {
    /// Builds a person from a source row, reading the first five cells.
    ///
    /// Missing cells become empty strings.
    pub fn from_row(row: Vec<Cell>) -> Self {
        let text = |idx: usize| row.get(idx).map(ToString::to_string).unwrap_or_default();
        Self {
            id: text(0),
            name: text(1),
            department: text(2),
            subject: text(3),
            gender: text(4),
            row,
            source_row: 0,
        }
    }

    /// Records the sheet row number the entry was read from.
    pub fn at_row(mut self, source_row: usize) -> Self {
        self.source_row = source_row;
        self
    }

    /// Numeric value of the id, if it has one.
    ///
    /// A missing or empty id cell is not a number; only text is coerced, so an
    /// explicit empty string still counts as `0`.
    pub fn numeric_id(&self) -> Option<f64> {
        match self.row.first() {
            Some(Cell::Number(n)) => Some(*n),
            Some(Cell::Bool(b)) => Some(f64::from(u8::from(*b))),
            Some(Cell::Text(text)) => coerce_number(text),
            Some(Cell::Empty) | None => None,
        }
    }

    /// The id as it appeared in the source row.
    pub fn id_cell(&self) -> Cell {
        self.row.first().cloned().unwrap_or_default()
    }

    /// The five roster columns as cells, padded with empty cells.
    pub fn roster_cells(&self) -> [Cell; 5] {
        std::array::from_fn(|idx| self.row.get(idx).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(cells: &[Cell]) -> Person {
        Person::from_row(cells.to_vec())
    }

    #[test]
    fn test_number_display_drops_integral_fraction() {
        assert_eq!(Cell::Number(101.0).to_string(), "101");
        assert_eq!(Cell::Number(2.5).to_string(), "2.5");
        assert_eq!(Cell::Number(-7.0).to_string(), "-7");
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("42"), Some(42.0));
        assert_eq!(coerce_number("  7 "), Some(7.0));
        assert_eq!(coerce_number(""), Some(0.0));
        assert_eq!(coerce_number("1e3"), Some(1000.0));
        assert_eq!(coerce_number("0x1A"), Some(26.0));
        assert_eq!(coerce_number("-3.5"), Some(-3.5));
        assert_eq!(coerce_number("CS-101"), None);
        assert_eq!(coerce_number("nan"), None);
        assert_eq!(coerce_number("inf"), None);
        assert_eq!(coerce_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(coerce_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(coerce_number("+12"), Some(12.0));
    }

    #[test]
    fn test_coerce_number_allows_one_sign() {
        assert_eq!(coerce_number("--Infinity"), None);
        assert_eq!(coerce_number("+-Infinity"), None);
        assert_eq!(coerce_number("--5"), None);
        assert_eq!(coerce_number("-"), None);
        assert_eq!(coerce_number("-0x1A"), None);
    }

    #[test]
    fn test_numeric_id_of_blank_cells() {
        assert_eq!(person(&[Cell::Empty, "Ann".into()]).numeric_id(), None);
        assert_eq!(person(&[]).numeric_id(), None);
        assert_eq!(person(&["".into(), "Bo".into()]).numeric_id(), Some(0.0));
        assert_eq!(person(&[" 12 ".into()]).numeric_id(), Some(12.0));
    }

    #[test]
    fn test_from_row_pads_missing_cells() {
        let p = person(&["12".into(), "Asha".into()]);
        assert_eq!(p.id, "12");
        assert_eq!(p.name, "Asha");
        assert_eq!(p.department, "");
        assert_eq!(p.gender, "");
        assert_eq!(p.row.len(), 2);
    }

    #[test]
    fn test_numeric_id_prefers_number_cells() {
        let p = person(&[Cell::Number(9.0), "Ravi".into()]);
        assert_eq!(p.id, "9");
        assert_eq!(p.numeric_id(), Some(9.0));

        let q = person(&["R-9".into()]);
        assert_eq!(q.numeric_id(), None);
    }

    #[test]
    fn test_roster_cells_keep_types() {
        let p = person(&[Cell::Number(3.0), "Mei".into(), "EE".into()]);
        let cells = p.roster_cells();
        assert_eq!(cells[0], Cell::Number(3.0));
        assert_eq!(cells[2], Cell::Text("EE".to_string()));
        assert_eq!(cells[4], Cell::Empty);
    }

    #[test]
    fn test_cell_deserializes_from_json_scalars() {
        let cells: Vec<Cell> = serde_json::from_str(r#"[1, "Ann", null, true]"#).unwrap();
        assert_eq!(
            cells,
            vec![
                Cell::Number(1.0),
                Cell::Text("Ann".to_string()),
                Cell::Empty,
                Cell::Bool(true)
            ]
        );
    }
}
