//! Turning raw sheet rows into roster entries.

use crate::error::{AllocationError, Result};
use crate::models::{Cell, Person};

/// Number of positional roster columns: id, name, department, subject, gender.
pub const ROSTER_COLUMNS: usize = 5;

/// Column headers of the roster schema.
pub const ROSTER_HEADER: [&str; ROSTER_COLUMNS] = ["id", "name", "department", "subject", "gender"];

/// Normalization options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalizeOptions {
    /// Pad short rows with empty cells instead of rejecting them
    pub lenient: bool,
}

impl NormalizeOptions {
    /// Options that pad short rows.
    pub const fn lenient() -> Self {
        Self { lenient: true }
    }
}

/// Converts sheet rows into people.
///
/// The first row is the header and is dropped. Remaining rows map positionally
/// onto [`ROSTER_HEADER`]; extra columns are kept in [`Person::row`] but
/// otherwise ignored. Rows with no content at all are skipped. Row order is
/// preserved.
///
/// # Errors
///
/// Returns [`AllocationError::MalformedRoster`] for the first row with fewer
/// than five cells, unless `options.lenient` is set.
pub fn normalize_rows(rows: &[Vec<Cell>], options: NormalizeOptions) -> Result<Vec<Person>> {
    let mut people = Vec::with_capacity(rows.len().saturating_sub(1));
    for (idx, row) in rows.iter().enumerate().skip(1) {
        if row.iter().all(Cell::is_blank) {
            continue;
        }

        let sheet_row = idx + 1;
        if row.len() < ROSTER_COLUMNS && !options.lenient {
            return Err(AllocationError::MalformedRoster {
                row: sheet_row,
                found: row.len(),
                expected: ROSTER_COLUMNS,
            });
        }

        people.push(Person::from_row(row.clone()).at_row(sheet_row));
    }
    Ok(people)
}

/// Lists every row that is too short, as `(sheet_row, cells_found)`.
///
/// Used for reporting; [`normalize_rows`] stops at the first one.
pub fn short_rows(rows: &[Vec<Cell>]) -> Vec<(usize, usize)> {
    rows.iter()
        .enumerate()
        .skip(1)
        .filter(|(_, row)| !row.iter().all(Cell::is_blank) && row.len() < ROSTER_COLUMNS)
        .map(|(idx, row)| (idx + 1, row.len()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|c| Cell::from(*c)).collect()
    }

    fn header() -> Vec<Cell> {
        row(&["Roll No", "Name", "Department", "Subject", "Gender"])
    }

    #[test]
    fn test_header_is_dropped() {
        let rows = vec![header(), row(&["1", "Ann", "CS", "Maths", "F"])];
        let people = normalize_rows(&rows, NormalizeOptions::default()).unwrap();
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].id, "1");
        assert_eq!(people[0].subject, "Maths");
        assert_eq!(people[0].gender, "F");
        assert_eq!(people[0].source_row, 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize_rows(&[], NormalizeOptions::default())
            .unwrap()
            .is_empty());
        assert!(normalize_rows(&[header()], NormalizeOptions::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_extra_columns_are_kept_in_row() {
        let rows = vec![header(), row(&["1", "Ann", "CS", "Maths", "F", "Hostel A"])];
        let people = normalize_rows(&rows, NormalizeOptions::default()).unwrap();
        assert_eq!(people[0].row.len(), 6);
        assert_eq!(people[0].gender, "F");
    }

    #[test]
    fn test_short_row_is_malformed() {
        let rows = vec![
            header(),
            row(&["1", "Ann", "CS", "Maths", "F"]),
            row(&["2", "Bo", "EE"]),
        ];
        let err = normalize_rows(&rows, NormalizeOptions::default()).unwrap_err();
        assert_eq!(
            err,
            AllocationError::MalformedRoster {
                row: 3,
                found: 3,
                expected: 5
            }
        );
    }

    #[test]
    fn test_lenient_pads_short_rows() {
        let rows = vec![header(), row(&["2", "Bo", "EE"])];
        let people = normalize_rows(&rows, NormalizeOptions::lenient()).unwrap();
        assert_eq!(people[0].department, "EE");
        assert_eq!(people[0].subject, "");
        assert_eq!(people[0].gender, "");
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let rows = vec![
            header(),
            row(&["1", "Ann", "CS", "Maths", "F"]),
            vec![],
            row(&["", " ", ""]),
            row(&["3", "Cy", "ME", "Physics", "M"]),
        ];
        let people = normalize_rows(&rows, NormalizeOptions::default()).unwrap();
        assert_eq!(people.len(), 2);
        assert_eq!(people[1].source_row, 5);
    }

    #[test]
    fn test_short_rows_lists_every_offender() {
        let rows = vec![
            header(),
            row(&["1", "Ann"]),
            row(&["2", "Bo", "EE", "Maths", "M"]),
            row(&["3"]),
        ];
        assert_eq!(short_rows(&rows), vec![(2, 2), (4, 1)]);
    }
}
