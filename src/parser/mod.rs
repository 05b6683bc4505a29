//! Reading rosters from disk.
//!
//! Rosters arrive either as an xlsx workbook (first sheet is used) or as a
//! JSON array of rows. Both produce the same raw rows, which
//! [`roster::normalize_rows`] turns into [`crate::models::Person`] entries.

pub mod roster;
pub mod rows;
pub mod workbook;

// Re-export commonly used functions
pub use roster::{normalize_rows, short_rows, NormalizeOptions, ROSTER_COLUMNS, ROSTER_HEADER};
pub use rows::{parse_json_rows, read_json_rows};
pub use workbook::{read_first_sheet_rows, read_workbook, read_workbook_bytes, Sheet, Workbook};
