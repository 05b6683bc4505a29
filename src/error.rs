//! Errors raised while validating inputs for an allocation.
//!
//! All of these are surfaced before any ordering strategy runs. Once the
//! roster and configuration are accepted the pipeline always produces a plan;
//! running out of seats is reported through the pending list, never as an error.

use thiserror::Error;

/// Result alias for allocation input validation.
pub type Result<T> = std::result::Result<T, AllocationError>;

/// Input validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// A hall dimension or the section count is out of range.
    #[error("invalid layout configuration: {field} {reason}")]
    InvalidConfig {
        /// Offending field name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// A roster row has fewer columns than the five-column schema.
    #[error("malformed roster: row {row} has {found} column(s), expected at least {expected}")]
    MalformedRoster {
        /// 1-based sheet row number (the header is row 1)
        row: usize,
        /// Number of cells found in the row
        found: usize,
        /// Number of cells required
        expected: usize,
    },

    /// Two roster rows share an id.
    #[error("duplicate id '{id}' on rows {first_row} and {second_row}")]
    DuplicateIdentifier {
        /// The repeated id
        id: String,
        /// Row number of the first occurrence
        first_row: usize,
        /// Row number of the repeat
        second_row: usize,
    },
}
