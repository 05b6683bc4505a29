//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and export naming conventions.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Hall Seat Planner";

/// Directory name under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "hallseat";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "HALLSEAT_CONFIG_DIR";

/// Sheet name prefix for sections; the 1-based section number follows.
pub const SECTION_SHEET_PREFIX: &str = "Class_";

/// Sheet name for people left without a seat.
pub const PENDING_SHEET_NAME: &str = "Pending_Students";

/// Stem of exported file names; the export date and extension follow.
pub const EXPORT_FILE_STEM: &str = "exam_seating_plan";

/// Upper bound on seats across all halls of one layout.
///
/// Every seat is materialised in the plan, so larger layouts are rejected
/// before any allocation happens.
pub const MAX_SEATS: usize = 100_000;
