//! Service layer for business logic.
//!
//! This module contains services that coordinate file I/O, the allocation
//! engine and the exporters for the CLI and the web API.

pub mod plan;
pub mod roster;

// Re-export commonly used types and functions
pub use plan::PlanService;
pub use roster::{RosterFormat, RosterService};
