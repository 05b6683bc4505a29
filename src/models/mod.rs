//! Data models for rosters, hall layouts and seating plans.
//!
//! Models are plain data with serde support and no I/O. Everything in a plan is
//! derived from a roster and a `LayoutConfig`; nothing here is mutated after
//! an allocation finishes.

pub mod allocation;
pub mod layout_config;
pub mod person;
pub mod seat;

// Re-export all model types
pub use allocation::AllocationResult;
pub use layout_config::{FillMode, LayoutConfig, OrderingStrategy, SeatingConstraints};
pub use person::{Cell, Person};
pub use seat::{Seat, Section, Slot};
