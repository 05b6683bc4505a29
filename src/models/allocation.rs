//! The finished seating plan.

use crate::models::{FillMode, OrderingStrategy, Person, Section};
use serde::{Deserialize, Serialize};

/// Outcome of one allocation run.
///
/// Every roster entry ends up in exactly one of `sections`, `pending` or
/// `excluded`. Only the gender-alternating strategy ever excludes anyone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    /// Strategy the plan was built with
    pub strategy: OrderingStrategy,
    /// Fill mode the plan was built with
    pub fill_mode: FillMode,
    /// One grid per hall, in index order
    pub sections: Vec<Section>,
    /// People who did not fit, in the order they were dropped
    pub pending: Vec<Person>,
    /// People the ordering strategy left out of the sequence
    pub excluded: Vec<Person>,
}

impl AllocationResult {
    /// Total people seated across all sections.
    pub fn seated_count(&self) -> usize {
        self.sections.iter().map(Section::seated_count).sum()
    }

    /// Seated people across all sections, section by section in scan order.
    pub fn seated(&self) -> impl Iterator<Item = &Person> {
        self.sections.iter().flat_map(Section::occupants)
    }

    /// Total seats across all sections.
    pub fn total_capacity(&self) -> usize {
        self.sections.iter().map(Section::capacity).sum()
    }

    /// Number of roster entries this plan accounts for.
    pub fn accounted_for(&self) -> usize {
        self.seated_count() + self.pending.len() + self.excluded.len()
    }

    /// Returns true if anyone is pending.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Ids of the pending people, in pending order.
    pub fn pending_ids(&self) -> Vec<&str> {
        self.pending.iter().map(|p| p.id.as_str()).collect()
    }
}
