//! Seat allocation engine.
//!
//! The pipeline is: order the roster ([`ordering`]), split the sequence across
//! sections ([`distribute`]), snake each slice when the strategy is serpentine,
//! then lay each section's slice onto its grid ([`grid`]). Everything is recomputed from scratch on each call; the only
//! non-deterministic input is the random number generator used by the
//! random strategy.

pub mod distribute;
pub mod grid;
pub mod ordering;

use crate::error::{AllocationError, Result};
use crate::models::{AllocationResult, FillMode, LayoutConfig, OrderingStrategy, Person, Slot};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};
use tracing::debug;

pub use distribute::{distribute, spread_sizes, Distribution};
pub use grid::{assign, Placement};
pub use ordering::{arrange, serpentine, Arrangement};

/// Allocates seats for `roster`.
///
/// The random strategy uses `config.seed` when set and the thread RNG otherwise.
pub fn allocate(roster: &[Person], config: &LayoutConfig) -> Result<AllocationResult> {
    match config.seed {
        Some(seed) => allocate_with_rng(roster, config, &mut StdRng::seed_from_u64(seed)),
        None => allocate_with_rng(roster, config, &mut rand::rng()),
    }
}

/// Allocates seats for `roster` drawing randomness from `rng`.
///
/// Fails before any ordering runs if the configuration is invalid or two
/// roster entries share an id. Running out of seats is not an error: the
/// overflow is returned as `pending`.
pub fn allocate_with_rng<R: Rng + ?Sized>(
    roster: &[Person],
    config: &LayoutConfig,
    rng: &mut R,
) -> Result<AllocationResult> {
    config.validate()?;
    check_unique_ids(roster)?;

    debug!(
        strategy = %config.strategy,
        fill_mode = %config.fill_mode,
        roster = roster.len(),
        capacity = config.total_capacity(),
        "allocating seats"
    );
    if config.constraints.any() {
        debug!(
            constraints = ?config.constraints,
            "seating constraints are recorded but not enforced"
        );
    }

    let arrangement = arrange(roster, config, rng);
    let ordered = arrangement.slots;
    let Distribution { buckets, remainder } = distribute(ordered.clone(), config);

    let mut sections = Vec::with_capacity(buckets.len());
    let mut overflow = Vec::new();
    for (index, bucket) in buckets.into_iter().enumerate() {
        let bucket = if config.strategy == OrderingStrategy::Serpentine {
            let people = bucket.into_iter().flatten().collect();
            serpentine(people, config.rows, config.seats_per_row())
        } else {
            bucket
        };
        let placement = assign(
            index,
            bucket,
            config.rows,
            config.tables_per_row,
            config.seats_per_table,
        );
        overflow.extend(placement.overflow);
        sections.push(placement.section);
    }

    let pending = match config.fill_mode {
        FillMode::Contiguous => people(remainder.into_iter().chain(overflow)),
        FillMode::Spread => {
            let placed: HashSet<&str> = sections
                .iter()
                .flat_map(|section| section.occupants())
                .map(|person| person.id.as_str())
                .collect();
            ordered
                .iter()
                .flatten()
                .filter(|person| !placed.contains(person.id.as_str()))
                .cloned()
                .collect()
        }
    };

    let result = AllocationResult {
        strategy: config.strategy,
        fill_mode: config.fill_mode,
        sections,
        pending,
        excluded: arrangement.excluded,
    };

    debug!(
        seated = result.seated_count(),
        pending = result.pending.len(),
        excluded = result.excluded.len(),
        "allocation finished"
    );

    Ok(result)
}

fn people(slots: impl Iterator<Item = Slot>) -> Vec<Person> {
    slots.flatten().collect()
}

/// Rejects rosters where two entries share an id.
///
/// Pending entries in spread mode are found by id, so duplicates would make
/// people vanish from (or appear twice in) the plan.
pub fn check_unique_ids(roster: &[Person]) -> Result<()> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(roster.len());
    for (idx, person) in roster.iter().enumerate() {
        let row = sheet_row(person, idx);
        if let Some(first_row) = seen.insert(person.id.as_str(), row) {
            return Err(AllocationError::DuplicateIdentifier {
                id: person.id.clone(),
                first_row,
                second_row: row,
            });
        }
    }
    Ok(())
}

/// Sheet row of a roster entry, falling back to its position after the header.
fn sheet_row(person: &Person, idx: usize) -> usize {
    if person.source_row > 0 {
        person.source_row
    } else {
        idx + 2
    }
}
