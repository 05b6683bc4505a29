//! Laying a section's slice onto its seat grid.

use crate::models::{Section, Slot};

/// A filled section and the slots that did not fit on its grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// The filled grid
    pub section: Section,
    /// Slots left over once every seat was visited
    pub overflow: Vec<Slot>,
}

/// Places `slots` onto a `rows × tables_per_row × seats_per_table` grid.
///
/// Seats are visited row by row, table by table, seat by seat; each takes the
/// next slot, or stays empty once the slice runs out.
pub fn assign(
    index: usize,
    slots: Vec<Slot>,
    rows: usize,
    tables_per_row: usize,
    seats_per_table: usize,
) -> Placement {
    let mut section = Section::empty(index, rows, tables_per_row, seats_per_table);
    let mut slots = slots.into_iter();
    for seat in &mut section.seats {
        match slots.next() {
            Some(slot) => seat.occupant = slot,
            None => break,
        }
    }
    Placement {
        section,
        overflow: slots.collect(),
    }
}
