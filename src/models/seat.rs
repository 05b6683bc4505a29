//! Seats, sections and the scan order that addresses them.

use crate::models::Person;
use serde::{Deserialize, Serialize};

/// A position in an ordered sequence: a person, or a deliberately empty seat.
pub type Slot = Option<Person>;

/// One physical seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    /// 0-based row within the section
    pub row: usize,
    /// 0-based table within the row
    pub table: usize,
    /// 0-based seat within the table
    pub seat: usize,
    /// Person sitting here, if any
    pub occupant: Option<Person>,
}

impl Seat {
    /// Returns true if nobody sits here.
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// One hall: a fully sized grid of seats.
///
/// Seats are stored in canonical scan order: row-major, then table-major
/// within a row, then seat-minor within a table. Exports depend on this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// 0-based section index
    pub index: usize,
    /// Rows of tables
    pub rows: usize,
    /// Tables per row
    pub tables_per_row: usize,
    /// Seats per table
    pub seats_per_table: usize,
    /// All seats in scan order
    pub seats: Vec<Seat>,
}

impl Section {
    /// Creates a section whose seats are all empty.
    pub fn empty(index: usize, rows: usize, tables_per_row: usize, seats_per_table: usize) -> Self {
        let mut seats = Vec::with_capacity(rows * tables_per_row * seats_per_table);
        for row in 0..rows {
            for table in 0..tables_per_row {
                for seat in 0..seats_per_table {
                    seats.push(Seat {
                        row,
                        table,
                        seat,
                        occupant: None,
                    });
                }
            }
        }
        Self {
            index,
            rows,
            tables_per_row,
            seats_per_table,
            seats,
        }
    }

    /// Number of seats in the grid.
    pub fn capacity(&self) -> usize {
        self.seats.len()
    }

    /// Position of a coordinate in scan order.
    pub const fn scan_index(&self, row: usize, table: usize, seat: usize) -> usize {
        (row * self.tables_per_row + table) * self.seats_per_table + seat
    }

    /// Looks up a seat by coordinate.
    pub fn seat_at(&self, row: usize, table: usize, seat: usize) -> Option<&Seat> {
        if row >= self.rows || table >= self.tables_per_row || seat >= self.seats_per_table {
            return None;
        }
        self.seats.get(self.scan_index(row, table, seat))
    }

    /// The seats of one row, in scan order.
    pub fn row_seats(&self, row: usize) -> &[Seat] {
        let width = self.tables_per_row * self.seats_per_table;
        let start = (row * width).min(self.seats.len());
        let end = (start + width).min(self.seats.len());
        &self.seats[start..end]
    }

    /// Seated people in scan order.
    pub fn occupants(&self) -> impl Iterator<Item = &Person> {
        self.seats.iter().filter_map(|seat| seat.occupant.as_ref())
    }

    /// Number of occupied seats.
    pub fn seated_count(&self) -> usize {
        self.occupants().count()
    }

    /// Returns true if every seat is taken.
    pub fn is_full(&self) -> bool {
        self.seats.iter().all(|seat| seat.occupant.is_some())
    }

    /// Ids of the seated people in scan order.
    pub fn seated_ids(&self) -> Vec<&str> {
        self.occupants().map(|person| person.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_section_is_in_scan_order() {
        let section = Section::empty(0, 2, 2, 3);
        assert_eq!(section.capacity(), 12);

        let coords: Vec<_> = section
            .seats
            .iter()
            .map(|s| (s.row, s.table, s.seat))
            .collect();
        assert_eq!(coords[0], (0, 0, 0));
        assert_eq!(coords[2], (0, 0, 2));
        assert_eq!(coords[3], (0, 1, 0));
        assert_eq!(coords[6], (1, 0, 0));
        assert_eq!(coords[11], (1, 1, 2));
    }

    #[test]
    fn test_seat_at_matches_scan_index() {
        let section = Section::empty(0, 3, 2, 2);
        let seat = section.seat_at(2, 1, 0).unwrap();
        assert_eq!((seat.row, seat.table, seat.seat), (2, 1, 0));
        assert_eq!(section.scan_index(2, 1, 0), 10);
        assert!(section.seat_at(3, 0, 0).is_none());
        assert!(section.seat_at(0, 0, 2).is_none());
    }

    #[test]
    fn test_row_seats() {
        let section = Section::empty(0, 2, 3, 1);
        let row = section.row_seats(1);
        assert_eq!(row.len(), 3);
        assert!(row.iter().all(|s| s.row == 1));
        assert!(section.row_seats(5).is_empty());
    }
}
