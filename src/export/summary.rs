//! Plain-text plan summary for the terminal.
//!
//! Prints each section as a grid of ids (tables separated by `|`), followed by
//! the pending and excluded lists.

use crate::export::labels::letter_code;
use crate::models::{AllocationResult, Person, Section};
use std::fmt::Write as _;

/// Renders a text summary of the plan.
pub fn render_summary(result: &AllocationResult) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Seating Order: {}", result.strategy.display_name());
    let _ = writeln!(output, "Fill mode: {}", result.fill_mode);
    let _ = writeln!(
        output,
        "Seated: {} of {} seats, pending: {}",
        result.seated_count(),
        result.total_capacity(),
        result.pending.len()
    );
    if !result.excluded.is_empty() {
        let _ = writeln!(output, "Excluded: {}", result.excluded.len());
    }

    for section in &result.sections {
        output.push('\n');
        render_section_grid(&mut output, section);
    }

    if result.has_pending() {
        output.push('\n');
        write_people(&mut output, "Pending", &result.pending);
    }
    if !result.excluded.is_empty() {
        output.push('\n');
        write_people(&mut output, "Excluded (gender not recognised)", &result.excluded);
    }

    output
}

fn render_section_grid(output: &mut String, section: &Section) {
    let width = section
        .occupants()
        .map(|p| p.id.chars().count())
        .max()
        .unwrap_or(0)
        .max(1);
    let seats = section.seats_per_table;
    let table_width = seats * width + seats.saturating_sub(1);

    let _ = writeln!(
        output,
        "Class {} ({} of {} seats)",
        section.index + 1,
        section.seated_count(),
        section.capacity()
    );

    let header: Vec<String> = (0..section.tables_per_row)
        .map(|t| format!("{:^table_width$}", letter_code(t)))
        .collect();
    let _ = writeln!(output, "     {}", header.join(" | ").trim_end());

    for row in 0..section.rows {
        let tables: Vec<String> = section
            .row_seats(row)
            .chunks(seats)
            .map(|table| {
                table
                    .iter()
                    .map(|seat| {
                        let id = seat.occupant.as_ref().map_or("-", |p| p.id.as_str());
                        format!("{id:<width$}")
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        let _ = writeln!(output, "{:>3}  {}", row + 1, tables.join(" | ").trim_end());
    }
}

fn write_people(output: &mut String, title: &str, people: &[Person]) {
    let _ = writeln!(output, "{title} ({}):", people.len());
    for person in people {
        let _ = writeln!(
            output,
            "  {}  {}  {}  {}  {}",
            person.id, person.name, person.department, person.subject, person.gender
        );
    }
}
