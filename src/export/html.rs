//! Seating plan as a standalone HTML page.

use crate::export::labels::{letter_code, seat_label};
use crate::models::{AllocationResult, Person, Section};
use std::fmt::Write as _;

const STYLE: &str = "body{font-family:sans-serif;background:#f5faff;margin:24px 40px;color:#333}\
h2,h3,.order{color:#1976d2}\
table{border-collapse:collapse;width:100%;background:#fafdff;margin-bottom:32px}\
th{background:#1976d2;color:#fff;padding:10px 8px;text-align:center}\
td{border:1px solid #e0e0e0;padding:10px 8px;text-align:center;min-width:100px}\
td.row{background:#1976d2;color:#fff;font-weight:600;border:none}\
td.taken{background:#e3f2fd}\
.id{font-weight:600}.gender{font-size:13px;color:#1976d2}.dept{font-size:12px}\
.pending th{background:#d32f2f}.pending td{text-align:left}\
.total{color:#d32f2f;font-weight:600}";

/// Renders the whole plan as an HTML document.
pub fn render_html(result: &AllocationResult) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>Exam Hall Seating Plan</title>\n");
    let _ = writeln!(out, "<style>{STYLE}</style>");
    out.push_str("</head>\n<body>\n<h2>Exam Hall Seating Plan</h2>\n");

    let _ = write!(
        out,
        "<p class=\"order\">Seating Order: {}",
        escape_html(result.strategy.display_name())
    );
    if result.sections.len() > 1 {
        let _ = write!(out, " (Showing {} classes/halls)", result.sections.len());
    }
    out.push_str("</p>\n");

    if result.sections.is_empty() {
        out.push_str("<p>No data to display.</p>\n");
    }
    for section in &result.sections {
        render_section(&mut out, section);
    }
    if result.has_pending() {
        render_pending(&mut out, &result.pending);
    }

    out.push_str("</body>\n</html>\n");
    out
}

/// Renders one section's grid as a `<table>`.
pub fn render_section(out: &mut String, section: &Section) {
    let seats = section.seats_per_table;
    let _ = writeln!(out, "<h3>Class {}</h3>", section.index + 1);
    out.push_str("<table class=\"section\">\n<thead>\n<tr><th rowspan=\"2\"></th>");
    for table in 0..section.tables_per_row {
        let _ = write!(out, "<th colspan=\"{seats}\">{}</th>", letter_code(table));
    }
    out.push_str("</tr>\n<tr>");
    for _ in 0..section.tables_per_row {
        for seat in 0..seats {
            let _ = write!(out, "<th>{}</th>", seat_label(seats, seat));
        }
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in 0..section.rows {
        let _ = write!(out, "<tr><td class=\"row\">{}</td>", row + 1);
        for seat in section.row_seats(row) {
            match &seat.occupant {
                Some(person) => {
                    let _ = write!(
                        out,
                        "<td class=\"taken\"><div class=\"id\">{}</div><div class=\"gender\">{}</div><div class=\"dept\">{} | {}</div></td>",
                        escape_html(&person.id),
                        escape_html(&person.gender),
                        escape_html(&person.department),
                        escape_html(&person.subject)
                    );
                }
                None => out.push_str("<td></td>"),
            }
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

fn render_pending(out: &mut String, pending: &[Person]) {
    out.push_str("<h3>Pending Students (Not Seated)</h3>\n<table class=\"pending\">\n<thead>\n");
    out.push_str("<tr><th>Roll No</th><th>Name</th><th>Department</th><th>Subject</th><th>Gender</th></tr>\n");
    out.push_str("</thead>\n<tbody>\n");
    for person in pending {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&person.id),
            escape_html(&person.name),
            escape_html(&person.department),
            escape_html(&person.subject),
            escape_html(&person.gender)
        );
    }
    out.push_str("</tbody>\n</table>\n");
    let _ = writeln!(out, "<p class=\"total\">Total Pending: {}</p>", pending.len());
}

/// Escapes text for HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::allocate;
    use crate::models::{LayoutConfig, OrderingStrategy};

    fn person(id: &str, gender: &str) -> Person {
        Person::from_row(vec![
            id.into(),
            format!("Student {id}").into(),
            "CS".into(),
            "Maths".into(),
            gender.into(),
        ])
    }

    #[test]
    fn test_render_section_headers() {
        let config = LayoutConfig::new(1, 2, 3, 1).unwrap();
        let result = allocate(&[person("1", "F")], &config).unwrap();
        let html = render_html(&result);

        assert!(html.contains("<h3>Class 1</h3>"));
        assert!(html.contains("<th colspan=\"3\">A</th><th colspan=\"3\">B</th>"));
        assert!(html.contains("<th>Left</th><th>Middle</th><th>Right</th>"));
        assert!(html.contains("<div class=\"dept\">CS | Maths</div>"));
        assert!(html.contains("Seating Order: Sequential Order (Row-wise)"));
        assert!(!html.contains("Pending Students"));
    }

    #[test]
    fn test_render_pending_and_strategy() {
        let config = LayoutConfig::new(1, 1, 1, 2)
            .unwrap()
            .with_strategy(OrderingStrategy::EvenOdd);
        let people: Vec<_> = ["1", "2", "3"].iter().map(|id| person(id, "M")).collect();
        let html = render_html(&allocate(&people, &config).unwrap());

        assert!(html.contains("(Showing 2 classes/halls)"));
        assert!(html.contains("Pending Students (Not Seated)"));
        assert!(html.contains("Total Pending: 1"));
        assert!(html.contains(OrderingStrategy::EvenOdd.display_name()));
    }

    #[test]
    fn test_text_is_escaped() {
        let config = LayoutConfig::new(1, 1, 1, 1).unwrap();
        let result = allocate(&[person("<b>1</b>", "F")], &config).unwrap();
        let html = render_html(&result);
        assert!(html.contains("&lt;b&gt;1&lt;/b&gt;"));
        assert!(!html.contains("<b>1</b>"));
    }
}
