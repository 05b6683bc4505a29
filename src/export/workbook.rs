//! Seating plan workbook (xlsx) export.
//!
//! One sheet per section named `Class_<n>`, plus a `Pending_Students` sheet
//! when anyone was left without a seat. Section sheets carry two header rows
//! (table letters merged across their seats, then seat labels) followed by one
//! row per grid row: the 1-based row number, then each seat's id in scan order.

use crate::constants::{PENDING_SHEET_NAME, SECTION_SHEET_PREFIX};
use crate::export::labels::{cell_ref, letter_code, seat_label};
use crate::models::{AllocationResult, Cell, Section};
use crate::parser::ROSTER_HEADER;
use anyhow::{ensure, Context, Result};
use std::fmt::Write as _;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Column width (in characters) of section sheets.
pub const SECTION_COLUMN_WIDTH: f64 = 18.0;

/// A worksheet ready to be serialized.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetPlan {
    /// Sheet tab name
    pub name: String,
    /// Cell values by row
    pub rows: Vec<Vec<Cell>>,
    /// Merged ranges as `(row, first_col, last_col)`, all 0-based
    pub merges: Vec<(usize, usize, usize)>,
    /// Uniform width for the used columns, if set
    pub column_width: Option<f64>,
    /// Rows whose every cell is centred
    pub centred_rows: usize,
    /// Centre the first column of the remaining rows
    pub centre_first_column: bool,
}

impl SheetPlan {
    fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    fn is_centred(&self, row: usize, col: usize) -> bool {
        row < self.centred_rows || (col == 0 && self.centre_first_column)
    }
}

/// Lays out one section as a sheet.
pub fn section_sheet(section: &Section) -> SheetPlan {
    let seats = section.seats_per_table;
    let tables = section.tables_per_row;

    let mut letters = vec![Cell::Empty];
    let mut labels = vec![Cell::Empty];
    let mut merges = Vec::new();
    for table in 0..tables {
        letters.push(Cell::Text(letter_code(table)));
        letters.extend(std::iter::repeat_n(Cell::Empty, seats - 1));
        for seat in 0..seats {
            labels.push(Cell::Text(seat_label(seats, seat)));
        }
        if seats > 1 {
            let first = 1 + table * seats;
            merges.push((0, first, first + seats - 1));
        }
    }

    let mut rows = vec![letters, labels];
    for row in 0..section.rows {
        let mut cells = Vec::with_capacity(1 + tables * seats);
        cells.push(Cell::Number((row + 1) as f64));
        cells.extend(section.row_seats(row).iter().map(|seat| {
            seat.occupant
                .as_ref()
                .map_or(Cell::Empty, |person| person.id_cell())
        }));
        rows.push(cells);
    }

    SheetPlan {
        name: format!("{SECTION_SHEET_PREFIX}{}", section.index + 1),
        rows,
        merges,
        column_width: Some(SECTION_COLUMN_WIDTH),
        centred_rows: 2,
        centre_first_column: true,
    }
}

/// Lays out the pending list as a sheet, or `None` if nobody is pending.
pub fn pending_sheet(result: &AllocationResult) -> Option<SheetPlan> {
    if !result.has_pending() {
        return None;
    }
    let mut rows = vec![ROSTER_HEADER.iter().map(|h| Cell::from(*h)).collect()];
    rows.extend(result.pending.iter().map(|p| p.roster_cells().to_vec()));
    Some(SheetPlan {
        name: PENDING_SHEET_NAME.to_string(),
        rows,
        ..SheetPlan::default()
    })
}

/// All sheets of the plan, in tab order.
pub fn plan_sheets(result: &AllocationResult) -> Vec<SheetPlan> {
    let mut sheets: Vec<SheetPlan> = result.sections.iter().map(section_sheet).collect();
    sheets.extend(pending_sheet(result));
    sheets
}

/// Serializes the plan as xlsx bytes.
pub fn workbook_bytes(result: &AllocationResult) -> Result<Vec<u8>> {
    write_sheets(&plan_sheets(result))
}

/// Packs sheets into an xlsx container.
pub fn write_sheets(sheets: &[SheetPlan]) -> Result<Vec<u8>> {
    ensure!(!sheets.is_empty(), "A workbook needs at least one sheet");

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut parts = vec![
        ("[Content_Types].xml".to_string(), content_types_xml(sheets.len())),
        ("_rels/.rels".to_string(), ROOT_RELS.to_string()),
        ("xl/workbook.xml".to_string(), workbook_xml(sheets)),
        (
            "xl/_rels/workbook.xml.rels".to_string(),
            workbook_rels_xml(sheets.len()),
        ),
        ("xl/styles.xml".to_string(), STYLES.to_string()),
    ];
    for (idx, sheet) in sheets.iter().enumerate() {
        parts.push((
            format!("xl/worksheets/sheet{}.xml", idx + 1),
            worksheet_xml(sheet),
        ));
    }

    for (name, content) in parts {
        zip.start_file(name.as_str(), options)
            .with_context(|| format!("Failed to start {name}"))?;
        zip.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write {name}"))?;
    }
    let cursor = zip.finish().context("Failed to finish workbook archive")?;
    Ok(cursor.into_inner())
}

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

// Style 0 is the default, style 1 centres horizontally and vertically.
const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0" applyAlignment="1"><alignment horizontal="center" vertical="center"/></xf></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#;

fn content_types_xml(sheet_count: usize) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push_str(r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#);
    xml.push_str(r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#);
    for idx in 1..=sheet_count {
        let _ = write!(
            xml,
            r#"<Override PartName="/xl/worksheets/sheet{idx}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        );
    }
    xml.push_str("</Types>");
    xml
}

fn workbook_xml(sheets: &[SheetPlan]) -> String {
    let mut xml = String::from(XML_DECL);
    let _ = write!(xml, r#"<workbook xmlns="{MAIN_NS}" xmlns:r="{REL_NS}"><sheets>"#);
    for (idx, sheet) in sheets.iter().enumerate() {
        let _ = write!(
            xml,
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape_xml(&sheet.name),
            idx + 1,
            idx + 1
        );
    }
    xml.push_str("</sheets></workbook>");
    xml
}

fn workbook_rels_xml(sheet_count: usize) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for idx in 1..=sheet_count {
        let _ = write!(
            xml,
            r#"<Relationship Id="rId{idx}" Type="{REL_NS}/worksheet" Target="worksheets/sheet{idx}.xml"/>"#
        );
    }
    let _ = write!(
        xml,
        r#"<Relationship Id="rId{}" Type="{REL_NS}/styles" Target="styles.xml"/>"#,
        sheet_count + 1
    );
    xml.push_str("</Relationships>");
    xml
}

fn worksheet_xml(sheet: &SheetPlan) -> String {
    let mut xml = String::from(XML_DECL);
    let _ = write!(xml, r#"<worksheet xmlns="{MAIN_NS}" xmlns:r="{REL_NS}">"#);

    let columns = sheet.column_count();
    if let (Some(width), true) = (sheet.column_width, columns > 0) {
        let _ = write!(
            xml,
            r#"<cols><col min="1" max="{columns}" width="{width}" customWidth="1"/></cols>"#
        );
    }

    xml.push_str("<sheetData>");
    for (r, row) in sheet.rows.iter().enumerate() {
        let _ = write!(xml, r#"<row r="{}">"#, r + 1);
        for (c, cell) in row.iter().enumerate() {
            let style = if sheet.is_centred(r, c) { r#" s="1""# } else { "" };
            write_cell(&mut xml, &cell_ref(r, c), style, cell);
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData>");

    if !sheet.merges.is_empty() {
        let _ = write!(xml, r#"<mergeCells count="{}">"#, sheet.merges.len());
        for &(row, first, last) in &sheet.merges {
            let _ = write!(
                xml,
                r#"<mergeCell ref="{}:{}"/>"#,
                cell_ref(row, first),
                cell_ref(row, last)
            );
        }
        xml.push_str("</mergeCells>");
    }

    xml.push_str("</worksheet>");
    xml
}

fn write_cell(xml: &mut String, reference: &str, style: &str, cell: &Cell) {
    match cell {
        Cell::Empty if style.is_empty() => {}
        Cell::Empty => {
            let _ = write!(xml, r#"<c r="{reference}"{style}/>"#);
        }
        Cell::Number(n) if n.is_finite() => {
            let _ = write!(xml, r#"<c r="{reference}"{style}><v>{n}</v></c>"#);
        }
        Cell::Bool(b) => {
            let _ = write!(
                xml,
                r#"<c r="{reference}"{style} t="b"><v>{}</v></c>"#,
                u8::from(*b)
            );
        }
        Cell::Number(_) | Cell::Text(_) => {
            let _ = write!(
                xml,
                r#"<c r="{reference}"{style} t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                escape_xml(&cell.to_string())
            );
        }
    }
}

/// Escapes text for XML content and attribute values.
///
/// Control characters that XML 1.0 cannot carry are dropped.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if c < ' ' => {}
            c => out.push(c),
        }
    }
    out
}
