//! Minimal xlsx reader.
//!
//! Reads cell values (shared strings, inline strings, numbers, booleans) from
//! every worksheet of an Office Open XML workbook. Styles, formulas and
//! merged regions are ignored; a formula cell yields its cached value.

use crate::export::labels::parse_cell_ref;
use crate::models::Cell;
use anyhow::{anyhow, bail, Context, Result};
use regex::Regex;
use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Rows in an xlsx worksheet.
const MAX_SHEET_ROWS: usize = 1_048_576;

/// Columns in an xlsx worksheet (`A` to `XFD`).
const MAX_SHEET_COLUMNS: usize = 16_384;

/// A worksheet's name and its rows of cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    /// Sheet tab name
    pub name: String,
    /// Rows in order; missing rows are empty, missing cells are [`Cell::Empty`]
    pub rows: Vec<Vec<Cell>>,
}

/// All worksheets of a workbook, in tab order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    /// Worksheets in tab order
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// First worksheet, if any.
    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }

    /// Worksheet by tab name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

/// Reads a workbook file.
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read workbook: {}", path.display()))?;
    read_workbook_bytes(&bytes).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Reads the first sheet of a workbook file as rows.
pub fn read_first_sheet_rows(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let workbook = read_workbook(path)?;
    workbook
        .sheets
        .into_iter()
        .next()
        .map(|sheet| sheet.rows)
        .ok_or_else(|| anyhow!("Workbook has no sheets: {}", path.display()))
}

/// Reads a workbook from memory.
pub fn read_workbook_bytes(bytes: &[u8]) -> Result<Workbook> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).context("Not an xlsx file (zip container expected)")?;
    let patterns = Patterns::new()?;

    let workbook_xml = read_part(&mut archive, "xl/workbook.xml")?
        .ok_or_else(|| anyhow!("Missing xl/workbook.xml"))?;
    let rels_xml = read_part(&mut archive, "xl/_rels/workbook.xml.rels")?.unwrap_or_default();
    let shared = match read_part(&mut archive, "xl/sharedStrings.xml")? {
        Some(xml) => patterns.shared_strings(&xml),
        None => Vec::new(),
    };

    let targets = patterns.relationship_targets(&rels_xml);
    let mut sheets = Vec::new();
    for (name, rel_id) in patterns.sheet_entries(&workbook_xml) {
        let target = targets
            .get(&rel_id)
            .cloned()
            .unwrap_or_else(|| format!("xl/worksheets/sheet{}.xml", sheets.len() + 1));
        let xml = read_part(&mut archive, &target)?
            .ok_or_else(|| anyhow!("Missing worksheet part {target} for sheet '{name}'"))?;
        let rows = patterns
            .sheet_rows(&xml, &shared)
            .with_context(|| format!("Failed to read sheet '{name}'"))?;
        sheets.push(Sheet { name, rows });
    }

    Ok(Workbook { sheets })
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("Failed to open {name}")),
    };
    let mut content = String::new();
    file.read_to_string(&mut content)
        .with_context(|| format!("Failed to read {name}"))?;
    Ok(Some(content))
}

/// Compiled patterns for the handful of SpreadsheetML elements we read.
struct Patterns {
    sheet: Regex,
    relationship: Regex,
    attr: Regex,
    shared_item: Regex,
    text_run: Regex,
    row: Regex,
    cell: Regex,
    value: Regex,
    entity: Regex,
}

impl Patterns {
    fn new() -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern).with_context(|| format!("Invalid pattern: {pattern}"))
        };
        Ok(Self {
            sheet: compile(r"<sheet\b([^>]*?)/?>")?,
            relationship: compile(r"<Relationship\b([^>]*?)/?>")?,
            attr: compile(r#"([\w:]+)\s*=\s*"([^"]*)""#)?,
            shared_item: compile(r"(?s)<si>(.*?)</si>")?,
            text_run: compile(r"(?s)<t(?:\s[^>]*)?>(.*?)</t>")?,
            row: compile(r"(?s)<row\b([^>]*?)(?:/>|>(.*?)</row>)")?,
            cell: compile(r"(?s)<c\b([^>]*?)(?:/>|>(.*?)</c>)")?,
            value: compile(r"(?s)<v>(.*?)</v>")?,
            entity: compile(r"&(amp|lt|gt|quot|apos|#x[0-9A-Fa-f]+|#[0-9]+);")?,
        })
    }

    fn attrs(&self, fragment: &str) -> HashMap<String, String> {
        self.attr
            .captures_iter(fragment)
            .map(|c| (c[1].to_string(), self.unescape(&c[2])))
            .collect()
    }

    /// `(name, relationship id)` of each `<sheet>` in tab order.
    fn sheet_entries(&self, workbook_xml: &str) -> Vec<(String, String)> {
        self.sheet
            .captures_iter(workbook_xml)
            .map(|c| {
                let attrs = self.attrs(&c[1]);
                let name = attrs.get("name").cloned().unwrap_or_default();
                let rel_id = attrs.get("r:id").cloned().unwrap_or_default();
                (name, rel_id)
            })
            .collect()
    }

    /// Relationship id to archive path.
    fn relationship_targets(&self, rels_xml: &str) -> HashMap<String, String> {
        self.relationship
            .captures_iter(rels_xml)
            .filter_map(|c| {
                let attrs = self.attrs(&c[1]);
                let id = attrs.get("Id")?.clone();
                let target = attrs.get("Target")?;
                let path = match target.strip_prefix('/') {
                    Some(absolute) => absolute.to_string(),
                    None => format!("xl/{target}"),
                };
                Some((id, path))
            })
            .collect()
    }

    fn shared_strings(&self, xml: &str) -> Vec<String> {
        self.shared_item
            .captures_iter(xml)
            .map(|c| self.text(&c[1]))
            .collect()
    }

    /// Concatenated `<t>` runs of a string item.
    fn text(&self, fragment: &str) -> String {
        self.text_run
            .captures_iter(fragment)
            .map(|c| self.unescape(&c[1]))
            .collect()
    }

    fn sheet_rows(&self, xml: &str, shared: &[String]) -> Result<Vec<Vec<Cell>>> {
        let mut rows: Vec<Vec<Cell>> = Vec::new();
        for row_caps in self.row.captures_iter(xml) {
            let row_attrs = self.attrs(&row_caps[1]);
            let row_index = row_attrs
                .get("r")
                .and_then(|r| r.parse::<usize>().ok())
                .and_then(|r| r.checked_sub(1))
                .unwrap_or(rows.len());
            if row_index >= MAX_SHEET_ROWS {
                bail!(
                    "Row {} is past the last worksheet row ({MAX_SHEET_ROWS})",
                    row_index + 1
                );
            }
            while rows.len() < row_index {
                rows.push(Vec::new());
            }

            let mut cells: Vec<Cell> = Vec::new();
            if let Some(body) = row_caps.get(2) {
                for cell_caps in self.cell.captures_iter(body.as_str()) {
                    let attrs = self.attrs(&cell_caps[1]);
                    let col = attrs
                        .get("r")
                        .and_then(|r| parse_cell_ref(r))
                        .map_or(cells.len(), |(_, col)| col);
                    if col >= MAX_SHEET_COLUMNS {
                        bail!(
                            "Cell {} is past the last worksheet column ({MAX_SHEET_COLUMNS})",
                            attrs.get("r").map_or("?", String::as_str)
                        );
                    }
                    let inner = cell_caps.get(2).map_or("", |m| m.as_str());
                    let value = self.cell_value(attrs.get("t").map(String::as_str), inner, shared);
                    if cells.len() <= col {
                        cells.resize(col + 1, Cell::Empty);
                    }
                    cells[col] = value;
                }
            }
            while matches!(cells.last(), Some(Cell::Empty)) {
                cells.pop();
            }

            if row_index < rows.len() {
                rows[row_index] = cells;
            } else {
                rows.push(cells);
            }
        }
        while matches!(rows.last(), Some(row) if row.is_empty()) {
            rows.pop();
        }
        Ok(rows)
    }

    fn cell_value(&self, cell_type: Option<&str>, inner: &str, shared: &[String]) -> Cell {
        let raw = self
            .value
            .captures(inner)
            .map(|c| self.unescape(&c[1]));
        match cell_type {
            Some("s") => raw
                .and_then(|r| r.trim().parse::<usize>().ok())
                .and_then(|idx| shared.get(idx))
                .map_or(Cell::Empty, |s| Cell::Text(s.clone())),
            Some("inlineStr") => Cell::Text(self.text(inner)),
            Some("str") | Some("e") => raw.map_or(Cell::Empty, Cell::Text),
            Some("b") => raw.map_or(Cell::Empty, |r| Cell::Bool(r.trim() == "1")),
            _ => match raw {
                Some(r) => match r.trim().parse::<f64>() {
                    Ok(n) => Cell::Number(n),
                    Err(_) => Cell::Text(r),
                },
                None => Cell::Empty,
            },
        }
    }

    fn unescape(&self, text: &str) -> String {
        self.entity
            .replace_all(text, |c: &regex::Captures| {
                let entity = &c[1];
                match entity {
                    "amp" => "&".to_string(),
                    "lt" => "<".to_string(),
                    "gt" => ">".to_string(),
                    "quot" => "\"".to_string(),
                    "apos" => "'".to_string(),
                    _ => {
                        let code = match entity.strip_prefix("#x") {
                            Some(hex) => u32::from_str_radix(hex, 16).ok(),
                            None => entity[1..].parse::<u32>().ok(),
                        };
                        code.and_then(char::from_u32)
                            .map_or_else(|| c[0].to_string(), String::from)
                    }
                }
            })
            .into_owned()
    }
}
