//! Export functionality for seating plans.
//!
//! This module renders an [`crate::models::AllocationResult`] as an xlsx
//! workbook, a standalone HTML page, or a plain-text terminal summary.

pub mod html;
pub mod labels;
pub mod summary;
pub mod workbook;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use html::render_html;
pub use summary::render_summary;
pub use workbook::workbook_bytes;

/// File format of an exported plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Office Open XML workbook
    #[default]
    Xlsx,
    /// Standalone HTML page
    Html,
}

impl ExportFormat {
    /// File extension without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "html" | "htm" => Ok(Self::Html),
            other => Err(format!(
                "Unknown export format '{other}' (expected xlsx or html)"
            )),
        }
    }
}
