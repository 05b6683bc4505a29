//! Building and exporting seating plans.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::EXPORT_FILE_STEM;
use crate::engine;
use crate::export::{self, ExportFormat};
use crate::models::{AllocationResult, LayoutConfig, Person};

/// Service for allocating and exporting plans.
pub struct PlanService;

impl PlanService {
    /// Runs the allocation engine.
    ///
    /// Domain failures stay reachable through
    /// [`anyhow::Error::downcast_ref`] as [`crate::error::AllocationError`].
    pub fn allocate(roster: &[Person], layout: &LayoutConfig) -> Result<AllocationResult> {
        let result = engine::allocate(roster, layout).context("Allocation failed")?;
        info!(
            seated = result.seated_count(),
            pending = result.pending.len(),
            sections = result.sections.len(),
            "seating plan built"
        );
        Ok(result)
    }

    /// Renders the plan in the given format.
    pub fn render(result: &AllocationResult, format: ExportFormat) -> Result<Vec<u8>> {
        match format {
            ExportFormat::Xlsx => export::workbook_bytes(result),
            ExportFormat::Html => Ok(export::render_html(result).into_bytes()),
        }
    }

    /// Renders the plan and writes it to `path`.
    ///
    /// The parent directory is created if needed.
    pub fn write(result: &AllocationResult, format: ExportFormat, path: &Path) -> Result<()> {
        let bytes = Self::render(result, format)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
        fs::write(path, bytes)
            .with_context(|| format!("Failed to write plan: {}", path.display()))?;
        info!(path = %path.display(), %format, "plan exported");
        Ok(())
    }

    /// Default export file name for a given date: `exam_seating_plan_<date>.<ext>`.
    pub fn default_file_name(format: ExportFormat, date: NaiveDate) -> String {
        format!(
            "{EXPORT_FILE_STEM}_{}.{}",
            date.format("%Y-%m-%d"),
            format.extension()
        )
    }

    /// Default export path in `dir`, dated today.
    pub fn default_output_path(dir: &Path, format: ExportFormat) -> PathBuf {
        let today = chrono::Local::now().date_naive();
        dir.join(Self::default_file_name(format, today))
    }
}
