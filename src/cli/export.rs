//! Export command for writing seating plans to disk.

use crate::cli::common::{load_config, CliError, CliResult, LayoutArgs};
use crate::config::Config;
use crate::export::ExportFormat;
use crate::parser::NormalizeOptions;
use crate::services::{PlanService, RosterService};
use clap::Args;
use std::path::PathBuf;

/// Export a seating plan as an xlsx workbook or HTML page
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Roster file (.xlsx or .json)
    #[arg(short, long, value_name = "FILE")]
    pub roster: PathBuf,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Output format (xlsx or html; defaults to the configured format)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<ExportFormat>,

    /// Output path (defaults to exam_seating_plan_[date].[ext] in the configured directory)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Pad short roster rows instead of rejecting them
    #[arg(long)]
    pub lenient: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let layout = self.layout.resolve(&config)?;
        let format = self.resolve_format(&config);

        let options = NormalizeOptions {
            lenient: self.lenient,
        };
        let roster = RosterService::load(&self.roster, options)
            .map_err(|e| CliError::from_service(&e))?;
        let result =
            PlanService::allocate(&roster, &layout).map_err(|e| CliError::from_service(&e))?;

        let output_path = self.get_output_path(&config, format);
        PlanService::write(&result, format, &output_path)
            .map_err(|e| CliError::io(format!("Failed to export plan: {e:#}")))?;

        println!("✓ Exported seating plan to: {}", output_path.display());
        if result.has_pending() {
            println!("  {} student(s) could not be seated", result.pending.len());
        }

        Ok(())
    }

    /// Explicit format, else the output file's extension, else the configured default
    fn resolve_format(&self, config: &Config) -> ExportFormat {
        self.format
            .or_else(|| {
                self.output
                    .as_ref()
                    .and_then(|p| p.extension())
                    .and_then(|e| e.to_str())
                    .and_then(|e| e.parse().ok())
            })
            .unwrap_or(config.export.default_format)
    }

    /// Get the output file path (either user-specified or auto-generated)
    fn get_output_path(&self, config: &Config, format: ExportFormat) -> PathBuf {
        if let Some(ref path) = self.output {
            return path.clone();
        }
        PlanService::default_output_path(&config.export.output_dir, format)
    }
}
