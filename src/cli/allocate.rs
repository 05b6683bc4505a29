//! Allocate command: build a plan and print it.

use crate::cli::common::{load_config, CliError, CliResult, LayoutArgs};
use crate::export::render_summary;
use crate::parser::NormalizeOptions;
use crate::services::{PlanService, RosterService};
use clap::Args;
use std::path::PathBuf;

/// Allocate seats for a roster and print the plan
#[derive(Debug, Clone, Args)]
pub struct AllocateArgs {
    /// Roster file (.xlsx or .json)
    #[arg(short, long, value_name = "FILE")]
    pub roster: PathBuf,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Pad short roster rows instead of rejecting them
    #[arg(long)]
    pub lenient: bool,

    /// Output the plan as JSON
    #[arg(long)]
    pub json: bool,
}

impl AllocateArgs {
    /// Execute the allocate command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let layout = self.layout.resolve(&config)?;

        let options = NormalizeOptions {
            lenient: self.lenient,
        };
        let roster = RosterService::load(&self.roster, options)
            .map_err(|e| CliError::from_service(&e))?;
        let result =
            PlanService::allocate(&roster, &layout).map_err(|e| CliError::from_service(&e))?;

        if self.json {
            let json = serde_json::to_string_pretty(&result)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
            println!("{json}");
        } else {
            print!("{}", render_summary(&result));
        }

        Ok(())
    }
}
