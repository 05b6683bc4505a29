//! CLI command handlers for hallseat.
//!
//! This module provides headless, scriptable access to the seating planner
//! for automation and testing.

pub mod allocate;
pub mod common;
pub mod config;
pub mod export;
pub mod strategies;
pub mod validate;

use clap::Subcommand;

// Re-export types used by main.rs and tests
pub use allocate::AllocateArgs;
pub use common::{CliError, CliResult, ExitCode, LayoutArgs};
pub use config::ConfigArgs;
pub use export::ExportArgs;
pub use strategies::StrategiesArgs;
pub use validate::ValidateArgs;

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Allocate seats for a roster and print the plan
    Allocate(AllocateArgs),
    /// Export a seating plan as an xlsx workbook or HTML page
    Export(ExportArgs),
    /// Validate a roster file
    Validate(ValidateArgs),
    /// List the seat ordering strategies
    Strategies(StrategiesArgs),
    /// Show or change the saved defaults
    Config(ConfigArgs),
}

impl Command {
    /// Runs the selected subcommand.
    pub fn execute(&self) -> CliResult<()> {
        match self {
            Self::Allocate(args) => args.execute(),
            Self::Export(args) => args.execute(),
            Self::Validate(args) => args.execute(),
            Self::Strategies(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}
