//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::export::ExportFormat;
use crate::models::{FillMode, OrderingStrategy};
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Default)]
pub struct ConfigSetArgs {
    /// Default rows of tables per hall
    #[arg(long, value_name = "N")]
    rows: Option<usize>,

    /// Default tables per row
    #[arg(long, value_name = "N")]
    tables_per_row: Option<usize>,

    /// Default seats per table
    #[arg(long, value_name = "N")]
    seats_per_table: Option<usize>,

    /// Default number of halls
    #[arg(long, value_name = "N")]
    sections: Option<usize>,

    /// Default ordering strategy
    #[arg(long, value_name = "NAME")]
    strategy: Option<OrderingStrategy>,

    /// Default fill mode (contiguous or spread)
    #[arg(long, value_name = "MODE")]
    fill_mode: Option<FillMode>,

    /// Directory exported plans are written to
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Default export format (xlsx or html)
    #[arg(long, value_name = "FORMAT")]
    format: Option<ExportFormat>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            let json = serde_json::to_string_pretty(&config).map_err(|e| {
                CliError::io(format!("Failed to serialize configuration to JSON: {e}"))
            })?;
            println!("{json}");
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    fn is_empty(&self) -> bool {
        self.rows.is_none()
            && self.tables_per_row.is_none()
            && self.seats_per_table.is_none()
            && self.sections.is_none()
            && self.strategy.is_none()
            && self.fill_mode.is_none()
            && self.output_dir.is_none()
            && self.format.is_none()
    }

    /// Applies the given values to `config`.
    fn apply(&self, config: &mut Config) {
        let layout = &mut config.layout;
        if let Some(rows) = self.rows {
            layout.rows = rows;
        }
        if let Some(tables) = self.tables_per_row {
            layout.tables_per_row = tables;
        }
        if let Some(seats) = self.seats_per_table {
            layout.seats_per_table = seats;
        }
        if let Some(sections) = self.sections {
            layout.sections = sections;
        }
        if let Some(strategy) = self.strategy {
            layout.strategy = strategy;
        }
        if let Some(fill_mode) = self.fill_mode {
            layout.fill_mode = fill_mode;
        }
        if let Some(path) = &self.output_dir {
            config.export.output_dir.clone_from(path);
        }
        if let Some(format) = self.format {
            config.export.default_format = format;
        }
    }

    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.is_empty() {
            return Err(CliError::validation(
                "At least one configuration option must be specified (see `config set --help`)",
            ));
        }

        let mut config = Config::load().unwrap_or_default();
        self.apply(&mut config);

        config
            .validate()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        if let Some(path) = &self.output_dir {
            std::fs::create_dir_all(path).map_err(|e| {
                CliError::io(format!(
                    "Failed to create output directory {}: {}",
                    path.display(),
                    e
                ))
            })?;
        }

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("Hall Seat Configuration");
    println!("=======================");
    println!();

    let layout = &config.layout;
    println!("Layout:");
    println!("  Rows:             {}", layout.rows);
    println!("  Tables per row:   {}", layout.tables_per_row);
    println!("  Seats per table:  {}", layout.seats_per_table);
    println!("  Halls:            {}", layout.sections);
    println!("  Strategy:         {}", layout.strategy);
    println!("  Fill mode:        {}", layout.fill_mode);
    println!();

    println!("Export:");
    println!("  Output Directory: {}", config.export.output_dir.display());
    println!("  Default Format:   {}", config.export.default_format);
    println!();
}
