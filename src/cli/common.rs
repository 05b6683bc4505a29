//! Shared CLI plumbing: errors, exit codes and layout flags.

use crate::config::Config;
use crate::error::AllocationError;
use crate::models::{FillMode, LayoutConfig, OrderingStrategy};
use clap::Args;
use std::fmt;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Invalid input: bad roster, bad layout, failed validation
    Validation = 1,
    /// File system or serialization failure
    Io = 2,
}

impl ExitCode {
    /// Numeric code passed to [`std::process::exit`].
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// A CLI failure with the exit code it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code category
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Invalid input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// I/O or serialization failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Io,
            message: message.into(),
        }
    }

    /// Classifies an error from the service layer.
    ///
    /// Domain errors anywhere in the chain count as validation failures;
    /// everything else is treated as I/O.
    pub fn from_service(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");
        if err.downcast_ref::<AllocationError>().is_some() {
            Self::validation(message)
        } else {
            Self::io(message)
        }
    }

    /// Exit code for this error.
    pub const fn exit_code(&self) -> i32 {
        self.kind.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<AllocationError> for CliError {
    fn from(err: AllocationError) -> Self {
        Self::validation(err.to_string())
    }
}

/// Result type for CLI command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Hall layout flags shared by `allocate` and `export`.
///
/// Unset flags fall back to the `[layout]` section of the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct LayoutArgs {
    /// Rows of tables per hall
    #[arg(long, value_name = "N")]
    pub rows: Option<usize>,

    /// Tables in each row
    #[arg(long, value_name = "N")]
    pub tables_per_row: Option<usize>,

    /// Seats at each table
    #[arg(long, visible_alias = "students-per-table", value_name = "N")]
    pub seats_per_table: Option<usize>,

    /// Number of parallel halls
    #[arg(long, visible_alias = "classes", value_name = "N")]
    pub sections: Option<usize>,

    /// Ordering strategy (sequential, serpentine, alternate, evenOdd, genderAlternating, random)
    #[arg(short, long, value_name = "NAME")]
    pub strategy: Option<OrderingStrategy>,

    /// How people are split across halls (contiguous or spread)
    #[arg(long, value_name = "MODE")]
    pub fill_mode: Option<FillMode>,

    /// Seed for the random strategy
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,
}

impl LayoutArgs {
    /// Builds the layout from these flags over the configured defaults.
    pub fn resolve(&self, config: &Config) -> CliResult<LayoutConfig> {
        let base = &config.layout;
        let layout = LayoutConfig {
            rows: self.rows.unwrap_or(base.rows),
            tables_per_row: self.tables_per_row.unwrap_or(base.tables_per_row),
            seats_per_table: self.seats_per_table.unwrap_or(base.seats_per_table),
            sections: self.sections.unwrap_or(base.sections),
            strategy: self.strategy.unwrap_or(base.strategy),
            fill_mode: self.fill_mode.unwrap_or(base.fill_mode),
            constraints: base.constraints,
            seed: self.seed.or(base.seed),
        };
        layout.validate()?;
        Ok(layout)
    }
}

/// Loads the config file, falling back to defaults if it can't be read.
pub fn load_config() -> Config {
    Config::load().unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable configuration: {e:#}");
        Config::default()
    })
}
