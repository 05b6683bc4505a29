//! Strategies command: list the available ordering strategies.

use crate::cli::common::{CliError, CliResult};
use crate::models::OrderingStrategy;
use clap::Args;
use serde::Serialize;

/// List the seat ordering strategies
#[derive(Debug, Clone, Args)]
pub struct StrategiesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One strategy as listed by the CLI and the web API.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StrategyInfo {
    /// Identifier accepted by `--strategy`
    pub key: &'static str,
    /// Name shown above rendered plans
    pub display_name: &'static str,
    /// What the strategy does
    pub description: &'static str,
    /// Whether the ordering can leave seats empty
    pub leaves_gaps: bool,
}

impl From<OrderingStrategy> for StrategyInfo {
    fn from(strategy: OrderingStrategy) -> Self {
        Self {
            key: strategy.key(),
            display_name: strategy.display_name(),
            description: strategy.description(),
            leaves_gaps: strategy.leaves_gaps(),
        }
    }
}

/// All strategies in menu order.
pub fn strategy_list() -> Vec<StrategyInfo> {
    OrderingStrategy::ALL.into_iter().map(StrategyInfo::from).collect()
}

impl StrategiesArgs {
    /// Execute the strategies command
    pub fn execute(&self) -> CliResult<()> {
        let strategies = strategy_list();

        if self.json {
            let json = serde_json::to_string_pretty(&strategies)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
            println!("{json}");
            return Ok(());
        }

        let width = strategies.iter().map(|s| s.key.len()).max().unwrap_or(0);
        for info in &strategies {
            println!("{:<width$}  {}", info.key, info.display_name);
            println!("{:<width$}  {}", "", info.description);
        }
        Ok(())
    }
}
