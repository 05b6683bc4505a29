//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use crate::constants::{CONFIG_DIR_ENV, CONFIG_DIR_NAME};
use crate::export::ExportFormat;
use crate::models::LayoutConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory exported plans are written to when no output path is given
    pub output_dir: PathBuf,
    /// Format used when no format is given
    pub default_format: ExportFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            default_format: ExportFormat::default(),
        }
    }
}

/// Application configuration.
///
/// Stored as TOML at:
/// - Linux: `~/.config/hallseat/config.toml`
/// - macOS: `~/Library/Application Support/hallseat/config.toml`
/// - Windows: `%APPDATA%\hallseat\config.toml`
///
/// The directory can be overridden with the `HALLSEAT_CONFIG_DIR` environment
/// variable.
///
/// # Validation
///
/// - every `[layout]` dimension must be at least 1
/// - `export.output_dir` must not be empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Default hall layout and allocation policy
    pub layout: LayoutConfig,
    /// Export settings
    pub export: ExportConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// Uses `HALLSEAT_CONFIG_DIR` when set, otherwise the platform config
    /// directory joined with `hallseat`.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        self.layout
            .validate()
            .context("Invalid [layout] configuration")?;

        if self.export.output_dir.as_os_str().is_empty() {
            anyhow::bail!("Invalid [export] configuration: output_dir must not be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FillMode, OrderingStrategy};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.layout.rows, 5);
        assert_eq!(config.layout.tables_per_row, 5);
        assert_eq!(config.layout.seats_per_table, 2);
        assert_eq!(config.layout.sections, 1);
        assert_eq!(config.layout.strategy, OrderingStrategy::Sequential);
        assert_eq!(config.export.default_format, ExportFormat::Xlsx);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::new();
        assert!(config.validate().is_ok());

        config.layout.sections = 0;
        let err = config.validate().unwrap_err();
        assert!(format!("{err:#}").contains("sections"));

        config.layout.sections = 1;
        config.export.output_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");

        let mut config = Config::new();
        config.layout.rows = 8;
        config.layout.strategy = OrderingStrategy::EvenOdd;
        config.layout.fill_mode = FillMode::Spread;
        config.export.default_format = ExportFormat::Html;

        // Manually save to temp location for testing
        let content = toml::to_string_pretty(&config).unwrap();
        fs::write(&config_file, content).unwrap();

        let content = fs::read_to_string(&config_file).unwrap();
        let loaded: Config = toml::from_str(&content).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str(
            r#"
[layout]
rows = 3
tablesPerRow = 4
studentsPerTable = 3
classes = 2
seatingType = "serpentine"
"#,
        )
        .unwrap();
        assert_eq!(loaded.layout.seats_per_table, 3);
        assert_eq!(loaded.layout.sections, 2);
        assert_eq!(loaded.layout.strategy, OrderingStrategy::Serpentine);
        assert_eq!(loaded.export, ExportConfig::default());
    }
}
