//! Ingester configuration.
//!
//! Values are layered: built-in defaults, then the optional YAML file, then
//! command-line flags and their environment variables.

use std::path::PathBuf;

use anyhow::Result;
use clap::ValueEnum;
use ingestion::{IngestOptions, SerialPolicy};
use serde::{Deserialize, Serialize};

pub const DEFAULT_INPUT: &str = "sites-new.csv";
pub const DEFAULT_OUTPUT: &str = "src/data/sites.json";

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level ingester configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngesterConfig {
    /// Source CSV export
    pub input: PathBuf,

    /// JSON artifact read by the website
    pub output: PathBuf,

    /// Handling of unparsable serial numbers
    pub serial_policy: SerialPolicy,

    /// Rows per progress report
    pub batch_size: usize,

    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Values given on the command line (or via their environment variables).
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub strict_serials: bool,
    pub batch_size: Option<usize>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

impl Default for IngesterConfig {
    fn default() -> Self {
        let defaults = IngestOptions::default();
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            serial_policy: defaults.serial_policy,
            batch_size: defaults.batch_size,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl IngesterConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        crate::config_loader::load_config(path)
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(input) = overrides.input {
            self.input = input;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if overrides.strict_serials {
            self.serial_policy = SerialPolicy::Strict;
        }
        if let Some(batch_size) = overrides.batch_size {
            self.batch_size = batch_size;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level.to_lowercase();
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
    }

    /// Check the final values before the run starts.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.input.as_os_str().is_empty(),
            "Input path cannot be empty"
        );
        anyhow::ensure!(
            !self.output.as_os_str().is_empty(),
            "Output path cannot be empty"
        );
        anyhow::ensure!(
            self.input != self.output,
            "Output path must differ from input path: {}",
            self.input.display()
        );
        anyhow::ensure!(self.batch_size > 0, "batch_size must be greater than 0");
        anyhow::ensure!(
            VALID_LEVELS.contains(&self.logging.level.as_str()),
            "Invalid log level: {}. Must be one of: {:?}",
            self.logging.level,
            VALID_LEVELS
        );
        Ok(())
    }

    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            serial_policy: self.serial_policy,
            batch_size: self.batch_size,
        }
    }
}
