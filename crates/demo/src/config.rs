//! Environment-driven configuration for the demo driver.

use core::str::FromStr;

use ledger_observability::{LogFormat, ParseLogFormatError};
use thiserror::Error;

pub const LOG_FORMAT_VAR: &str = "LEDGER_LOG_FORMAT";
pub const OUTPUT_VAR: &str = "LEDGER_OUTPUT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("LEDGER_LOG_FORMAT: {0}")]
    LogFormat(#[from] ParseLogFormatError),

    #[error("LEDGER_OUTPUT: unknown output `{0}` (expected `text` or `json`)")]
    Output(String),
}

/// How account histories are printed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::Output(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DemoConfig {
    pub log_format: LogFormat,
    pub output: OutputFormat,
}

impl DemoConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(v) => v.parse::<LogFormat>()?,
            None => LogFormat::default(),
        };
        let output = match lookup(OUTPUT_VAR) {
            Some(v) => v.parse::<OutputFormat>()?,
            None => OutputFormat::default(),
        };
        Ok(Self { log_format, output })
    }
}
