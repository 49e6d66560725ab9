//! CLI command implementations for Laser Arena.

pub(crate) mod play;
pub(crate) mod replay;
pub(crate) mod run;
pub(crate) mod soak;
pub(crate) mod validate;
pub(crate) mod watch;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// Structured plain-text report.
    Report,
}

/// Output format for the `replay` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReplayFormat {
    /// ASCII board with colors.
    Text,
    /// Structured plain-text report.
    Report,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `soak` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SoakFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

impl From<laser_arena::replay::RecordingError> for CliError {
    fn from(e: laser_arena::replay::RecordingError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<laser_arena::replay::ReplayError> for CliError {
    fn from(e: laser_arena::replay::ReplayError) -> Self {
        Self::new(e.to_string())
    }
}
