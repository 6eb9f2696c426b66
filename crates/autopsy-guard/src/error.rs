//! Error types for autopsy-guard

use crate::report::FailureReport;
use autopsy_io::AdapterError;
use thiserror::Error;

/// Result type alias for guard operations
pub type GuardResult<T> = std::result::Result<T, GuardError>;

/// Main error type for guard operations
#[derive(Error, Debug)]
pub enum GuardError {
    /// Boundary errors from the array adapter
    #[error("Adapter error: {0}")]
    Adapter(#[from] AdapterError),

    /// Configuration loading errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A watched computation produced failures while halting was enabled
    #[error("Execution halted in {function}: {} numerical failure(s)", .failures.len())]
    Halted {
        function: String,
        failures: Vec<FailureReport>,
    },
}

/// Errors that can occur when loading a watch config from TOML
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("TOML parse error: {0}")]
    Parse(String),
}
