//! Watch configuration
//!
//! A config is read from the `[watch]` table of a TOML file:
//!
//! ```toml
//! [watch]
//! verbose = false
//! halt_on_failure = true
//! mode = "lenient"
//! neutralize = true
//! ```
//!
//! Missing keys keep their defaults.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// File name looked up under `.autopsy/` directories
pub const CONFIG_FILE_NAME: &str = "watch.toml";

/// How failures found by a watch are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardMode {
    /// Report failures; never touch results
    #[default]
    Strict,
    /// Report failures and neutralize returned values when enabled
    Lenient,
}

impl fmt::Display for GuardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardMode::Strict => write!(f, "strict"),
            GuardMode::Lenient => write!(f, "lenient"),
        }
    }
}

/// Settings for a [`Watch`](crate::Watch)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Log an info event when a watched call finishes clean
    pub verbose: bool,
    /// Inspect the named inputs before running
    pub inspect_args: bool,
    /// Inspect the returned value after running
    pub inspect_return: bool,
    /// Return an error instead of the value when any failure was found
    pub halt_on_failure: bool,
    /// Replace NaN/Inf in the returned value (lenient mode only)
    pub neutralize: bool,
    pub mode: GuardMode,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            verbose: true,
            inspect_args: true,
            inspect_return: true,
            halt_on_failure: false,
            neutralize: false,
            mode: GuardMode::Strict,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    watch: WatchConfig,
}

impl WatchConfig {
    /// Lenient mode with neutralized outputs
    pub fn lenient() -> Self {
        Self {
            mode: GuardMode::Lenient,
            neutralize: true,
            ..Self::default()
        }
    }

    /// Whether returned values get neutralized
    pub fn neutralizes(&self) -> bool {
        self.neutralize && self.mode == GuardMode::Lenient
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(file.watch)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Candidate config files in load order
    pub fn standard_paths(project_root: Option<&Path>) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".autopsy").join(CONFIG_FILE_NAME));
        }
        if let Some(root) = project_root {
            paths.push(root.join(".autopsy").join(CONFIG_FILE_NAME));
        }
        paths
    }

    /// Load the config from standard locations
    ///
    /// Looks in order at the defaults, user (~/.autopsy/watch.toml), then
    /// project (.autopsy/watch.toml). The last file found wins as a whole.
    pub fn load_standard(project_root: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for path in Self::standard_paths(project_root) {
            if path.exists() {
                tracing::debug!("Loading watch config from {:?}", path);
                config = Self::load(&path)?;
            }
        }
        Ok(config)
    }
}
