//! Configuration management for jmx-monitor
//!
//! Handles loading and validating the optional YAML configuration file.
//! Every value has a default, so the agent runs without a file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::metric::EscapeStyle;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading the configuration file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Error parsing the configuration file
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// External client settings
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

/// How the external JMX client is invoked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Client invocation placed after the pipe in every command template
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Per-call timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,

    /// Backslash style used for spaces inside MBean names
    #[serde(default)]
    pub escape_style: EscapeStyle,

    /// Shell that runs the command line
    #[serde(default = "default_shell")]
    pub shell: String,
}

// Default value functions
fn default_tool() -> String {
    "java -jar jmxterm.jar".to_string()
}

fn default_timeout() -> u64 {
    60_000
}

fn default_shell() -> String {
    if cfg!(windows) {
        "cmd".to_string()
    } else {
        "sh".to_string()
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            timeout_ms: default_timeout(),
            escape_style: EscapeStyle::default(),
            shell: default_shell(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file when a path is given, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retrieval.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "Retrieval timeout must be greater than 0".to_string(),
            ));
        }

        if self.retrieval.tool.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Retrieval tool must not be empty".to_string(),
            ));
        }

        if self.retrieval.shell.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Shell must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
