//! CLI argument parsing for jmx-monitor
//!
//! This module provides the command-line interface using clap derive macros.
//!
//! # Parameters
//!
//! Six positional parameters, all required:
//!
//! ```text
//! jmx-monitor [OPTIONS] <HOST> <PORT> <METRICS> <METRIC_STATE> <USERNAME> <PASSWORD>
//! ```
//!
//! An empty USERNAME or PASSWORD disables authentication.
//!
//! # Options
//!
//! - `--config` / `-c`: Configuration file path (env: JMX_MONITOR_CONFIG)
//! - `--tool`: JMX client invocation (env: JMX_MONITOR_TOOL)
//! - `--timeout-ms`: Per-retrieval timeout in milliseconds (env: JMX_MONITOR_TIMEOUT_MS)
//! - `--escape-style`: Space escaping in MBean names (env: JMX_MONITOR_ESCAPE_STYLE)
//! - `--shell`: Shell running the command lines (env: JMX_MONITOR_SHELL)
//! - `--log-level` / `-l`: Log level (env: JMX_MONITOR_LOG_LEVEL)
//! - `--dry-run`: Print the planned retrievals instead of running them
//! - `--output-format`: Output format for --dry-run (text/json/yaml)
//!
//! # Precedence
//!
//! 1. CLI arguments
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{MonitorError, MonitorResult};
use crate::metric::{EndpointTarget, EscapeStyle};

/// Number of positional parameters
pub const PARAMETER_COUNT: usize = 6;

/// jmx-monitor - one-shot JMX metric collection
///
/// Retrieves each configured MBean attribute through an external JMX
/// client and prints one `ID:NAME:TYPE|VALUE|` line per enabled metric.
#[derive(Parser, Debug)]
#[command(name = "jmx-monitor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// HOST PORT METRICS METRIC_STATE USERNAME PASSWORD
    #[arg(value_name = "PARAMS", num_args = 0.., allow_hyphen_values = true)]
    pub params: Vec<String>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", env = "JMX_MONITOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// JMX client invocation (overrides config file)
    #[arg(long, value_name = "COMMAND", env = "JMX_MONITOR_TOOL")]
    pub tool: Option<String>,

    /// Per-retrieval timeout in milliseconds (overrides config file)
    #[arg(long, value_name = "MS", env = "JMX_MONITOR_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Backslash style for spaces in MBean names (overrides config file)
    #[arg(long, value_enum, env = "JMX_MONITOR_ESCAPE_STYLE")]
    pub escape_style: Option<EscapeStyle>,

    /// Shell running the command lines (overrides config file)
    #[arg(long, value_name = "SHELL", env = "JMX_MONITOR_SHELL")]
    pub shell: Option<String>,

    /// Log level, written to stderr
    #[arg(
        short,
        long,
        value_enum,
        default_value = "warn",
        env = "JMX_MONITOR_LOG_LEVEL"
    )]
    pub log_level: LogLevel,

    /// Print the planned retrievals instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for --dry-run
    #[arg(long, value_enum, default_value = "text")]
    pub output_format: OutputFormat,
}

/// Positional parameters after normalisation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub target: EndpointTarget,
    /// `;`-separated metric list
    pub metrics: String,
    /// `,`-separated enable mask
    pub metric_state: String,
}

impl Cli {
    /// Validate and normalise the positional parameters
    ///
    /// Double quotes are removed from every parameter but HOST and PORT.
    pub fn invocation(&self) -> MonitorResult<Invocation> {
        let [host, port, metrics, metric_state, username, password] =
            <&[String; PARAMETER_COUNT]>::try_from(self.params.as_slice()).map_err(|_| {
                MonitorError::InvalidParametersNumber {
                    expected: PARAMETER_COUNT,
                    actual: self.params.len(),
                }
            })?;

        let clean = |value: &str| value.replace('"', "");

        Ok(Invocation {
            target: EndpointTarget::new(
                host.as_str(),
                port.as_str(),
                &clean(username),
                &clean(password),
            ),
            metrics: clean(metrics),
            metric_state: clean(metric_state),
        })
    }

    /// Apply CLI and environment overrides on top of a loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(tool) = &self.tool {
            config.retrieval.tool = tool.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.retrieval.timeout_ms = timeout_ms;
        }
        if let Some(style) = self.escape_style {
            config.retrieval.escape_style = style;
        }
        if let Some(shell) = &self.shell {
            config.retrieval.shell = shell.clone();
        }
    }
}

/// Log level options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Trace level - most verbose
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warn level - default
    Warn,
    /// Error level - least verbose
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Output format options for dry-run mode
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}
