//! jmx-monitor library
//!
//! This crate provides the pieces of a one-shot JMX metric collection
//! agent: the metric-list language, retrieval through an external JMX
//! command-line client, and the line-oriented report.

pub mod agent;
pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod metric;
pub mod report;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging subsystem
///
/// Logs go to stderr; stdout carries the report.
///
/// # Arguments
/// * `level` - Log level string (trace, debug, info, warn, error)
///
/// # Errors
/// Returns an error if the logging system fails to initialize
pub fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
