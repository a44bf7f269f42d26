//! JMX metric retrieval
//!
//! Metrics are retrieved one at a time, in list order, through an external
//! JMX command-line client. The first failure aborts the whole run.
//!
//! # Example
//!
//! ```ignore
//! use jmx_monitor::collector::Collector;
//!
//! let collector = Collector::from_config(&config.retrieval);
//! let metrics = collector.collect(&target, metrics).await?;
//! ```

mod client;
mod command;
mod parser;

pub use client::{CommandOutput, CommandRunner, ShellRunner};
pub use command::{build_command, build_masked_command, CommandTemplate, MASKED_PASSWORD};
pub use parser::{composite_value, extract_value, CollectResult};

use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, instrument};

use crate::config::RetrievalConfig;
use crate::error::{MonitorError, MonitorResult};
use crate::metric::{EndpointTarget, MetricSpec};

/// A retrieval as it would be executed, for dry runs
#[derive(Debug, Clone, Serialize)]
pub struct PlannedRetrieval {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub metric_type: String,
    pub enabled: bool,
    /// Command line with the password masked
    pub command: String,
}

/// Sequential metric collector
#[derive(Debug, Clone)]
pub struct Collector<R> {
    runner: R,
    tool: String,
    timeout: Duration,
}

impl Collector<ShellRunner> {
    /// Collector running commands through the configured shell
    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self::new(
            ShellRunner::new(config.shell.as_str()),
            config.tool.as_str(),
            Duration::from_millis(config.timeout_ms),
        )
    }
}

impl<R: CommandRunner> Collector<R> {
    /// Create a collector
    ///
    /// # Arguments
    /// * `runner` - Executes the command lines
    /// * `tool` - Client invocation substituted for `{TOOL}`
    /// * `timeout` - Upper bound for each retrieval
    pub fn new(runner: R, tool: impl Into<String>, timeout: Duration) -> Self {
        Self {
            runner,
            tool: tool.into(),
            timeout,
        }
    }

    /// Fill in the value of every enabled metric
    ///
    /// Retrievals run strictly one after another. On the first failure the
    /// metrics are dropped and the error is returned, so callers either get
    /// every enabled value or none.
    pub async fn collect(
        &self,
        target: &EndpointTarget,
        mut metrics: Vec<MetricSpec>,
    ) -> MonitorResult<Vec<MetricSpec>> {
        for metric in metrics.iter_mut() {
            if !metric.enabled {
                debug!(metric = %metric.id, "Metric disabled, skipping");
                continue;
            }

            match self.retrieve(target, metric).await {
                Ok(value) => metric.value = value,
                Err(source) => {
                    error!(metric = %metric.id, error = %source, "Failed to retrieve metric");
                    return Err(MonitorError::Collect {
                        id: metric.id.clone(),
                        source,
                    });
                }
            }
        }

        Ok(metrics)
    }

    /// Retrieve and validate the value of a single metric
    #[instrument(skip_all, fields(metric = %metric.id))]
    pub async fn retrieve(
        &self,
        target: &EndpointTarget,
        metric: &MetricSpec,
    ) -> CollectResult<String> {
        let command = build_command(target, metric, &self.tool);
        debug!(
            command = %build_masked_command(target, metric, &self.tool),
            "Running retrieval"
        );

        let output = self.runner.run(&command, self.timeout).await?;
        let value = extract_value(&output.stdout, metric.attr_key.as_deref())?;

        debug!(value = %value, "Metric retrieved");
        Ok(value)
    }

    /// Describe the retrievals without running them
    pub fn plan(&self, target: &EndpointTarget, metrics: &[MetricSpec]) -> Vec<PlannedRetrieval> {
        metrics
            .iter()
            .map(|metric| PlannedRetrieval {
                id: metric.id.clone(),
                name: metric.name.clone(),
                metric_type: metric.metric_type.clone(),
                enabled: metric.enabled,
                command: build_masked_command(target, metric, &self.tool),
            })
            .collect()
    }
}
