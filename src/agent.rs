//! One collection cycle
//!
//! Wires the pieces together: configuration, metric list, retrieval and
//! the report (or the dry-run plan).

use tracing::{debug, info};

use crate::cli::{Cli, OutputFormat};
use crate::collector::{Collector, PlannedRetrieval};
use crate::config::Config;
use crate::error::{MonitorError, MonitorResult};
use crate::metric::parse_metrics;
use crate::report::format_report;

/// Run one cycle and return the text for standard output
///
/// # Errors
/// Any error aborts the cycle; nothing of a partial run is returned.
pub async fn run(cli: &Cli) -> MonitorResult<String> {
    let invocation = cli.invocation()?;

    let mut config = Config::load_or_default(cli.config.as_ref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let style = config.retrieval.escape_style.resolve();
    let metrics = parse_metrics(&invocation.metrics, &invocation.metric_state, style)?;
    let enabled = metrics.iter().filter(|m| m.enabled).count();

    debug!(
        host = %invocation.target.host,
        port = %invocation.target.port,
        escape_style = %style,
        "Metric list parsed"
    );

    let collector = Collector::from_config(&config.retrieval);

    if cli.dry_run {
        let plan = collector.plan(&invocation.target, &metrics);
        return render_plan(&plan, cli.output_format);
    }

    info!(total = metrics.len(), enabled, "Collecting metrics");
    let metrics = collector.collect(&invocation.target, metrics).await?;
    info!(enabled, "Collection complete");

    Ok(format_report(&metrics))
}

/// Render a dry-run plan in the requested format
pub fn render_plan(plan: &[PlannedRetrieval], format: OutputFormat) -> MonitorResult<String> {
    match format {
        OutputFormat::Text => Ok(plan
            .iter()
            .map(|p| {
                format!(
                    "{}:{}:{} [{}] {}",
                    p.id,
                    p.name,
                    p.metric_type,
                    if p.enabled { "enabled" } else { "disabled" },
                    p.command
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => serde_json::to_string_pretty(plan)
            .map_err(|e| MonitorError::Internal(format!("Failed to serialize plan: {}", e))),
        OutputFormat::Yaml => serde_yaml::to_string(plan)
            .map(|yaml| yaml.trim_end().to_string())
            .map_err(|e| MonitorError::Internal(format!("Failed to serialize plan: {}", e))),
    }
}
