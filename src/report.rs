//! Wire output
//!
//! One line per enabled metric:
//!
//! ```text
//! ID:NAME:TYPE|VALUE|
//! ```

use crate::metric::MetricSpec;

/// Format a single report line
pub fn format_line(metric: &MetricSpec) -> String {
    format!(
        "{}:{}:{}|{}|",
        metric.id, metric.name, metric.metric_type, metric.value
    )
}

/// Format the report for all enabled metrics, in list order
///
/// Lines are joined with `\n`; there is no trailing newline. Disabled
/// metrics are left out.
pub fn format_report(metrics: &[MetricSpec]) -> String {
    metrics
        .iter()
        .filter(|metric| metric.enabled)
        .map(format_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{parse_metrics, EscapeStyle};

    fn collected(mask: &str, values: &[&str]) -> Vec<MetricSpec> {
        let list = "1127,4,m1,x:type=A Size;1128,4,m2,x:type=B Size;1129,2,m3,x:type=C Size";
        let mut metrics = parse_metrics(list, mask, EscapeStyle::Single).unwrap();
        for (metric, value) in metrics.iter_mut().zip(values) {
            if metric.enabled {
                metric.value = value.to_string();
            }
        }
        metrics
    }

    #[test]
    fn test_format_line() {
        let metrics = collected("1,1,1", &["10", "20", "30"]);
        assert_eq!(format_line(&metrics[2]), "1129:m3:2|30|");
    }

    #[test]
    fn test_report_skips_disabled() {
        let metrics = collected("1,0,1", &["10", "20", "30"]);
        assert_eq!(format_report(&metrics), "1127:m1:4|10|\n1129:m3:2|30|");
    }

    #[test]
    fn test_no_trailing_newline_when_last_is_disabled() {
        let metrics = collected("1,1,0", &["10", "20", "30"]);
        assert_eq!(format_report(&metrics), "1127:m1:4|10|\n1128:m2:4|20|");
    }

    #[test]
    fn test_empty_report() {
        let metrics = collected("0,0,0", &[]);
        assert_eq!(format_report(&metrics), "");
    }
}
