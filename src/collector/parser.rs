//! Client output parsing
//!
//! The client prints either a scalar or, for composite attributes, one
//! `key = value;` line per field.

use crate::error::CollectorError;

/// Collector operation result type
pub type CollectResult<T> = Result<T, CollectorError>;

/// Turn raw client output into a metric value
///
/// The output is trimmed and must not be empty. With an attribute key the
/// value is narrowed to that key. The final value must be a scalar, i.e.
/// free of `=`.
pub fn extract_value(stdout: &str, attr_key: Option<&str>) -> CollectResult<String> {
    let raw = stdout.trim();
    if raw.is_empty() {
        return Err(CollectorError::EmptyOutput);
    }

    let value = match attr_key {
        Some(key) => {
            composite_value(raw, key).ok_or_else(|| CollectorError::KeyNotFound(key.to_string()))?
        }
        None => raw.to_string(),
    };

    if value.contains('=') {
        return Err(CollectorError::UnparsedValue(value));
    }

    Ok(value)
}

/// Value of `key` in `key = value;` formatted output
///
/// Only the first line mentioning the key is considered. That line must
/// split into exactly two pieces on `=`.
pub fn composite_value(output: &str, key: &str) -> Option<String> {
    let line = output.lines().find(|line| line.contains(key))?;

    let mut parts = line.trim().split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(value), None) => Some(value.trim().replacen(';', "", 1)),
        _ => None,
    }
}
