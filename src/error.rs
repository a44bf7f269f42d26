//! Error types for jmx-monitor
//!
//! Every failure of a run is reduced to one [`ErrorKind`], and every kind
//! maps to exactly one process exit code.

use thiserror::Error;

/// Closed set of failure kinds reported to the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong number of positional parameters
    InvalidParametersNumber,
    /// A metric could not be parsed, retrieved or validated
    MetricNotFound,
    /// Connectivity-level timeout.
    ///
    /// Reserved: the per-call process timeout is reported as
    /// [`ErrorKind::MetricNotFound`], so nothing produces this kind today.
    RequestTimedOut,
    /// Anything else
    Other,
}

impl ErrorKind {
    /// Process exit code for this kind
    pub const fn exit_code(self) -> i32 {
        match self {
            ErrorKind::InvalidParametersNumber => 3,
            ErrorKind::MetricNotFound => 8,
            ErrorKind::RequestTimedOut => 14,
            ErrorKind::Other => 1,
        }
    }
}

/// Metric-list parsing errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SpecError {
    /// Entry has fewer than the three leading fields, or one of them is empty
    #[error("Metric entry {index} is missing its {field} field")]
    MissingField { index: usize, field: &'static str },

    /// MBean specifier with more than one ':'
    #[error("Ambiguous domain in MBean specifier '{specifier}'")]
    AmbiguousDomain { specifier: String },
}

/// Retrieval errors for a single metric
#[derive(Error, Debug)]
pub enum CollectorError {
    /// The shell could not be started
    #[error("Failed to start shell '{shell}': {source}")]
    Spawn {
        shell: String,
        #[source]
        source: std::io::Error,
    },

    /// The command exited unsuccessfully
    #[error("Command exited with {}: {stderr}", .code.map(|c| format!("status {}", c)).unwrap_or_else(|| "a signal".to_string()))]
    ExitStatus { code: Option<i32>, stderr: String },

    /// The command did not finish in time and was abandoned
    #[error("Command timed out after {0}ms")]
    Timeout(u64),

    /// Nothing but whitespace on standard output
    #[error("Empty output")]
    EmptyOutput,

    /// Composite key absent from the output
    #[error("Attribute key '{0}' not found in output")]
    KeyNotFound(String),

    /// The value still holds a '=' and is not a scalar
    #[error("Unparsed value '{0}'")]
    UnparsedValue(String),
}

/// Application error type
#[derive(Error, Debug)]
pub enum MonitorError {
    /// Invocation did not carry the expected positional parameters
    #[error("Wrong number of parameters: expected {expected}, got {actual}")]
    InvalidParametersNumber { expected: usize, actual: usize },

    /// Metric list could not be parsed
    #[error("Invalid metric list: {0}")]
    Spec(#[from] SpecError),

    /// A metric could not be retrieved
    #[error("Metric {id} not retrieved: {source}")]
    Collect {
        id: String,
        #[source]
        source: CollectorError,
    },

    /// Connectivity-level timeout, see [`ErrorKind::RequestTimedOut`]
    #[error("Request timed out")]
    RequestTimedOut,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MonitorError {
    /// Failure kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MonitorError::InvalidParametersNumber { .. } => ErrorKind::InvalidParametersNumber,
            MonitorError::Spec(_) | MonitorError::Collect { .. } => ErrorKind::MetricNotFound,
            MonitorError::RequestTimedOut => ErrorKind::RequestTimedOut,
            MonitorError::Config(_) | MonitorError::Internal(_) => ErrorKind::Other,
        }
    }

    /// Exit code for this error
    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }

    /// Line printed on standard output before exiting, if any
    ///
    /// Metric failures print nothing so that a failed run leaves the
    /// report channel empty.
    pub fn wire_message(&self) -> Option<String> {
        match self.kind() {
            ErrorKind::InvalidParametersNumber => Some("Wrong number of parameters.".to_string()),
            ErrorKind::RequestTimedOut => {
                Some("Timeout. Verify hostname/ipaddress and JMX settings.".to_string())
            }
            ErrorKind::MetricNotFound => None,
            ErrorKind::Other => Some(self.to_string()),
        }
    }
}

/// Result type alias for application errors
pub type MonitorResult<T> = Result<T, MonitorError>;
