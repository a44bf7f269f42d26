//! Metric descriptors and the metric-list language
//!
//! A run is described by a `;`-separated metric list and a `,`-separated
//! enable mask. This module turns both into an ordered list of
//! [`MetricSpec`] values that the collector fills in.
//!
//! # Example
//!
//! ```
//! use jmx_monitor::metric::{parse_metrics, EscapeStyle};
//!
//! let metrics = parse_metrics(
//!     "1127,4,m1,org.apache.activemq:brokerName=localhost,type=Broker AverageMessageSize,0",
//!     "1",
//!     EscapeStyle::Single,
//! )
//! .unwrap();
//!
//! assert_eq!(metrics[0].domain.as_deref(), Some("org.apache.activemq"));
//! assert!(metrics[0].enabled);
//! ```

mod mbean;
mod parser;

pub use mbean::{escape_spaces, resolve_attribute_key, AttributeKey, EscapeStyle};
pub use parser::{parse_entry, parse_metrics};

use serde::Serialize;

/// JMX endpoint targeted by the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTarget {
    /// Host name or IP address
    pub host: String,
    /// Port, passed to the client as-is
    pub port: String,
    /// Username and password, present only when both are non-empty
    pub credentials: Option<Credentials>,
}

/// JMX authentication pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl EndpointTarget {
    /// Create a target; empty username or password means no authentication
    pub fn new(
        host: impl Into<String>,
        port: impl Into<String>,
        username: &str,
        password: &str,
    ) -> Self {
        let credentials = if username.is_empty() || password.is_empty() {
            if !username.is_empty() || !password.is_empty() {
                tracing::warn!("Only one of username/password given, authentication disabled");
            }
            None
        } else {
            Some(Credentials {
                username: username.to_string(),
                password: password.to_string(),
            })
        };

        Self {
            host: host.into(),
            port: port.into(),
            credentials,
        }
    }
}

/// One configured metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricSpec {
    /// Metric identifier, first field of the entry
    pub id: String,
    /// Metric type, second field of the entry
    #[serde(rename = "type")]
    pub metric_type: String,
    /// Metric name, third field of the entry
    pub name: String,
    /// MBean domain split off the specifier
    pub domain: Option<String>,
    /// MBean object name and attribute, spaces escaped for the client
    pub mbean: String,
    /// Composite-data key selected from the attribute value
    pub attr_key: Option<String>,
    /// Whether the enable mask selects this metric
    pub enabled: bool,
    /// Retrieved value, empty until collected
    pub value: String,
}
