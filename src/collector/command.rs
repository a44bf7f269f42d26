//! Retrieval command lines
//!
//! Every retrieval pipes a `get` instruction into the external client.
//! The template depends only on whether the metric has a domain and
//! whether the target has credentials.

use crate::metric::{EndpointTarget, MetricSpec};

/// Password shown in logs and dry-run plans
pub const MASKED_PASSWORD: &str = "****";

/// The four command line shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandTemplate {
    Cmd,
    CmdAuth,
    CmdDomain,
    CmdDomainAuth,
}

impl CommandTemplate {
    /// Pick the template for a (domain present, credentials present) pair
    pub fn select(has_domain: bool, has_auth: bool) -> Self {
        match (has_domain, has_auth) {
            (false, false) => CommandTemplate::Cmd,
            (false, true) => CommandTemplate::CmdAuth,
            (true, false) => CommandTemplate::CmdDomain,
            (true, true) => CommandTemplate::CmdDomainAuth,
        }
    }

    /// Template text with `{...}` placeholders
    pub fn pattern(self) -> &'static str {
        match self {
            CommandTemplate::Cmd => {
                "echo get -s -b {MBEAN} | {TOOL} -l {HOSTNAME}:{PORT} -v silent -n"
            }
            CommandTemplate::CmdAuth => {
                "echo get -s -b {MBEAN} | {TOOL} -l {HOSTNAME}:{PORT} -v silent -n -u {USERNAME} -p {PASSWORD}"
            }
            CommandTemplate::CmdDomain => {
                "echo get -s -d {DOMAIN} -b {MBEAN} | {TOOL} -l {HOSTNAME}:{PORT} -v silent -n"
            }
            CommandTemplate::CmdDomainAuth => {
                "echo get -s -d {DOMAIN} -b {MBEAN} | {TOOL} -l {HOSTNAME}:{PORT} -v silent -n -u {USERNAME} -p {PASSWORD}"
            }
        }
    }
}

/// Build the command line that retrieves `metric` from `target`
///
/// Substitution is literal. The values are not shell-quoted; spaces in
/// the MBean were already escaped by the metric parser.
pub fn build_command(target: &EndpointTarget, metric: &MetricSpec, tool: &str) -> String {
    render(target, metric, tool, false)
}

/// Same as [`build_command`] with the password replaced by [`MASKED_PASSWORD`]
pub fn build_masked_command(target: &EndpointTarget, metric: &MetricSpec, tool: &str) -> String {
    render(target, metric, tool, true)
}

fn render(target: &EndpointTarget, metric: &MetricSpec, tool: &str, mask: bool) -> String {
    let template = CommandTemplate::select(metric.domain.is_some(), target.credentials.is_some());

    let (username, password) = match &target.credentials {
        Some(creds) if mask => (creds.username.as_str(), MASKED_PASSWORD),
        Some(creds) => (creds.username.as_str(), creds.password.as_str()),
        None => ("", ""),
    };

    template
        .pattern()
        .replace("{TOOL}", tool)
        .replace("{DOMAIN}", metric.domain.as_deref().unwrap_or_default())
        .replace("{MBEAN}", &metric.mbean)
        .replace("{HOSTNAME}", &target.host)
        .replace("{PORT}", &target.port)
        .replace("{USERNAME}", username)
        .replace("{PASSWORD}", password)
}
