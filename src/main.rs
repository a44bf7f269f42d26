//! jmx-monitor - one-shot JMX metric collection agent
//!
//! Prints one `ID:NAME:TYPE|VALUE|` line per enabled metric and exits with
//! a code describing the outcome.

use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;
use tracing::{error, info};

use jmx_monitor::agent;
use jmx_monitor::cli::Cli;
use jmx_monitor::error::ErrorKind;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => e.exit(),
            _ => {
                e.print().ok();
                std::process::exit(ErrorKind::InvalidParametersNumber.exit_code());
            }
        },
    };

    if let Err(e) = jmx_monitor::init_logging(&cli.log_level.to_string()) {
        eprintln!("{e}");
        std::process::exit(ErrorKind::Other.exit_code());
    }

    info!(version = env!("CARGO_PKG_VERSION"), "Starting jmx-monitor");

    match agent::run(&cli).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
        }
        Err(e) => {
            error!(error = %e, exit_code = e.exit_code(), "Collection failed");
            if let Some(message) = e.wire_message() {
                println!("{message}");
            }
            std::process::exit(e.exit_code());
        }
    }
}
