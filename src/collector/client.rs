//! External command runner
//!
//! Retrievals are shell command lines; the runner executes one, waits for
//! it under a timeout and hands back its captured output.

use std::future::Future;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use super::parser::CollectResult;
use crate::error::CollectorError;

/// Captured output of a successful command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Executes retrieval command lines
pub trait CommandRunner {
    /// Run `command` and wait at most `timeout` for it
    ///
    /// A spawn failure, an unsuccessful exit and a timeout are all errors.
    fn run(
        &self,
        command: &str,
        timeout: Duration,
    ) -> impl Future<Output = CollectResult<CommandOutput>> + Send;
}

/// Runs command lines through a system shell
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    /// Create a runner for the given shell (`sh`, `bash`, `cmd`, ...)
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    /// Flag that makes the shell read the command from its arguments
    fn command_flag(&self) -> &'static str {
        let name = self
            .shell
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or_default();
        if name.eq_ignore_ascii_case("cmd") || name.eq_ignore_ascii_case("cmd.exe") {
            "/C"
        } else {
            "-c"
        }
    }
}

impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str, timeout: Duration) -> CollectResult<CommandOutput> {
        let child = Command::new(&self.shell)
            .arg(self.command_flag())
            .arg(command)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        // Dropping the future on timeout kills the shell.
        let output = match tokio::time::timeout(timeout, child).await {
            Ok(result) => result.map_err(|source| CollectorError::Spawn {
                shell: self.shell.clone(),
                source,
            })?,
            Err(_) => {
                warn!(timeout_ms = timeout.as_millis() as u64, "Command timed out");
                return Err(CollectorError::Timeout(timeout.as_millis() as u64));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(CollectorError::ExitStatus {
                code: output.status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        debug!(bytes = stdout.len(), "Command completed");

        Ok(CommandOutput { stdout, stderr })
    }
}
