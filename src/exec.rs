//! Time-bounded execution of external telemetry commands.
//!
//! Every adapter invocation goes through [`ExternalCommand`], which wraps
//! `tokio::process` with a hard deadline so a wedged external tool degrades
//! one telemetry field instead of hanging the request that triggered it.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use crate::error::SourceError;

/// One external command an adapter is configured to run.
///
/// The program and arguments are fixed at construction; adapters never build
/// command lines from request data. The child is killed if the deadline
/// elapses or the caller goes away.
#[derive(Debug, Clone)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ExternalCommand {
    /// Create a command with the default execution deadline.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout: crate::DEFAULT_COMMAND_TIMEOUT,
        }
    }

    /// Set the execution deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The command line as a human-readable string, used in error records.
    pub fn describe(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    /// Run the command once and return its stdout as text.
    ///
    /// Fails with [`SourceError::Spawn`] when the binary cannot be launched,
    /// [`SourceError::Failed`] on a non-zero exit (stderr captured into the
    /// message), and [`SourceError::Timeout`] when the deadline elapses. No
    /// retries; one child process per call.
    pub async fn read_stdout(&self) -> Result<String, SourceError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(SourceError::Spawn {
                    command: self.describe(),
                    source,
                })
            }
            // Dropping the output future kills the child (kill_on_drop).
            Err(_elapsed) => {
                return Err(SourceError::Timeout {
                    command: self.describe(),
                    timeout: self.timeout,
                })
            }
        };

        if !output.status.success() {
            return Err(SourceError::Failed {
                command: self.describe(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
