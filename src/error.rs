//! Error handling for the rigwatch telemetry crate.

use std::time::Duration;

/// A specialized `Result` type for rigwatch operations.
pub type Result<T> = std::result::Result<T, MonitorError>;

/// The main error type for process-level rigwatch operations.
///
/// Source adapters never surface this type; their failures are recovered
/// into degraded telemetry records via [`SourceError`].
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Web server error
    #[error("Web server error: {0}")]
    WebServer(String),
}

impl MonitorError {
    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new web server error
    pub fn web_server_error(msg: impl Into<String>) -> Self {
        Self::WebServer(msg.into())
    }
}

/// A failure while invoking or interpreting one external telemetry source.
///
/// Carried into the per-source degraded record (the `{"error": ...}` shape
/// on the wire) instead of propagating past the adapter boundary.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The external command could not be launched at all
    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The external command ran but exited unsuccessfully
    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// The external command exceeded its execution deadline
    #[error("`{command}` timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    /// The command succeeded but its output did not have the expected shape
    #[error("unparsable output from `{command}`: {reason}")]
    Parse { command: String, reason: String },

    /// A listing succeeded but lacked the configured entry
    #[error("{entry} not found")]
    MissingEntry { entry: String },
}

impl SourceError {
    /// Create a new parse error for the given command description.
    pub fn parse(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Create a new missing-entry error.
    pub fn missing_entry(entry: impl Into<String>) -> Self {
        Self::MissingEntry {
            entry: entry.into(),
        }
    }

    /// True when the underlying command ran out of time rather than failing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_error_messages_name_the_command() {
        let err = SourceError::parse("nvidia-smi", "expected 5 fields, got 2");
        assert!(err.to_string().contains("nvidia-smi"));
        assert!(err.to_string().contains("expected 5 fields"));

        let err = SourceError::Timeout {
            command: "df -h".to_string(),
            timeout: Duration::from_secs(5),
        };
        assert!(err.is_timeout());
        assert!(err.to_string().contains("df -h"));
    }

    #[test]
    fn missing_entry_reads_like_the_sentinel() {
        let err = SourceError::missing_entry("nvme0n1p2");
        assert_eq!(err.to_string(), "nvme0n1p2 not found");
    }
}
