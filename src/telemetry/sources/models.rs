//! Loaded-model listing from the containerized Ollama server.

use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::SourceError;
use crate::exec::ExternalCommand;
use crate::telemetry::data::ModelProcess;

lazy_static! {
    /// Column separator of the `ollama ps` table: runs of two or more
    /// spaces, so values like "6.7 GB" and "100% GPU" survive intact.
    static ref COLUMNS_RE: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// Runs `ollama ps` inside the configured container and parses the table
/// it prints.
#[derive(Debug, Clone)]
pub struct ModelListSource {
    command: ExternalCommand,
}

impl ModelListSource {
    pub fn new(container: impl AsRef<str>, timeout: Duration) -> Self {
        Self {
            command: ExternalCommand::new(
                "docker",
                ["exec", container.as_ref(), "ollama", "ps"],
            )
            .with_timeout(timeout),
        }
    }

    pub async fn poll(&self) -> Result<Vec<ModelProcess>, SourceError> {
        let stdout = self.command.read_stdout().await?;
        Ok(parse_listing(&stdout))
    }
}

/// Parse the listing: a header line, then one row per loaded model.
///
/// An empty or header-only listing means no models are loaded. Rows
/// missing the trailing UNTIL column get "N/A"; rows too short to be a
/// model at all are skipped.
fn parse_listing(stdout: &str) -> Vec<ModelProcess> {
    let mut lines = stdout.trim().lines();
    if lines.next().is_none() {
        return Vec::new();
    }
    lines.filter_map(parse_row).collect()
}

fn parse_row(line: &str) -> Option<ModelProcess> {
    let columns: Vec<&str> = COLUMNS_RE.split(line.trim()).collect();
    if columns.len() < 4 {
        return None;
    }
    Some(ModelProcess {
        name: columns[0].to_string(),
        id: columns[1].to_string(),
        size: columns[2].to_string(),
        processor: columns[3].to_string(),
        until: columns.get(4).map_or_else(|| "N/A".to_string(), |s| s.to_string()),
    })
}
