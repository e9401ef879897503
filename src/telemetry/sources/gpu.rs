//! GPU status from the Nvidia driver query tool.

use std::time::Duration;

use crate::error::SourceError;
use crate::exec::ExternalCommand;
use crate::telemetry::data::GpuStatus;

/// The fields requested from `nvidia-smi`, in the order they come back.
const QUERY_FIELDS: &str = "fan.speed,temperature.gpu,power.draw,memory.used,utilization.gpu";

/// Polls `nvidia-smi` for fan speed, temperature, power draw, memory
/// use, and utilization of the first GPU.
#[derive(Debug, Clone)]
pub struct GpuSource {
    command: ExternalCommand,
}

impl GpuSource {
    pub fn new(timeout: Duration) -> Self {
        Self {
            command: ExternalCommand::new(
                "nvidia-smi",
                [
                    format!("--query-gpu={QUERY_FIELDS}"),
                    "--format=csv,noheader,nounits".to_string(),
                ],
            )
            .with_timeout(timeout),
        }
    }

    pub async fn poll(&self) -> Result<GpuStatus, SourceError> {
        let stdout = self.command.read_stdout().await?;
        parse_query_line(&stdout)
            .map_err(|reason| SourceError::parse(self.command.describe(), reason))
    }
}

/// Parse one CSV line of the five queried values, re-attaching the units
/// `--nounits` stripped.
fn parse_query_line(stdout: &str) -> Result<GpuStatus, String> {
    let line = stdout.trim().lines().next().unwrap_or_default();
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 5 {
        return Err(format!("expected 5 fields, got {}: {line:?}", fields.len()));
    }
    Ok(GpuStatus {
        fan: format!("{}%", fields[0]),
        temp: format!("{}°C", fields[1]),
        power: format!("{}W", fields[2]),
        mem: format!("{} MiB", fields[3]),
        util: format!("{}%", fields[4]),
    })
}
