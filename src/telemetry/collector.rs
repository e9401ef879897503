//! The command-backed collector behind the tiered cache.

use async_trait::async_trait;
use tracing::warn;

use crate::config::MonitorConfig;
use crate::error::SourceError;
use crate::telemetry::data::{DiskUsage, FastBatch, Reading, SlowBatch};
use crate::telemetry::sources::{
    DiskSource, GpuSource, ModelListSource, SystemLoadSource, ThermalSource,
};
use crate::telemetry::traits::TierSampler;

/// Owns the five source adapters and polls them tier by tier.
///
/// Degradation policy lives here: a failed fast-tier source becomes its
/// `{"error"}` record, a failed disk listing becomes a sentinel record,
/// and a failed model listing becomes an empty list. Nothing a source
/// does can abort a batch.
#[derive(Debug)]
pub struct TelemetryCollector {
    gpu: GpuSource,
    system: SystemLoadSource,
    thermal: ThermalSource,
    disk: DiskSource,
    models: ModelListSource,
}

impl TelemetryCollector {
    /// Build all five sources from one configuration.
    pub fn new(config: &MonitorConfig) -> Self {
        let timeout = config.command_timeout;
        Self {
            gpu: GpuSource::new(timeout),
            system: SystemLoadSource::new(timeout),
            thermal: ThermalSource::new(config.sensors.clone(), timeout),
            disk: DiskSource::new(config.storage_device.clone(), timeout),
            models: ModelListSource::new(&config.container, timeout),
        }
    }
}

#[async_trait]
impl TierSampler for TelemetryCollector {
    async fn sample_fast(&self) -> FastBatch {
        let (nvidia, sys, temps) =
            tokio::join!(self.gpu.poll(), self.system.poll(), self.thermal.poll());

        FastBatch {
            nvidia: into_reading("nvidia", nvidia),
            sys: into_reading("sys", sys),
            temps: into_reading("temps", temps),
        }
    }

    async fn sample_slow(&self) -> SlowBatch {
        let (disk, models) = tokio::join!(self.disk.poll(), self.models.poll());

        SlowBatch {
            disk: disk.unwrap_or_else(|err| degraded_disk(err, self.disk.device())),
            ollama: models.unwrap_or_else(|err| {
                warn!(source = "ollama", error = %err, "model listing failed");
                Vec::new()
            }),
        }
    }
}

/// Wrap a fast-tier poll result, logging the failure it degrades from.
fn into_reading<T>(source: &'static str, result: Result<T, SourceError>) -> Reading<T> {
    if let Err(err) = &result {
        warn!(source, error = %err, "telemetry source degraded");
    }
    Reading::from_result(result)
}

/// Pick the sentinel shape a failed disk poll degrades to: a device
/// missing from the listing reads "not found", anything else marks the
/// listing itself as broken.
fn degraded_disk(err: SourceError, device: &str) -> DiskUsage {
    warn!(source = "disk", error = %err, "disk listing degraded");
    match err {
        SourceError::MissingEntry { .. } => DiskUsage::not_found(device),
        _ => DiskUsage::unavailable(device),
    }
}
