//! The sampling seam between the tiered cache and the real sources.

use async_trait::async_trait;

use crate::telemetry::data::{FastBatch, SlowBatch};

/// Polls every source belonging to one refresh tier.
///
/// [`TieredCache`](crate::telemetry::cache::TieredCache) drives all
/// refreshes through this trait, so tests can swap the command-backed
/// [`TelemetryCollector`](crate::telemetry::collector::TelemetryCollector)
/// for a stub that counts polls or returns fixtures.
#[async_trait]
pub trait TierSampler: Send + Sync {
    /// Poll the fast-changing sources (GPU, thermals, system load) once.
    async fn sample_fast(&self) -> FastBatch;

    /// Poll the slow-changing sources (disk usage, model list) once.
    async fn sample_slow(&self) -> SlowBatch;
}
