//! The tiered read-through cache between HTTP requests and the sources.
//!
//! Requests never poll hardware directly. Each refresh tier owns one
//! cached batch plus the instant it was written, guarded by its own async
//! mutex. A request locks the tier, re-polls only if the batch is older
//! than the tier's interval, and otherwise reuses what is there. Because
//! the lock is held across the whole check-poll-write sequence, concurrent
//! requests hitting a stale tier coalesce: the first one refreshes while
//! the rest wait on the lock and then read the batch it wrote.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::telemetry::data::{server_time_now, FastBatch, SlowBatch, Snapshot, Tier};
use crate::telemetry::traits::TierSampler;

/// Two-tier cache over a [`TierSampler`].
///
/// The fast tier (GPU, thermals, system load) and the slow tier (disk,
/// model list) age independently; a request refreshes whichever of the
/// two is stale and leaves the other untouched.
pub struct TieredCache {
    sampler: Box<dyn TierSampler>,
    fast_interval: Duration,
    slow_interval: Duration,
    fast: Mutex<Option<(FastBatch, Instant)>>,
    slow: Mutex<Option<(SlowBatch, Instant)>>,
}

impl TieredCache {
    /// Wrap a sampler with empty tiers; the first snapshot polls everything.
    pub fn new(
        sampler: impl TierSampler + 'static,
        fast_interval: Duration,
        slow_interval: Duration,
    ) -> Self {
        Self {
            sampler: Box::new(sampler),
            fast_interval,
            slow_interval,
            fast: Mutex::new(None),
            slow: Mutex::new(None),
        }
    }

    /// The merged view of both tiers, refreshing whichever is stale.
    ///
    /// `server_time` is computed here on every call; wall-clock time is
    /// the one field that never comes from the cache.
    pub async fn snapshot(&self) -> Snapshot {
        let (fast, slow) = tokio::join!(self.fast_batch(), self.slow_batch());
        Snapshot::merge(&fast, &slow, server_time_now())
    }

    /// The instant a tier was last refreshed, if it has been polled yet.
    pub async fn refreshed_at(&self, tier: Tier) -> Option<Instant> {
        match tier {
            Tier::Fast => self.fast.lock().await.as_ref().map(|(_, at)| *at),
            Tier::Slow => self.slow.lock().await.as_ref().map(|(_, at)| *at),
        }
    }

    /// A batch is reused while its age is at most the tier interval;
    /// strictly older (or never polled) triggers a refresh.
    async fn fast_batch(&self) -> FastBatch {
        let mut slot = self.fast.lock().await;
        if let Some((batch, refreshed_at)) = slot.as_ref() {
            if refreshed_at.elapsed() <= self.fast_interval {
                return batch.clone();
            }
        }
        debug!(tier = Tier::Fast.as_str(), "refreshing telemetry tier");
        let batch = self.sampler.sample_fast().await;
        *slot = Some((batch.clone(), Instant::now()));
        batch
    }

    async fn slow_batch(&self) -> SlowBatch {
        let mut slot = self.slow.lock().await;
        if let Some((batch, refreshed_at)) = slot.as_ref() {
            if refreshed_at.elapsed() <= self.slow_interval {
                return batch.clone();
            }
        }
        debug!(tier = Tier::Slow.as_str(), "refreshing telemetry tier");
        let batch = self.sampler.sample_slow().await;
        *slot = Some((batch.clone(), Instant::now()));
        batch
    }
}
