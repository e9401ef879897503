//! Telemetry collection: command-backed source adapters, the tiered
//! read-through cache, and the merged snapshot types.

pub mod cache;
pub mod collector;
pub mod data;
pub mod sources;
pub mod traits;

pub use cache::TieredCache;
pub use collector::TelemetryCollector;
pub use data::{FastBatch, Reading, SlowBatch, Snapshot, Tier};
pub use traits::TierSampler;
