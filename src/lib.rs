//! # rigwatch - Hardware & AI Workload Telemetry
//!
//! Real-time monitoring for a local GPU rig: Nvidia GPU status, board and
//! drive thermals, fan speeds, memory and load, disk usage, and the models
//! currently loaded in a containerized Ollama server, served as a web
//! dashboard and a JSON API.
//!
//! Telemetry comes from external command-line tools (`nvidia-smi`,
//! `sensors`, `free`, `uptime`, `df`, `docker exec`). Each source sits
//! behind an adapter that turns command output into a typed record and
//! degrades to a sentinel value when the tool is missing or misbehaves,
//! so the dashboard shape never changes with backend health. A tiered
//! read-through cache decides when each source is actually re-polled.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rigwatch::{AppState, MonitorConfig, TelemetryCollector, TieredCache, WebConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MonitorConfig::default();
//!     let collector = TelemetryCollector::new(&config);
//!     let cache = TieredCache::new(collector, config.fast_interval, config.slow_interval);
//!     let state = Arc::new(AppState { cache });
//!
//!     // Serve the dashboard on port 5000
//!     rigwatch::start_web_server(WebConfig::default(), state).await?;
//!     Ok(())
//! }
//! ```

use std::time::Duration;

pub mod config;
pub mod error;
pub mod exec;
pub mod telemetry;
pub mod web;

// Re-export public API
pub use config::{MonitorConfig, SensorLabels};
pub use error::{MonitorError, Result, SourceError};
pub use telemetry::{
    cache::TieredCache,
    collector::TelemetryCollector,
    data::{
        DiskUsage, FastBatch, GpuStatus, ModelProcess, Reading, SlowBatch, Snapshot, SystemLoad,
        ThermalStatus, Tier,
    },
    traits::TierSampler,
};
pub use web::{create_app, start_web_server, start_web_server_simple, AppState, WebConfig};

/// The default fast-tier refresh interval (GPU, thermals, system load)
pub const DEFAULT_FAST_INTERVAL: Duration = Duration::from_secs(1);

/// The default slow-tier refresh interval (disk usage, model list)
pub const DEFAULT_SLOW_INTERVAL: Duration = Duration::from_secs(60);

/// The default hard deadline for one external command invocation
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// The default web server port
pub const DEFAULT_WEB_PORT: u16 = 5000;
