//! Telemetry collection configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration consumed by the telemetry core.
///
/// Everything here is fixed at construction and never mutated at runtime:
/// which filesystem to report, which container hosts the model runner, the
/// sensor chip/label names to extract, and the refresh cadence per tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Device identifier matched as a substring of `df` output lines
    pub storage_device: String,
    /// Name of the container running the model server
    pub container: String,
    /// Refresh interval for the fast tier (GPU, thermals, load)
    pub fast_interval: Duration,
    /// Refresh interval for the slow tier (disk, model list)
    pub slow_interval: Duration,
    /// Hard deadline applied to every external command invocation
    pub command_timeout: Duration,
    /// Sensor chip/label names used by the thermal adapter
    pub sensors: SensorLabels,
}

/// Chip prefixes and sensor labels the thermal adapter looks for.
///
/// Chip names match as prefixes of the `sensors -j` chip keys (which carry
/// bus suffixes like `k10temp-pci-00c3`); labels match exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorLabels {
    /// CPU package temperature chip (first temperature input is used)
    pub cpu_chip: String,
    /// NVMe drive temperature chip (first temperature input is used)
    pub ssd_chip: String,
    /// Motherboard controller chip carrying VRM and fan readings
    pub board_chip: String,
    /// VRM temperature label on the board chip
    pub vrm_label: String,
    /// AIO pump tach label on the board chip
    pub pump_label: String,
    /// Case fan tach label on the board chip
    pub case_fan_label: String,
}

impl Default for SensorLabels {
    fn default() -> Self {
        Self {
            cpu_chip: "k10temp".to_string(),
            ssd_chip: "nvme".to_string(),
            board_chip: "nct6687".to_string(),
            vrm_label: "VRM MOS".to_string(),
            pump_label: "Pump Fan".to_string(),
            case_fan_label: "System Fan #1".to_string(),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            storage_device: "nvme0n1p2".to_string(),
            container: "ollama".to_string(),
            fast_interval: crate::DEFAULT_FAST_INTERVAL,
            slow_interval: crate::DEFAULT_SLOW_INTERVAL,
            command_timeout: crate::DEFAULT_COMMAND_TIMEOUT,
            sensors: SensorLabels::default(),
        }
    }
}

impl MonitorConfig {
    /// Set the filesystem identifier reported by the disk adapter.
    pub fn with_storage_device(mut self, device: impl Into<String>) -> Self {
        self.storage_device = device.into();
        self
    }

    /// Set the container name queried for loaded models.
    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    /// Set the fast-tier refresh interval.
    pub fn with_fast_interval(mut self, interval: Duration) -> Self {
        self.fast_interval = interval;
        self
    }

    /// Set the slow-tier refresh interval.
    pub fn with_slow_interval(mut self, interval: Duration) -> Self {
        self.slow_interval = interval;
        self
    }

    /// Set the per-command execution deadline.
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Set the sensor chip/label names.
    pub fn with_sensors(mut self, sensors: SensorLabels) -> Self {
        self.sensors = sensors;
        self
    }
}
