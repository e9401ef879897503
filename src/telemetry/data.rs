//! Data structures for telemetry records and merged snapshots.

use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// The latest value obtained from one telemetry source: either the parsed
/// record or a description of why the source could not produce one.
///
/// Serialized untagged, so the wire shape is exactly one of the record's own
/// fields or `{"error": "..."}`, never both and never an HTTP failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading<T> {
    /// The source was polled and parsed successfully
    Value(T),
    /// The source failed; the record degrades to an error description
    Failed(SourceFailure),
}

/// The degraded form of a telemetry record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFailure {
    /// Human-readable description of the underlying failure
    pub error: String,
}

impl<T> Reading<T> {
    /// Wrap an adapter result, degrading the error into a failure record.
    pub fn from_result(result: Result<T, SourceError>) -> Self {
        match result {
            Ok(value) => Self::Value(value),
            Err(err) => Self::failed(err.to_string()),
        }
    }

    /// Build a degraded reading from an error description.
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed(SourceFailure {
            error: error.into(),
        })
    }

    /// The parsed record, if the source succeeded.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    /// The failure description, if the source degraded.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Value(_) => None,
            Self::Failed(failure) => Some(&failure.error),
        }
    }
}

/// GPU status as reported by the driver's query tool.
///
/// All fields keep the raw queried text with a fixed unit suffix appended,
/// so clients see exactly what the tool reported (e.g. "130.5W", not a
/// reformatted number).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpuStatus {
    /// Fan duty cycle, e.g. "45%"
    pub fan: String,
    /// Core temperature, e.g. "72°C"
    pub temp: String,
    /// Power draw, e.g. "130.5W"
    pub power: String,
    /// VRAM in use, e.g. "8192 MiB"
    pub mem: String,
    /// Core utilization, e.g. "87%"
    pub util: String,
}

/// Board and drive thermals plus cooling tach readings.
///
/// Each field degrades independently: a missing chip or label leaves the
/// documented default in place while the rest of the record stays live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThermalStatus {
    /// CPU package temperature, "N/A" when the CPU chip is absent
    pub cpu_temp: String,
    /// NVMe composite temperature, "N/A" when the drive chip is absent
    pub ssd_temp: String,
    /// VRM MOS temperature from the board controller, "N/A" when absent
    pub vrm_temp: String,
    /// AIO pump speed, "0 RPM" when the tach is absent
    pub pump_speed: String,
    /// Case fan speed, "0 RPM" when the tach is absent or stopped
    pub sys_fan_1: String,
}

impl Default for ThermalStatus {
    fn default() -> Self {
        Self {
            cpu_temp: "N/A".to_string(),
            ssd_temp: "N/A".to_string(),
            vrm_temp: "N/A".to_string(),
            pump_speed: "0 RPM".to_string(),
            sys_fan_1: "0 RPM".to_string(),
        }
    }
}

/// Memory headline figures and the one-minute load average.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemLoad {
    /// Total memory as the summary tool prints it, e.g. "31Gi"
    pub mem_total: String,
    /// Used memory, e.g. "4.2Gi"
    pub mem_used: String,
    /// One-minute load average, e.g. "0.52"
    pub load: String,
}

impl Default for SystemLoad {
    fn default() -> Self {
        Self {
            mem_total: "N/A".to_string(),
            mem_used: "N/A".to_string(),
            load: "N/A".to_string(),
        }
    }
}

/// Usage of the one configured filesystem.
///
/// This record never takes the `{"error"}` shape; lookup and execution
/// failures degrade to sentinel-filled records so the dashboard keys stay
/// stable regardless of backend health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiskUsage {
    /// The configured device identifier (suffixed " not found" when the
    /// listing lacked it)
    pub storage: String,
    /// Partition size, e.g. "916G"
    pub size: String,
    /// Space used, e.g. "412G"
    pub used: String,
    /// Space available, e.g. "458G"
    pub avail: String,
    /// Used percentage, e.g. "48%"
    pub percent: String,
    /// Mount point, e.g. "/"
    pub mount: String,
}

impl DiskUsage {
    /// Sentinel record for a listing that did not contain the device.
    pub fn not_found(device: &str) -> Self {
        Self {
            storage: format!("{device} not found"),
            size: "N/A".to_string(),
            used: "N/A".to_string(),
            avail: "N/A".to_string(),
            percent: "0%".to_string(),
            mount: "N/A".to_string(),
        }
    }

    /// Sentinel record for a listing command that failed to run at all.
    pub fn unavailable(device: &str) -> Self {
        Self {
            storage: device.to_string(),
            size: "Error".to_string(),
            used: "N/A".to_string(),
            avail: "N/A".to_string(),
            percent: "0%".to_string(),
            mount: "N/A".to_string(),
        }
    }
}

/// One row of the model runner's process listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelProcess {
    /// Model name, e.g. "llama3:latest"
    pub name: String,
    /// Model identifier hash
    pub id: String,
    /// Loaded size, e.g. "6.7 GB"
    pub size: String,
    /// Placement summary, e.g. "100% GPU"
    pub processor: String,
    /// Keep-alive deadline, "N/A" when the listing omits it
    pub until: String,
}

/// A refresh-interval class grouping sources that are polled together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Per-second sources: GPU, thermals, system load
    Fast,
    /// Per-minute sources: disk usage, model list
    Slow,
}

impl Tier {
    /// Tier name for log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Slow => "slow",
        }
    }
}

/// The records refreshed together on a fast-tier poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FastBatch {
    /// GPU status, or why it is unavailable
    pub nvidia: Reading<GpuStatus>,
    /// Memory/load summary, or why it is unavailable
    pub sys: Reading<SystemLoad>,
    /// Thermal/fan readings, or why they are unavailable
    pub temps: Reading<ThermalStatus>,
}

/// The records refreshed together on a slow-tier poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlowBatch {
    /// Usage of the configured filesystem (sentinel-filled on failure)
    pub disk: DiskUsage,
    /// Loaded model processes (empty on failure, so the wire shape is
    /// always an array)
    pub ollama: Vec<ModelProcess>,
}

/// The merged point-in-time view handed to one request.
///
/// Field order here is the JSON key order clients depend on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// GPU record from the fast tier
    pub nvidia: Reading<GpuStatus>,
    /// Memory/load record from the fast tier
    pub sys: Reading<SystemLoad>,
    /// Thermal record from the fast tier
    pub temps: Reading<ThermalStatus>,
    /// Server wall-clock time, computed at merge and never cached
    pub server_time: String,
    /// Disk record from the slow tier
    pub disk: DiskUsage,
    /// Model list from the slow tier
    pub ollama: Vec<ModelProcess>,
}

impl Snapshot {
    /// Combine the two cached tier batches into one flat snapshot.
    ///
    /// Pure except for the caller-supplied `server_time`: identical batches
    /// and time string always merge to an identical snapshot.
    pub fn merge(fast: &FastBatch, slow: &SlowBatch, server_time: String) -> Self {
        Self {
            nvidia: fast.nvidia.clone(),
            sys: fast.sys.clone(),
            temps: fast.temps.clone(),
            server_time,
            disk: slow.disk.clone(),
            ollama: slow.ollama.clone(),
        }
    }
}

/// Current wall-clock time in the dashboard's clock format,
/// e.g. "Sun, Jan 25, 2026 10:56:42 AM".
pub fn server_time_now() -> String {
    chrono::Local::now()
        .format("%a, %b %d, %Y %I:%M:%S %p")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fast() -> FastBatch {
        FastBatch {
            nvidia: Reading::Value(GpuStatus {
                fan: "45%".to_string(),
                temp: "72°C".to_string(),
                power: "130.5W".to_string(),
                mem: "8192 MiB".to_string(),
                util: "87%".to_string(),
            }),
            sys: Reading::Value(SystemLoad {
                mem_total: "31Gi".to_string(),
                mem_used: "4.2Gi".to_string(),
                load: "0.52".to_string(),
            }),
            temps: Reading::failed("sensors unavailable"),
        }
    }

    fn sample_slow() -> SlowBatch {
        SlowBatch {
            disk: DiskUsage::not_found("nvme0n1p2"),
            ollama: vec![ModelProcess {
                name: "llama3:latest".to_string(),
                id: "365c0bd3c000".to_string(),
                size: "6.7 GB".to_string(),
                processor: "100% GPU".to_string(),
                until: "N/A".to_string(),
            }],
        }
    }

    #[test]
    fn reading_serializes_value_or_error_never_both() {
        let ok: Reading<GpuStatus> = sample_fast().nvidia;
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["fan"], "45%");
        assert!(json.get("error").is_none());

        let failed: Reading<GpuStatus> = Reading::failed("nvidia-smi missing");
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json, serde_json::json!({"error": "nvidia-smi missing"}));
    }

    #[test]
    fn merge_is_idempotent_for_pinned_time() {
        let fast = sample_fast();
        let slow = sample_slow();
        let time = "Sun, Jan 25, 2026 10:56:42 AM".to_string();

        let a = Snapshot::merge(&fast, &slow, time.clone());
        let b = Snapshot::merge(&fast, &slow, time);

        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn snapshot_keys_keep_the_dashboard_order() {
        let snapshot = Snapshot::merge(
            &sample_fast(),
            &sample_slow(),
            "Sun, Jan 25, 2026 10:56:42 AM".to_string(),
        );
        let json = serde_json::to_string(&snapshot).unwrap();

        let keys = ["nvidia", "sys", "temps", "server_time", "disk", "ollama"];
        let mut last = 0;
        for key in keys {
            let pos = json
                .find(&format!("\"{key}\""))
                .unwrap_or_else(|| panic!("missing key {key}"));
            assert!(pos > last || last == 0, "key {key} out of order");
            last = pos;
        }
    }

    #[test]
    fn disk_sentinels_match_the_dashboard_contract() {
        let missing = DiskUsage::not_found("nvme0n1p2");
        assert_eq!(missing.storage, "nvme0n1p2 not found");
        assert_eq!(missing.percent, "0%");
        assert_eq!(missing.mount, "N/A");

        let broken = DiskUsage::unavailable("nvme0n1p2");
        assert_eq!(broken.storage, "nvme0n1p2");
        assert_eq!(broken.size, "Error");
        assert_eq!(broken.percent, "0%");
    }

    #[test]
    fn thermal_defaults_cover_every_field() {
        let thermal = ThermalStatus::default();
        assert_eq!(thermal.cpu_temp, "N/A");
        assert_eq!(thermal.ssd_temp, "N/A");
        assert_eq!(thermal.vrm_temp, "N/A");
        assert_eq!(thermal.pump_speed, "0 RPM");
        assert_eq!(thermal.sys_fan_1, "0 RPM");
    }

    #[test]
    fn server_time_uses_the_clock_format() {
        let time = server_time_now();
        // "Sun, Jan 25, 2026 10:56:42 AM": weekday and month are
        // comma/space separated, and the string ends in AM or PM.
        assert!(time.ends_with("AM") || time.ends_with("PM"), "{time}");
        assert_eq!(time.matches(", ").count(), 2, "{time}");
    }
}
