//! Board, CPU, and drive thermals from lm-sensors JSON output.
//!
//! `sensors -j` prints a tree of chip name -> sensor label -> raw
//! readings. Chip names carry a bus suffix (`k10temp-pci-00c3`), so
//! chips are matched by configured prefix while sensor labels match
//! exactly. Any reading that cannot be located keeps its placeholder
//! value rather than failing the whole record.

use std::time::Duration;

use serde_json::Value;

use crate::config::SensorLabels;
use crate::error::SourceError;
use crate::exec::ExternalCommand;
use crate::telemetry::data::ThermalStatus;

/// Polls `sensors -j` and extracts the dashboard's five readings.
#[derive(Debug, Clone)]
pub struct ThermalSource {
    command: ExternalCommand,
    labels: SensorLabels,
}

impl ThermalSource {
    pub fn new(labels: SensorLabels, timeout: Duration) -> Self {
        Self {
            command: ExternalCommand::new("sensors", ["-j"]).with_timeout(timeout),
            labels,
        }
    }

    pub async fn poll(&self) -> Result<ThermalStatus, SourceError> {
        let stdout = self.command.read_stdout().await?;
        let tree: Value = serde_json::from_str(&stdout)
            .map_err(|err| SourceError::parse(self.command.describe(), err.to_string()))?;
        Ok(self.extract(&tree))
    }

    /// Pull the configured readings out of a parsed sensor tree.
    fn extract(&self, tree: &Value) -> ThermalStatus {
        let mut status = ThermalStatus::default();

        if let Some(value) = chip_with_prefix(tree, &self.labels.cpu_chip).and_then(first_temp_input)
        {
            status.cpu_temp = format!("{value}°C");
        }
        if let Some(value) = chip_with_prefix(tree, &self.labels.ssd_chip).and_then(first_temp_input)
        {
            status.ssd_temp = format!("{value}°C");
        }
        if let Some(board) = chip_with_prefix(tree, &self.labels.board_chip) {
            if let Some(value) = labeled_input(board, &self.labels.vrm_label, "temp") {
                status.vrm_temp = format!("{value}°C");
            }
            if let Some(value) = labeled_input(board, &self.labels.pump_label, "fan") {
                status.pump_speed = format_rpm(value);
            }
            if let Some(value) = labeled_input(board, &self.labels.case_fan_label, "fan") {
                status.sys_fan_1 = format_rpm(value);
            }
        }

        status
    }
}

fn format_rpm(value: f64) -> String {
    format!("{} RPM", value.round() as i64)
}

/// The first chip whose name starts with `prefix`.
fn chip_with_prefix<'a>(tree: &'a Value, prefix: &str) -> Option<&'a Value> {
    tree.as_object()?
        .iter()
        .find(|(name, _)| name.starts_with(prefix))
        .map(|(_, chip)| chip)
}

/// A chip's headline temperature: the sensor carrying `temp1_input`
/// (Tctl on k10temp, Composite on nvme drives).
fn first_temp_input(chip: &Value) -> Option<f64> {
    chip.as_object()?
        .values()
        .filter_map(Value::as_object)
        .find_map(|sensor| sensor.get("temp1_input").and_then(Value::as_f64))
}

/// The `{kind}*_input` reading under an exactly-matching sensor label.
fn labeled_input(chip: &Value, label: &str, kind: &str) -> Option<f64> {
    chip.as_object()?
        .get(label)?
        .as_object()?
        .iter()
        .find(|(key, _)| key.starts_with(kind) && key.ends_with("_input"))
        .and_then(|(_, value)| value.as_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source() -> ThermalSource {
        ThermalSource::new(SensorLabels::default(), Duration::from_secs(5))
    }

    fn full_tree() -> Value {
        json!({
            "k10temp-pci-00c3": {
                "Adapter": "PCI adapter",
                "Tctl": { "temp1_input": 48.625 }
            },
            "nvme-pci-0400": {
                "Adapter": "PCI adapter",
                "Composite": { "temp1_input": 35.85, "temp1_max": 81.85 }
            },
            "nct6687-isa-0a20": {
                "Adapter": "ISA adapter",
                "VRM MOS": { "temp4_input": 44.0 },
                "Pump Fan": { "fan2_input": 2112.0 },
                "System Fan #1": { "fan3_input": 756.0 }
            }
        })
    }

    #[test]
    fn extracts_all_readings() {
        let status = source().extract(&full_tree());
        assert_eq!(status.cpu_temp, "48.625°C");
        assert_eq!(status.ssd_temp, "35.85°C");
        assert_eq!(status.vrm_temp, "44°C");
        assert_eq!(status.pump_speed, "2112 RPM");
        assert_eq!(status.sys_fan_1, "756 RPM");
    }

    #[test]
    fn missing_board_chip_degrades_only_board_readings() {
        let tree = json!({
            "k10temp-pci-00c3": { "Tctl": { "temp1_input": 51.0 } },
            "nvme-pci-0400": { "Composite": { "temp1_input": 33.0 } }
        });
        let status = source().extract(&tree);
        assert_eq!(status.cpu_temp, "51°C");
        assert_eq!(status.ssd_temp, "33°C");
        assert_eq!(status.vrm_temp, "N/A");
        assert_eq!(status.pump_speed, "0 RPM");
        assert_eq!(status.sys_fan_1, "0 RPM");
    }

    #[test]
    fn stopped_fan_reads_zero_rpm() {
        let tree = json!({
            "nct6687-isa-0a20": { "System Fan #1": { "fan3_input": 0.0 } }
        });
        let status = source().extract(&tree);
        assert_eq!(status.sys_fan_1, "0 RPM");
    }

    #[test]
    fn non_object_tree_yields_placeholders() {
        let status = source().extract(&json!([1, 2, 3]));
        let default = ThermalStatus::default();
        assert_eq!(status.cpu_temp, default.cpu_temp);
        assert_eq!(status.vrm_temp, default.vrm_temp);
        assert_eq!(status.pump_speed, default.pump_speed);
    }

    #[test]
    fn chip_match_is_by_prefix() {
        assert!(chip_with_prefix(&full_tree(), "k10temp").is_some());
        assert!(chip_with_prefix(&full_tree(), "k10temp-pci-00c3").is_some());
        assert!(chip_with_prefix(&full_tree(), "coretemp").is_none());
    }
}
