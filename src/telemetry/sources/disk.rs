//! Disk usage for one configured device from the filesystem listing.

use std::time::Duration;

use crate::error::SourceError;
use crate::exec::ExternalCommand;
use crate::telemetry::data::DiskUsage;

/// Scans `df -h` output for the row naming the configured device.
///
/// A listing without the device reports [`SourceError::MissingEntry`],
/// which the collector turns into the not-found sentinel record; this
/// source never degrades to the `{"error"}` shape on the wire.
#[derive(Debug, Clone)]
pub struct DiskSource {
    command: ExternalCommand,
    device: String,
}

impl DiskSource {
    pub fn new(device: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: ExternalCommand::new("df", ["-h"]).with_timeout(timeout),
            device: device.into(),
        }
    }

    /// The device identifier this source reports on.
    pub fn device(&self) -> &str {
        &self.device
    }

    pub async fn poll(&self) -> Result<DiskUsage, SourceError> {
        let listing = self.command.read_stdout().await?;
        self.scan(&listing)
    }

    /// Find the device's row and pull the six standard columns.
    ///
    /// Rows that mention the device but are too short to carry all six
    /// columns are skipped, not fatal.
    fn scan(&self, listing: &str) -> Result<DiskUsage, SourceError> {
        for line in listing.lines() {
            if !line.contains(&self.device) {
                continue;
            }
            let columns: Vec<&str> = line.split_whitespace().collect();
            if columns.len() < 6 {
                continue;
            }
            return Ok(DiskUsage {
                storage: self.device.clone(),
                size: columns[1].to_string(),
                used: columns[2].to_string(),
                avail: columns[3].to_string(),
                percent: columns[4].to_string(),
                mount: columns[5].to_string(),
            });
        }
        Err(SourceError::missing_entry(&self.device))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DF_OUTPUT: &str = "\
Filesystem      Size  Used Avail Use% Mounted on
tmpfs           3.2G  2.1M  3.2G   1% /run
/dev/nvme0n1p2  916G  412G  458G  48% /
/dev/sda1       1.8T  1.1T  662G  63% /mnt/bulk
";

    fn source() -> DiskSource {
        DiskSource::new("nvme0n1p2", Duration::from_secs(5))
    }

    #[test]
    fn finds_the_device_row() {
        let usage = source().scan(DF_OUTPUT).unwrap();
        assert_eq!(usage.storage, "nvme0n1p2");
        assert_eq!(usage.size, "916G");
        assert_eq!(usage.used, "412G");
        assert_eq!(usage.avail, "458G");
        assert_eq!(usage.percent, "48%");
        assert_eq!(usage.mount, "/");
    }

    #[test]
    fn missing_device_reports_a_missing_entry() {
        let err = DiskSource::new("sdb7", Duration::from_secs(5))
            .scan(DF_OUTPUT)
            .unwrap_err();
        assert!(matches!(err, SourceError::MissingEntry { .. }));
        assert_eq!(err.to_string(), "sdb7 not found");
    }

    #[test]
    fn short_matching_line_is_skipped() {
        let listing = "/dev/nvme0n1p2 916G\n/dev/nvme0n1p2  916G  412G  458G  48% /\n";
        let usage = source().scan(listing).unwrap();
        assert_eq!(usage.size, "916G");
        assert_eq!(usage.mount, "/");
    }

    #[test]
    fn short_line_without_a_full_row_is_still_missing() {
        let err = source().scan("/dev/nvme0n1p2 916G\n").unwrap_err();
        assert!(matches!(err, SourceError::MissingEntry { .. }));
    }
}
