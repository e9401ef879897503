//! Memory and load-average summary from `free` and `uptime`.

use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::SourceError;
use crate::exec::ExternalCommand;
use crate::telemetry::data::SystemLoad;

lazy_static! {
    /// "Mem:" row of `free -h`: total then used, in the tool's own units.
    static ref MEM_RE: Regex = Regex::new(r"Mem:\s+(\S+)\s+(\S+)").unwrap();
    /// One-minute figure of the `uptime` load averages.
    static ref LOAD_RE: Regex = Regex::new(r"load average:\s*([\d.]+)").unwrap();
}

/// Polls `free -h` and `uptime` together for the memory headline and the
/// one-minute load average.
#[derive(Debug, Clone)]
pub struct SystemLoadSource {
    memory: ExternalCommand,
    uptime: ExternalCommand,
}

impl SystemLoadSource {
    pub fn new(timeout: Duration) -> Self {
        Self {
            memory: ExternalCommand::new("free", ["-h"]).with_timeout(timeout),
            uptime: ExternalCommand::new("uptime", Vec::<String>::new()).with_timeout(timeout),
        }
    }

    /// Poll both commands concurrently.
    ///
    /// The two halves degrade independently: if only one command fails its
    /// fields stay "N/A" while the other half is extracted normally. Only
    /// when both fail does the record as a whole become an error.
    pub async fn poll(&self) -> Result<SystemLoad, SourceError> {
        let (memory, uptime) = tokio::join!(self.memory.read_stdout(), self.uptime.read_stdout());

        match (memory, uptime) {
            (Err(memory_err), Err(_)) => Err(memory_err),
            (memory, uptime) => {
                let mut load = SystemLoad::default();
                if let Ok(stdout) = memory {
                    if let Some(caps) = MEM_RE.captures(&stdout) {
                        load.mem_total = caps[1].to_string();
                        load.mem_used = caps[2].to_string();
                    }
                }
                if let Ok(stdout) = uptime {
                    if let Some(caps) = LOAD_RE.captures(&stdout) {
                        load.load = caps[1].to_string();
                    }
                }
                Ok(load)
            }
        }
    }
}
