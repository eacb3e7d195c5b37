//! Domain model for a physical ESXi host.

use super::sample::{CpuSample, MemorySample};
use serde::Serialize;

/// A physical host as sampled in one cycle.
///
/// The management-API id is kept only for the VM join and never serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Host {
    #[serde(skip)]
    id: String,
    /// Power state as reported by the API (e.g. "poweredOn").
    #[serde(rename = "PowerState")]
    pub power_state: String,
    /// Boot time in seconds since the UNIX epoch, `0` if unknown.
    #[serde(rename = "Boot")]
    pub boot_epoch_seconds: u64,
    #[serde(flatten)]
    pub cpu: CpuSample,
    #[serde(flatten)]
    pub memory: MemorySample,
}

impl Host {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        power_state: impl Into<String>,
        boot_epoch_seconds: u64,
        cpu: CpuSample,
        memory: MemorySample,
    ) -> Self {
        Self {
            id: id.into(),
            power_state: power_state.into(),
            boot_epoch_seconds,
            cpu,
            memory,
        }
    }

    /// The opaque managed-object id (e.g. `host-42`).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}
