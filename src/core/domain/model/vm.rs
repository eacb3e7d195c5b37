//! Domain model for a virtual machine.

use super::sample::{CpuSample, MemorySample};
use serde::Serialize;

/// A virtual machine as sampled in one cycle.
///
/// `cpu.clock_rate_mhz` is borrowed from the host the VM runs on; a VM has no
/// clock rate of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vm {
    #[serde(rename = "PowerState")]
    pub power_state: String,
    #[serde(rename = "Boot")]
    pub boot_epoch_seconds: u64,
    #[serde(rename = "MemoryOverhead")]
    pub memory_overhead_bytes: i64,
    #[serde(flatten)]
    pub cpu: CpuSample,
    #[serde(flatten)]
    pub memory: MemorySample,
}
