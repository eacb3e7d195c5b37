//! Canonical CPU and memory samples shared by hosts and VMs.
//!
//! Every percentage in this crate is rounded to the nearest tenth with
//! [`percent_tenths`] so that host and VM records stay directly comparable.

use serde::Serialize;

/// Bytes in one mebibyte. The management API reports memory usage in MiB.
pub const BYTES_PER_MEBIBYTE: i64 = 1024 * 1024;

/// Returns `used / total` as a percentage rounded to one decimal place.
///
/// A non-positive `total` yields `0.0` instead of `NaN` or infinity.
#[must_use]
pub fn percent_tenths(used: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    (used as f64 * 1000.0 / total as f64).round() / 10.0
}

/// Converts a MiB count reported by the API into bytes.
#[must_use]
pub fn mebibytes_to_bytes(mebibytes: i64) -> i64 {
    mebibytes.saturating_mul(BYTES_PER_MEBIBYTE)
}

/// CPU usage of a host or VM.
///
/// `usage_total_mhz` is the aggregate capacity (`clock_rate_mhz * cores`);
/// `usage_percent` is the server-reported usage against that capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CpuSample {
    #[serde(rename = "Cores")]
    pub cores: i64,
    #[serde(rename = "Mhz")]
    pub clock_rate_mhz: i64,
    #[serde(rename = "Usage")]
    pub usage_percent: f64,
    #[serde(rename = "UsageTotal")]
    pub usage_total_mhz: i64,
}

impl CpuSample {
    /// Builds a sample from a core count, a per-core clock rate and the
    /// server-reported usage in MHz.
    ///
    /// An unknown clock rate (`0`) leaves both the total and the percentage
    /// at zero.
    #[must_use]
    pub fn new(cores: i64, clock_rate_mhz: i64, overall_usage_mhz: i64) -> Self {
        let usage_total_mhz = clock_rate_mhz.saturating_mul(cores);
        Self {
            cores,
            clock_rate_mhz,
            usage_percent: percent_tenths(overall_usage_mhz, usage_total_mhz),
            usage_total_mhz,
        }
    }
}

/// Memory usage of a host or VM, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MemorySample {
    #[serde(rename = "Total")]
    pub total_bytes: i64,
    #[serde(rename = "Used")]
    pub used_bytes: i64,
    #[serde(rename = "Percentage")]
    pub usage_percent: f64,
}

impl MemorySample {
    #[must_use]
    pub fn new(total_bytes: i64, used_bytes: i64) -> Self {
        Self {
            total_bytes,
            used_bytes,
            usage_percent: percent_tenths(used_bytes, total_bytes),
        }
    }
}
