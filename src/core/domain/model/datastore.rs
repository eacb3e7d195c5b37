//! Domain model for a datastore.

use super::sample::percent_tenths;
use serde::Serialize;

/// A datastore as sampled in one cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Datastore {
    #[serde(rename = "Capacity")]
    pub capacity_bytes: i64,
    #[serde(rename = "Free")]
    pub free_bytes: i64,
    #[serde(rename = "Uncommitted")]
    pub uncommitted_bytes: i64,
    #[serde(rename = "Accessible")]
    pub accessible: bool,
    /// Filesystem type (e.g. "VMFS", "NFS", "vsan").
    #[serde(rename = "DatastoreType")]
    pub fs_type: String,
    #[serde(rename = "Usage")]
    pub usage_percent: f64,
}

impl Datastore {
    /// Builds a datastore sample; usage counts both free and uncommitted
    /// space as unused.
    #[must_use]
    pub fn new(
        capacity_bytes: i64,
        free_bytes: i64,
        uncommitted_bytes: i64,
        accessible: bool,
        fs_type: impl Into<String>,
    ) -> Self {
        let used = capacity_bytes.saturating_sub(free_bytes.saturating_add(uncommitted_bytes));
        let usage_percent = if used > 0 {
            percent_tenths(used, capacity_bytes)
        } else {
            0.0
        };
        Self {
            capacity_bytes,
            free_bytes,
            uncommitted_bytes,
            accessible,
            fs_type: fs_type.into(),
            usage_percent,
        }
    }

    /// Bytes in use, clamped at zero.
    #[must_use]
    pub fn used_bytes(&self) -> i64 {
        self.capacity_bytes
            .saturating_sub(self.free_bytes.saturating_add(self.uncommitted_bytes))
            .max(0)
    }
}
