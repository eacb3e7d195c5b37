//! Normalization of raw summaries into the canonical sample types.
//!
//! The API pre-aggregates every statistic; all that happens here is unit
//! conversion and percentage rounding, done the same way for hosts and VMs.

use crate::{
    core::domain::model::{
        datastore::Datastore,
        host::Host,
        sample::{CpuSample, MemorySample, mebibytes_to_bytes},
        vm::Vm,
    },
    inventory::application::response::summary::{
        DatastoreSummary, HostListSummary, VirtualMachineSummary,
    },
};
use std::collections::HashMap;

/// Maps a host summary. `id` is the host's managed-object id.
pub fn map_host(id: &str, summary: &HostListSummary) -> Host {
    let cpu = CpuSample::new(
        summary.hardware.num_cpu_cores,
        summary.hardware.cpu_mhz,
        summary.quick_stats.overall_cpu_usage,
    );
    let memory = MemorySample::new(
        summary.hardware.memory_size,
        mebibytes_to_bytes(summary.quick_stats.overall_memory_usage),
    );
    Host::new(
        id,
        summary.runtime.power_state.clone(),
        summary.runtime.boot_time,
        cpu,
        memory,
    )
}

pub fn map_datastore(summary: &DatastoreSummary) -> Datastore {
    Datastore::new(
        summary.capacity,
        summary.free_space,
        summary.uncommitted,
        summary.accessible,
        summary.fs_type.clone(),
    )
}

/// Maps a VM summary, borrowing the clock rate of the host it runs on.
///
/// The host is found by a linear scan over `hosts`; the first host whose id
/// matches wins. An unresolved host leaves the clock rate at zero, and with
/// it the CPU total and percentage.
pub fn map_vm(summary: &VirtualMachineSummary, hosts: &HashMap<String, Host>) -> Vm {
    let clock_rate_mhz = summary
        .runtime
        .host
        .as_ref()
        .and_then(|host_ref| hosts.values().find(|h| h.id() == host_ref.value))
        .map(|h| h.cpu.clock_rate_mhz)
        .unwrap_or(0);

    Vm {
        power_state: summary.runtime.power_state.clone(),
        boot_epoch_seconds: summary.runtime.boot_time,
        memory_overhead_bytes: summary.runtime.memory_overhead,
        cpu: CpuSample::new(
            summary.config.num_cpu,
            clock_rate_mhz,
            summary.quick_stats.overall_cpu_usage,
        ),
        memory: MemorySample::new(
            mebibytes_to_bytes(summary.config.memory_size_mb),
            mebibytes_to_bytes(summary.quick_stats.guest_memory_usage),
        ),
    }
}
