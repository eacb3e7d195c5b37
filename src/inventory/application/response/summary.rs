//! Wire shapes of the `summary` property for hosts, VMs and datastores.
//!
//! Only the fields the sampler reads are modelled. Anything the server leaves
//! unset decodes to its zero value, matching how vSphere omits unset fields.

use crate::core::domain::{
    model::managed_object::ManagedObjectReference, value_object::serde_helpers,
};
use serde::Deserialize;

/// `HostListSummary`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostListSummary {
    pub host: Option<ManagedObjectReference>,
    pub hardware: HostHardwareSummary,
    pub runtime: HostRuntimeInfo,
    pub config: ConfigName,
    pub quick_stats: HostQuickStats,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostHardwareSummary {
    /// Physical memory in bytes.
    #[serde(deserialize_with = "serde_helpers::zero_if_null::deserialize")]
    pub memory_size: i64,
    /// Per-core clock rate in MHz.
    #[serde(deserialize_with = "serde_helpers::zero_if_null::deserialize")]
    pub cpu_mhz: i64,
    #[serde(deserialize_with = "serde_helpers::zero_if_null::deserialize")]
    pub num_cpu_cores: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostRuntimeInfo {
    pub power_state: String,
    #[serde(deserialize_with = "serde_helpers::epoch_seconds::deserialize")]
    pub boot_time: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostQuickStats {
    /// Aggregated CPU usage in MHz.
    #[serde(deserialize_with = "serde_helpers::zero_if_null::deserialize")]
    pub overall_cpu_usage: i64,
    /// Physical memory in use, in MiB.
    #[serde(deserialize_with = "serde_helpers::zero_if_null::deserialize")]
    pub overall_memory_usage: i64,
}

/// The `config.name` part shared by host and VM summaries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigName {
    pub name: String,
}

/// `VirtualMachineSummary`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualMachineSummary {
    pub vm: Option<ManagedObjectReference>,
    pub runtime: VirtualMachineRuntimeInfo,
    pub config: VirtualMachineConfigSummary,
    pub quick_stats: VirtualMachineQuickStats,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualMachineRuntimeInfo {
    /// The host the VM is currently running on.
    pub host: Option<ManagedObjectReference>,
    pub power_state: String,
    #[serde(deserialize_with = "serde_helpers::epoch_seconds::deserialize")]
    pub boot_time: u64,
    /// Memory overhead in bytes.
    #[serde(deserialize_with = "serde_helpers::zero_if_null::deserialize")]
    pub memory_overhead: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualMachineConfigSummary {
    pub name: String,
    #[serde(deserialize_with = "serde_helpers::zero_if_null::deserialize")]
    pub num_cpu: i64,
    /// Configured memory in MiB.
    #[serde(rename = "memorySizeMB", deserialize_with = "serde_helpers::zero_if_null::deserialize")]
    pub memory_size_mb: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualMachineQuickStats {
    /// CPU usage in MHz.
    #[serde(deserialize_with = "serde_helpers::zero_if_null::deserialize")]
    pub overall_cpu_usage: i64,
    /// Guest memory in active use, in MiB.
    #[serde(deserialize_with = "serde_helpers::zero_if_null::deserialize")]
    pub guest_memory_usage: i64,
}

/// `DatastoreSummary`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatastoreSummary {
    pub name: String,
    #[serde(deserialize_with = "serde_helpers::zero_if_null::deserialize")]
    pub capacity: i64,
    #[serde(deserialize_with = "serde_helpers::zero_if_null::deserialize")]
    pub free_space: i64,
    #[serde(deserialize_with = "serde_helpers::zero_if_null::deserialize")]
    pub uncommitted: i64,
    pub accessible: bool,
    #[serde(rename = "type")]
    pub fs_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_host_summary_decodes() {
        let summary: HostListSummary = serde_json::from_value(json!({
            "_typeName": "HostListSummary",
            "host": {"_typeName": "ManagedObjectReference", "type": "HostSystem", "value": "host-10"},
            "hardware": {"memorySize": 274877906944i64, "cpuMhz": 2400, "numCpuCores": 8, "vendor": "Dell Inc."},
            "runtime": {"powerState": "poweredOn", "bootTime": "2024-01-15T10:20:30Z"},
            "config": {"name": "esx-01.lab.local", "port": 443},
            "quickStats": {"overallCpuUsage": 9600, "overallMemoryUsage": 131072}
        }))
        .unwrap();
        assert_eq!(summary.host.unwrap().value, "host-10");
        assert_eq!(summary.hardware.cpu_mhz, 2400);
        assert_eq!(summary.hardware.num_cpu_cores, 8);
        assert_eq!(summary.runtime.boot_time, 1_705_314_030);
        assert_eq!(summary.config.name, "esx-01.lab.local");
        assert_eq!(summary.quick_stats.overall_memory_usage, 131072);
    }

    #[test]
    fn test_disconnected_host_decodes_with_zeroes() {
        let summary: HostListSummary = serde_json::from_value(json!({
            "host": {"type": "HostSystem", "value": "host-11"},
            "runtime": {"powerState": "unknown"},
            "config": {"name": "esx-02"},
            "quickStats": {}
        }))
        .unwrap();
        assert_eq!(summary.hardware.cpu_mhz, 0);
        assert_eq!(summary.runtime.boot_time, 0);
        assert_eq!(summary.quick_stats.overall_cpu_usage, 0);
    }

    #[test]
    fn test_vm_summary_decodes() {
        let summary: VirtualMachineSummary = serde_json::from_value(json!({
            "vm": {"type": "VirtualMachine", "value": "vm-100"},
            "runtime": {
                "host": {"type": "HostSystem", "value": "host-10"},
                "powerState": "poweredOn",
                "bootTime": null,
                "memoryOverhead": 52428800
            },
            "config": {"name": "web-01", "numCpu": 4, "memorySizeMB": 8192},
            "quickStats": {"overallCpuUsage": 960, "guestMemoryUsage": 2048}
        }))
        .unwrap();
        assert_eq!(summary.runtime.host.unwrap().value, "host-10");
        assert_eq!(summary.runtime.boot_time, 0);
        assert_eq!(summary.runtime.memory_overhead, 52428800);
        assert_eq!(summary.config.memory_size_mb, 8192);
        assert_eq!(summary.quick_stats.guest_memory_usage, 2048);
    }

    #[test]
    fn test_datastore_summary_decodes() {
        let summary: DatastoreSummary = serde_json::from_value(json!({
            "datastore": {"type": "Datastore", "value": "datastore-1"},
            "name": "vsanDatastore",
            "url": "ds:///vmfs/volumes/vsan:1/",
            "capacity": 1000,
            "freeSpace": 300,
            "uncommitted": 50,
            "accessible": true,
            "multipleHostAccess": true,
            "type": "vsan"
        }))
        .unwrap();
        assert_eq!(summary.name, "vsanDatastore");
        assert_eq!(summary.free_space, 300);
        assert_eq!(summary.uncommitted, 50);
        assert!(summary.accessible);
        assert_eq!(summary.fs_type, "vsan");
    }
}
