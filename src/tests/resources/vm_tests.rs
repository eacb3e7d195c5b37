use super::{
    create_inventory_client, host_summary, mount_container_view, mount_destroy, mount_retrieve,
    object_content,
};
use crate::core::domain::port::InventorySource;
use serde_json::json;
use wiremock::MockServer;

fn vm_summary(name: &str, host_id: Option<&str>, num_cpu: i64, cpu_usage: i64) -> serde_json::Value {
    let host = host_id.map(|id| json!({"_typeName": "ManagedObjectReference", "type": "HostSystem", "value": id}));
    json!({
        "_typeName": "VirtualMachineSummary",
        "vm": {"_typeName": "ManagedObjectReference", "type": "VirtualMachine", "value": "vm-100"},
        "runtime": {
            "_typeName": "VirtualMachineRuntimeInfo",
            "host": host,
            "connectionState": "connected",
            "powerState": "poweredOn",
            "bootTime": "2024-03-01T00:00:00Z",
            "memoryOverhead": 52428800
        },
        "config": {
            "_typeName": "VirtualMachineConfigSummary",
            "name": name,
            "numCpu": num_cpu,
            "memorySizeMB": 8192,
            "guestFullName": "Ubuntu Linux (64-bit)"
        },
        "quickStats": {
            "_typeName": "VirtualMachineQuickStats",
            "overallCpuUsage": cpu_usage,
            "guestMemoryUsage": 2048
        }
    })
}

#[tokio::test]
async fn test_fetch_vms_joins_host_clock_rate() {
    let mock_server = MockServer::start().await;
    let client = create_inventory_client(&mock_server).await;

    mount_container_view(&mock_server, "HostSystem", "view-hosts").await;
    mount_retrieve(
        &mock_server,
        "view-hosts",
        json!({
            "objects": [object_content("HostSystem", "host-10", host_summary("host-10", "esx-01", 8, 2400, 0))]
        }),
    )
    .await;
    mount_destroy(&mock_server, "view-hosts").await;

    mount_container_view(&mock_server, "VirtualMachine", "view-vms").await;
    mount_retrieve(
        &mock_server,
        "view-vms",
        json!({
            "objects": [
                object_content("VirtualMachine", "vm-100", vm_summary("web-01", Some("host-10"), 4, 960)),
                object_content("VirtualMachine", "vm-101", vm_summary("orphan", Some("host-99"), 2, 500)),
                object_content("VirtualMachine", "vm-102", vm_summary("template", None, 2, 0))
            ]
        }),
    )
    .await;
    mount_destroy(&mock_server, "view-vms").await;

    let hosts = client.fetch_hosts().await.unwrap();
    let vms = client.fetch_vms(&hosts).await.unwrap();
    assert_eq!(vms.len(), 3);

    let web = &vms["web-01"];
    assert_eq!(web.power_state, "poweredOn");
    assert_eq!(web.boot_epoch_seconds, 1_709_251_200);
    assert_eq!(web.memory_overhead_bytes, 52_428_800);
    assert_eq!(web.cpu.cores, 4);
    assert_eq!(web.cpu.clock_rate_mhz, 2400);
    assert_eq!(web.cpu.usage_total_mhz, 9600);
    assert_eq!(web.cpu.usage_percent, 10.0);
    assert_eq!(web.memory.total_bytes, 8192 * 1024 * 1024);
    assert_eq!(web.memory.used_bytes, 2048 * 1024 * 1024);
    assert_eq!(web.memory.usage_percent, 25.0);

    let orphan = &vms["orphan"];
    assert_eq!(orphan.cpu.clock_rate_mhz, 0);
    assert_eq!(orphan.cpu.usage_total_mhz, 0);
    assert_eq!(orphan.cpu.usage_percent, 0.0);

    assert_eq!(vms["template"].cpu.usage_percent, 0.0);
}
