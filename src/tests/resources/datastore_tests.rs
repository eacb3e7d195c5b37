use super::{
    create_inventory_client, mount_container_view, mount_destroy, mount_retrieve, object_content,
};
use crate::core::domain::port::InventorySource;
use serde_json::json;
use wiremock::MockServer;

fn datastore_summary(name: &str, capacity: i64, free: i64, uncommitted: i64) -> serde_json::Value {
    json!({
        "_typeName": "DatastoreSummary",
        "datastore": {"_typeName": "ManagedObjectReference", "type": "Datastore", "value": "datastore-1"},
        "name": name,
        "url": "ds:///vmfs/volumes/6512a0c4-1b2e3f40/",
        "capacity": capacity,
        "freeSpace": free,
        "uncommitted": uncommitted,
        "accessible": true,
        "multipleHostAccess": true,
        "type": "VMFS",
        "maintenanceMode": "normal"
    })
}

#[tokio::test]
async fn test_fetch_datastores() {
    let mock_server = MockServer::start().await;
    let client = create_inventory_client(&mock_server).await;

    mount_container_view(&mock_server, "Datastore", "view-ds").await;
    mount_retrieve(
        &mock_server,
        "view-ds",
        json!({
            "objects": [
                object_content("Datastore", "datastore-1", datastore_summary("ds-used", 1000, 300, 0)),
                object_content("Datastore", "datastore-2", datastore_summary("ds-empty", 1000, 1000, 0)),
                object_content("Datastore", "datastore-3", datastore_summary("ds-thin", 1000, 200, 100))
            ]
        }),
    )
    .await;
    mount_destroy(&mock_server, "view-ds").await;

    let datastores = client.fetch_datastores().await.unwrap();
    assert_eq!(datastores.len(), 3);

    let used = &datastores["ds-used"];
    assert_eq!(used.capacity_bytes, 1000);
    assert_eq!(used.free_bytes, 300);
    assert!(used.accessible);
    assert_eq!(used.fs_type, "VMFS");
    assert_eq!(used.usage_percent, 70.0);

    assert_eq!(datastores["ds-empty"].usage_percent, 0.0);
    assert_eq!(datastores["ds-thin"].usage_percent, 70.0);
}

#[tokio::test]
async fn test_object_without_summary_is_skipped() {
    let mock_server = MockServer::start().await;
    let client = create_inventory_client(&mock_server).await;

    mount_container_view(&mock_server, "Datastore", "view-ds").await;
    mount_retrieve(
        &mock_server,
        "view-ds",
        json!({
            "objects": [
                object_content("Datastore", "datastore-1", datastore_summary("ds1", 1000, 300, 0)),
                {
                    "obj": {"type": "Datastore", "value": "datastore-2"},
                    "missingSet": [{"path": "summary"}]
                }
            ]
        }),
    )
    .await;
    mount_destroy(&mock_server, "view-ds").await;

    let datastores = client.fetch_datastores().await.unwrap();
    assert_eq!(datastores.len(), 1);
    assert!(datastores.contains_key("ds1"));
}
