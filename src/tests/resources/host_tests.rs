use super::{
    API_PREFIX, create_inventory_client, host_summary, mount_container_view, mount_destroy,
    mount_login, mount_retrieve, object_content,
};
use crate::{StatsError, core::domain::port::InventorySource};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

#[tokio::test]
async fn test_fetch_hosts_success() {
    let mock_server = MockServer::start().await;
    let client = create_inventory_client(&mock_server).await;

    mount_container_view(&mock_server, "HostSystem", "view-hosts").await;
    mount_retrieve(
        &mock_server,
        "view-hosts",
        json!({
            "_typeName": "RetrieveResult",
            "objects": [
                object_content("HostSystem", "host-10", host_summary("host-10", "esx-01.lab.local", 8, 2400, 9600)),
                object_content("HostSystem", "host-11", host_summary("host-11", "esx-02.lab.local", 16, 2000, 0))
            ]
        }),
    )
    .await;
    mount_destroy(&mock_server, "view-hosts").await;

    let hosts = client.fetch_hosts().await.unwrap();
    assert_eq!(hosts.len(), 2);

    let esx01 = &hosts["esx-01.lab.local"];
    assert_eq!(esx01.id(), "host-10");
    assert_eq!(esx01.power_state, "poweredOn");
    assert_eq!(esx01.boot_epoch_seconds, 1_705_314_030);
    assert_eq!(esx01.cpu.cores, 8);
    assert_eq!(esx01.cpu.clock_rate_mhz, 2400);
    assert_eq!(esx01.cpu.usage_total_mhz, 19200);
    assert_eq!(esx01.cpu.usage_percent, 50.0);
    assert_eq!(esx01.memory.total_bytes, 68_719_476_736);
    assert_eq!(esx01.memory.used_bytes, 16384 * 1024 * 1024);
    assert_eq!(esx01.memory.usage_percent, 25.0);

    assert_eq!(hosts["esx-02.lab.local"].cpu.usage_percent, 0.0);
}

#[tokio::test]
async fn test_fetch_hosts_follows_continuation_token() {
    let mock_server = MockServer::start().await;
    let client = create_inventory_client(&mock_server)
        .await
        .with_page_size(Some(1));

    mount_container_view(&mock_server, "HostSystem", "view-hosts").await;
    mount_retrieve(
        &mock_server,
        "view-hosts",
        json!({
            "token": "page-2",
            "objects": [object_content("HostSystem", "host-10", host_summary("host-10", "esx-01", 8, 2400, 0))]
        }),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(format!(
            "{}/PropertyCollector/propertyCollector/ContinueRetrievePropertiesEx",
            API_PREFIX
        )))
        .and(body_json(json!({"token": "page-2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [object_content("HostSystem", "host-11", host_summary("host-11", "esx-02", 8, 2400, 0))]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_destroy(&mock_server, "view-hosts").await;

    let hosts = client.fetch_hosts().await.unwrap();
    assert_eq!(hosts.len(), 2);
    assert!(hosts.contains_key("esx-01"));
    assert!(hosts.contains_key("esx-02"));
}

#[tokio::test]
async fn test_empty_inventory() {
    let mock_server = MockServer::start().await;
    let client = create_inventory_client(&mock_server).await;

    mount_container_view(&mock_server, "HostSystem", "view-hosts").await;
    Mock::given(method("POST"))
        .and(path(format!(
            "{}/PropertyCollector/propertyCollector/RetrievePropertiesEx",
            API_PREFIX
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&mock_server)
        .await;
    mount_destroy(&mock_server, "view-hosts").await;

    let hosts = client.fetch_hosts().await.unwrap();
    assert!(hosts.is_empty());
}

#[tokio::test]
async fn test_view_creation_failure_is_a_query_error() {
    let mock_server = MockServer::start().await;
    let client = create_inventory_client(&mock_server).await;

    Mock::given(method("POST"))
        .and(path(format!(
            "{}/ViewManager/ViewManager/CreateContainerView",
            API_PREFIX
        )))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "_typeName": "ManagedObjectNotFound",
            "faultstring": "The object has already been deleted or has not been completely created"
        })))
        .mount(&mock_server)
        .await;

    match client.fetch_hosts().await {
        Err(StatsError::Query { entity, message }) => {
            assert_eq!(entity, "HostSystem");
            assert!(message.contains("500"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_retrieval_failure_still_destroys_view() {
    let mock_server = MockServer::start().await;
    let client = create_inventory_client(&mock_server).await;

    mount_container_view(&mock_server, "HostSystem", "view-hosts").await;
    Mock::given(method("POST"))
        .and(path(format!(
            "{}/PropertyCollector/propertyCollector/RetrievePropertiesEx",
            API_PREFIX
        )))
        .respond_with(ResponseTemplate::new(500).set_body_string("InvalidProperty"))
        .mount(&mock_server)
        .await;
    mount_destroy(&mock_server, "view-hosts").await;

    let result = client.fetch_hosts().await;
    assert!(matches!(result, Err(StatsError::Query { .. })));
}

#[tokio::test]
async fn test_expired_session_is_renewed() {
    let mock_server = MockServer::start().await;
    let client = create_inventory_client(&mock_server).await;

    Mock::given(method("POST"))
        .and(path(format!(
            "{}/ViewManager/ViewManager/CreateContainerView",
            API_PREFIX
        )))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_login(&mock_server, "renewed-session").await;
    mount_container_view(&mock_server, "HostSystem", "view-hosts").await;
    mount_retrieve(&mock_server, "view-hosts", json!({"objects": []})).await;
    mount_destroy(&mock_server, "view-hosts").await;

    let hosts = client.fetch_hosts().await.unwrap();
    assert!(hosts.is_empty());
}
