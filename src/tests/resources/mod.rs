//! Shared fixtures for the wiremock-driven tests.

mod datastore_tests;
mod host_tests;
mod vm_tests;

use crate::{
    RateLimitConfig,
    core::{
        domain::{
            model::{
                managed_object::ServiceContent, vsphere_connection::VsphereConnection,
                vsphere_session::VsphereSession,
            },
            value_object::{
                SESSION_HEADER, VsphereHost, VspherePassword, VsphereSessionId, VsphereUsername,
            },
        },
        infrastructure::api_client::ApiClient,
    },
    inventory::application::service::inventory_service::InventoryClient,
};
use serde_json::{Value, json};
use url::Url;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};

pub(crate) const API_PREFIX: &str = "/sdk/vim25/8.0.1.0";

pub(crate) fn create_test_connection(server_url: &str) -> VsphereConnection {
    let host = VsphereHost::new_unchecked(server_url.trim_start_matches("http://").to_string());
    let username = VsphereUsername::new_unchecked("administrator@vsphere.local".to_string());
    let password = VspherePassword::new_unchecked("VMware1!".to_string());
    let base_url = Url::parse(&format!("{}{}/", server_url, API_PREFIX)).unwrap();
    VsphereConnection::with_base_url(host, username, password, false, base_url)
}

pub(crate) fn create_test_client(
    mock_server: &MockServer,
    rate_limit: Option<RateLimitConfig>,
) -> ApiClient {
    ApiClient::new(create_test_connection(&mock_server.uri()), rate_limit).unwrap()
}

pub(crate) fn test_service_content() -> Value {
    json!({
        "_typeName": "ServiceContent",
        "rootFolder": {"_typeName": "ManagedObjectReference", "type": "Folder", "value": "group-d1"},
        "propertyCollector": {"_typeName": "ManagedObjectReference", "type": "PropertyCollector", "value": "propertyCollector"},
        "viewManager": {"_typeName": "ManagedObjectReference", "type": "ViewManager", "value": "ViewManager"},
        "sessionManager": {"_typeName": "ManagedObjectReference", "type": "SessionManager", "value": "SessionManager"},
        "about": {"_typeName": "AboutInfo", "fullName": "VMware vCenter Server 8.0.1 build-21560480", "apiVersion": "8.0.1.0"}
    })
}

pub(crate) fn create_test_session() -> VsphereSession {
    let content: ServiceContent = serde_json::from_value(test_service_content()).unwrap();
    VsphereSession::new(
        VsphereSessionId::new_unchecked("test-session".to_string()),
        content,
    )
}

pub(crate) async fn create_authenticated_client(mock_server: &MockServer) -> ApiClient {
    let client = create_test_client(mock_server, None);
    client.set_session(create_test_session()).await;
    client
}

pub(crate) async fn create_inventory_client(mock_server: &MockServer) -> InventoryClient {
    InventoryClient::new(create_authenticated_client(mock_server).await)
}

/// Mounts a successful service-content lookup and login handing out `session_id`.
pub(crate) async fn mount_login(mock_server: &MockServer, session_id: &str) {
    Mock::given(method("GET"))
        .and(path(format!(
            "{}/ServiceInstance/ServiceInstance/content",
            API_PREFIX
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(test_service_content()))
        .mount(mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!(
            "{}/SessionManager/SessionManager/Login",
            API_PREFIX
        )))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(SESSION_HEADER, session_id)
                .set_body_json(json!({
                    "_typeName": "UserSession",
                    "userName": "VSPHERE.LOCAL\\Administrator",
                    "fullName": "Administrator vsphere.local"
                })),
        )
        .mount(mock_server)
        .await;
}

/// Mounts `CreateContainerView` for `kind`, answering with `view_id`.
pub(crate) async fn mount_container_view(mock_server: &MockServer, kind: &str, view_id: &str) {
    Mock::given(method("POST"))
        .and(path(format!(
            "{}/ViewManager/ViewManager/CreateContainerView",
            API_PREFIX
        )))
        .and(body_partial_json(json!({
            "container": {"type": "Folder", "value": "group-d1"},
            "type": [kind],
            "recursive": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_typeName": "ManagedObjectReference",
            "type": "ContainerView",
            "value": view_id
        })))
        .mount(mock_server)
        .await;
}

/// Mounts the first `RetrievePropertiesEx` page for `view_id`.
pub(crate) async fn mount_retrieve(mock_server: &MockServer, view_id: &str, page: Value) {
    Mock::given(method("POST"))
        .and(path(format!(
            "{}/PropertyCollector/propertyCollector/RetrievePropertiesEx",
            API_PREFIX
        )))
        .and(body_partial_json(json!({
            "specSet": [{"objectSet": [{"obj": {"type": "ContainerView", "value": view_id}}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(page))
        .mount(mock_server)
        .await;
}

/// Mounts `DestroyView` for `view_id`, expected exactly once.
pub(crate) async fn mount_destroy(mock_server: &MockServer, view_id: &str) {
    Mock::given(method("POST"))
        .and(path(format!(
            "{}/ContainerView/{}/DestroyView",
            API_PREFIX, view_id
        )))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(mock_server)
        .await;
}

/// Wraps `summary` as one `ObjectContent` of a retrieve result.
pub(crate) fn object_content(kind: &str, id: &str, summary: Value) -> Value {
    json!({
        "_typeName": "ObjectContent",
        "obj": {"_typeName": "ManagedObjectReference", "type": kind, "value": id},
        "propSet": [{"_typeName": "DynamicProperty", "name": "summary", "val": summary}]
    })
}

pub(crate) fn host_summary(id: &str, name: &str, cores: i64, mhz: i64, cpu_usage: i64) -> Value {
    json!({
        "_typeName": "HostListSummary",
        "host": {"_typeName": "ManagedObjectReference", "type": "HostSystem", "value": id},
        "hardware": {
            "_typeName": "HostHardwareSummary",
            "vendor": "Dell Inc.",
            "memorySize": 68719476736i64,
            "cpuMhz": mhz,
            "numCpuCores": cores,
            "numCpuThreads": cores * 2
        },
        "runtime": {
            "_typeName": "HostRuntimeInfo",
            "connectionState": "connected",
            "powerState": "poweredOn",
            "bootTime": "2024-01-15T10:20:30.123Z"
        },
        "config": {"_typeName": "HostConfigSummary", "name": name, "port": 443},
        "quickStats": {
            "_typeName": "HostListSummaryQuickStats",
            "overallCpuUsage": cpu_usage,
            "overallMemoryUsage": 16384
        }
    })
}
