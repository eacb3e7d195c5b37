//! Inventory enumeration over the VI/JSON property collector.

use crate::{
    Config,
    core::{
        domain::{
            error::{StatsError, StatsResult},
            model::{
                datastore::Datastore,
                host::Host,
                managed_object::{ManagedEntityKind, ManagedObjectReference},
                vm::Vm,
                vsphere_connection::VsphereConnection,
            },
            port::InventorySource,
        },
        infrastructure::api_client::ApiClient,
    },
    inventory::application::{
        request::{
            create_container_view_request::CreateContainerViewRequest,
            retrieve_properties_request::{
                ContinueRetrievePropertiesRequest, RetrievePropertiesRequest,
            },
        },
        response::{
            retrieve_result::{ObjectContent, RetrieveResult},
            summary::{DatastoreSummary, HostListSummary, VirtualMachineSummary},
        },
        service::summary_mapper::{map_datastore, map_host, map_vm},
    },
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::{debug, warn};

const SUMMARY: &str = "summary";

/// Reads host, VM and datastore summaries from a vCenter or ESXi endpoint.
///
/// Every fetch creates a recursive container view under the root folder,
/// pages through `RetrievePropertiesEx` and destroys the view again.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    api: ApiClient,
    page_size: Option<u32>,
}

impl InventoryClient {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            page_size: None,
        }
    }

    /// Caps the number of objects the server returns per page.
    #[must_use]
    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    /// Builds a client from `config` and logs in.
    ///
    /// # Errors
    /// Returns `StatsError::Authentication` on bad credentials and
    /// `StatsError::Connection` or `StatsError::Session` when the endpoint
    /// cannot be reached or answers unexpectedly.
    pub async fn connect(config: &Config) -> StatsResult<Self> {
        let connection = VsphereConnection::new(
            config.vsphere_host().clone(),
            config.vsphere_username().clone(),
            config.vsphere_password().clone(),
            config.verify_certs(),
            config.api_release(),
        )?;
        let api = ApiClient::new(connection, config.rate_limit().cloned())?;
        api.login().await?;
        Ok(Self::new(api).with_page_size(config.page_size()))
    }

    /// Ends the management session. Failures are logged, not returned.
    pub async fn logout(&self) {
        self.api.logout().await;
    }

    /// Retrieves `path_set` for every `kind` entity below the root folder and
    /// decodes the `summary` property of each into `T`.
    async fn retrieve_summaries<T>(
        &self,
        kind: ManagedEntityKind,
        path_set: &[&str],
    ) -> StatsResult<Vec<(ManagedObjectReference, T)>>
    where
        T: DeserializeOwned,
    {
        let content = self.api.service_content().await?;
        let view_manager = content.view_manager.clone().ok_or_else(|| StatsError::Query {
            entity: kind.to_string(),
            message: "endpoint exposes no ViewManager".to_string(),
        })?;

        let request = CreateContainerViewRequest {
            container: content.root_folder.clone(),
            kinds: vec![kind.as_str().to_string()],
            recursive: true,
        };
        let view: ManagedObjectReference = self
            .api
            .post(&format!("{}/CreateContainerView", view_manager.path()), &request)
            .await
            .map_err(|e| query_error(kind, e))?;

        let collected = self
            .collect(&content.property_collector, &view, kind, path_set)
            .await;
        self.destroy_view(&view).await;

        collected?
            .into_iter()
            .filter_map(|object| {
                let Some(value) = object.property(SUMMARY) else {
                    debug!(entity = %kind, id = %object.obj.value, "object carried no summary");
                    return None;
                };
                Some(
                    serde_json::from_value::<T>(value.clone())
                        .map(|summary| (object.obj.clone(), summary))
                        .map_err(|e| StatsError::Query {
                            entity: kind.to_string(),
                            message: format!("malformed summary for {}: {}", object.obj.value, e),
                        }),
                )
            })
            .collect()
    }

    async fn collect(
        &self,
        collector: &ManagedObjectReference,
        view: &ManagedObjectReference,
        kind: ManagedEntityKind,
        path_set: &[&str],
    ) -> StatsResult<Vec<ObjectContent>> {
        let request = RetrievePropertiesRequest::for_container_view(
            view.clone(),
            kind.as_str(),
            path_set,
            self.page_size,
        );
        let mut page: Option<RetrieveResult> = self
            .api
            .post(&format!("{}/RetrievePropertiesEx", collector.path()), &request)
            .await
            .map_err(|e| query_error(kind, e))?;

        let mut objects = Vec::new();
        while let Some(result) = page.take() {
            objects.extend(result.objects);
            let Some(token) = result.token else {
                break;
            };
            debug!(entity = %kind, fetched = objects.len(), "continuing retrieval");
            page = self
                .api
                .post(
                    &format!("{}/ContinueRetrievePropertiesEx", collector.path()),
                    &ContinueRetrievePropertiesRequest { token },
                )
                .await
                .map_err(|e| query_error(kind, e))?;
        }
        Ok(objects)
    }

    async fn destroy_view(&self, view: &ManagedObjectReference) {
        let result: StatsResult<()> = self
            .api
            .post(&format!("{}/DestroyView", view.path()), &serde_json::json!({}))
            .await;
        if let Err(e) = result {
            warn!(view = %view.value, error = %e, "failed to destroy container view");
        }
    }
}

/// Server-side faults become `Query` errors; transport errors pass through.
fn query_error(kind: ManagedEntityKind, err: StatsError) -> StatsError {
    match err {
        StatsError::Api { status, message } => StatsError::Query {
            entity: kind.to_string(),
            message: format!("server returned {}: {}", status, message),
        },
        other => other,
    }
}

#[async_trait]
impl InventorySource for InventoryClient {
    async fn fetch_hosts(&self) -> StatsResult<HashMap<String, Host>> {
        let summaries: Vec<(ManagedObjectReference, HostListSummary)> = self
            .retrieve_summaries(ManagedEntityKind::HostSystem, &[SUMMARY])
            .await?;

        Ok(summaries
            .into_iter()
            .map(|(obj, summary)| {
                let id = summary
                    .host
                    .as_ref()
                    .map(|h| h.value.as_str())
                    .unwrap_or(obj.value.as_str());
                (summary.config.name.clone(), map_host(id, &summary))
            })
            .collect())
    }

    async fn fetch_datastores(&self) -> StatsResult<HashMap<String, Datastore>> {
        let summaries: Vec<(ManagedObjectReference, DatastoreSummary)> = self
            .retrieve_summaries(ManagedEntityKind::Datastore, &[SUMMARY, "info"])
            .await?;

        Ok(summaries
            .into_iter()
            .map(|(_, summary)| (summary.name.clone(), map_datastore(&summary)))
            .collect())
    }

    async fn fetch_vms(&self, hosts: &HashMap<String, Host>) -> StatsResult<HashMap<String, Vm>> {
        let summaries: Vec<(ManagedObjectReference, VirtualMachineSummary)> = self
            .retrieve_summaries(ManagedEntityKind::VirtualMachine, &[SUMMARY])
            .await?;

        Ok(summaries
            .into_iter()
            .map(|(_, summary)| (summary.config.name.clone(), map_vm(&summary, hosts)))
            .collect())
    }
}
