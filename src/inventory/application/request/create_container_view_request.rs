use crate::core::domain::model::managed_object::ManagedObjectReference;
use serde::Serialize;

/// Body of `ViewManager.CreateContainerView`.
#[derive(Debug, Serialize)]
pub struct CreateContainerViewRequest {
    pub container: ManagedObjectReference,
    #[serde(rename = "type")]
    pub kinds: Vec<String>,
    pub recursive: bool,
}
