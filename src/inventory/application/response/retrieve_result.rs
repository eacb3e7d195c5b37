use crate::core::domain::model::managed_object::ManagedObjectReference;
use serde::Deserialize;

/// One page of `RetrievePropertiesEx` results.
///
/// A present `token` means more pages are waiting on the server.
#[derive(Debug, Default, Deserialize)]
pub struct RetrieveResult {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub objects: Vec<ObjectContent>,
}

/// The requested properties of a single managed object.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectContent {
    pub obj: ManagedObjectReference,
    #[serde(default)]
    pub prop_set: Vec<DynamicProperty>,
}

impl ObjectContent {
    /// Returns the value of property `name`, if it was retrieved.
    pub fn property(&self, name: &str) -> Option<&serde_json::Value> {
        self.prop_set.iter().find(|p| p.name == name).map(|p| &p.val)
    }
}

#[derive(Debug, Deserialize)]
pub struct DynamicProperty {
    pub name: String,
    #[serde(default)]
    pub val: serde_json::Value,
}
