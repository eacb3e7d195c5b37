//! Bodies of `PropertyCollector.RetrievePropertiesEx` and its continuation.

use crate::core::domain::model::managed_object::ManagedObjectReference;
use serde::Serialize;

/// Name of the traversal that walks every object referenced by a container view.
const VIEW_TRAVERSAL: &str = "traverseEntities";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievePropertiesRequest {
    pub spec_set: Vec<PropertyFilterSpec>,
    pub options: RetrieveOptions,
}

impl RetrievePropertiesRequest {
    /// Retrieves `path_set` for every object of `kind` reachable through `view`.
    pub fn for_container_view(
        view: ManagedObjectReference,
        kind: &str,
        path_set: &[&str],
        max_objects: Option<u32>,
    ) -> Self {
        Self {
            spec_set: vec![PropertyFilterSpec {
                type_name: "PropertyFilterSpec",
                prop_set: vec![PropertySpec {
                    type_name: "PropertySpec",
                    kind: kind.to_string(),
                    path_set: path_set.iter().map(|p| p.to_string()).collect(),
                }],
                object_set: vec![ObjectSpec {
                    type_name: "ObjectSpec",
                    obj: view,
                    skip: true,
                    select_set: vec![TraversalSpec {
                        type_name: "TraversalSpec",
                        name: VIEW_TRAVERSAL.to_string(),
                        kind: "ContainerView".to_string(),
                        path: "view".to_string(),
                        skip: false,
                    }],
                }],
            }],
            options: RetrieveOptions {
                type_name: "RetrieveOptions",
                max_objects,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilterSpec {
    #[serde(rename = "_typeName")]
    type_name: &'static str,
    pub prop_set: Vec<PropertySpec>,
    pub object_set: Vec<ObjectSpec>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySpec {
    #[serde(rename = "_typeName")]
    type_name: &'static str,
    #[serde(rename = "type")]
    pub kind: String,
    pub path_set: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSpec {
    #[serde(rename = "_typeName")]
    type_name: &'static str,
    pub obj: ManagedObjectReference,
    pub skip: bool,
    pub select_set: Vec<TraversalSpec>,
}

#[derive(Debug, Serialize)]
pub struct TraversalSpec {
    #[serde(rename = "_typeName")]
    type_name: &'static str,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub path: String,
    pub skip: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveOptions {
    #[serde(rename = "_typeName")]
    type_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_objects: Option<u32>,
}

/// Body of `PropertyCollector.ContinueRetrievePropertiesEx`.
#[derive(Debug, Serialize)]
pub struct ContinueRetrievePropertiesRequest {
    pub token: String,
}
