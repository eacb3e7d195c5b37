//! Managed-object plumbing shared by the VI/JSON requests and responses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference to a server-side managed object (e.g. `HostSystem:host-42`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ManagedObjectReference {
    #[serde(rename = "_typeName", default = "ManagedObjectReference::type_name")]
    type_name: String,
    /// The managed object type (e.g. `HostSystem`, `Folder`).
    #[serde(rename = "type")]
    pub kind: String,
    /// The server-assigned id (e.g. `host-42`).
    pub value: String,
}

impl ManagedObjectReference {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            type_name: Self::type_name(),
            kind: kind.into(),
            value: value.into(),
        }
    }

    fn type_name() -> String {
        "ManagedObjectReference".to_string()
    }

    /// The REST path segment addressing this object (`{type}/{id}`).
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}/{}", self.kind, self.value)
    }
}

/// The managed entity kinds the inventory client enumerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagedEntityKind {
    HostSystem,
    Datastore,
    VirtualMachine,
}

impl ManagedEntityKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ManagedEntityKind::HostSystem => "HostSystem",
            ManagedEntityKind::Datastore => "Datastore",
            ManagedEntityKind::VirtualMachine => "VirtualMachine",
        }
    }
}

impl fmt::Display for ManagedEntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The subset of `ServiceContent` the client needs.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceContent {
    pub root_folder: ManagedObjectReference,
    pub property_collector: ManagedObjectReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_manager: Option<ManagedObjectReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_manager: Option<ManagedObjectReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<AboutInfo>,
}

/// Product information reported by the endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutInfo {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub api_version: String,
}
