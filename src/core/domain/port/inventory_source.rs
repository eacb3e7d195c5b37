use crate::core::domain::{
    error::StatsResult,
    model::{datastore::Datastore, host::Host, vm::Vm},
};
use async_trait::async_trait;
use std::collections::HashMap;

/// A point-in-time view of the management endpoint's inventory.
///
/// Every map is keyed by entity display name. Names are assumed unique per
/// inventory; a duplicate name keeps the last entity returned.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Enumerates every host under the root folder.
    async fn fetch_hosts(&self) -> StatsResult<HashMap<String, Host>>;

    /// Enumerates every datastore under the root folder.
    async fn fetch_datastores(&self) -> StatsResult<HashMap<String, Datastore>>;

    /// Enumerates every VM, borrowing clock rates from `hosts`.
    async fn fetch_vms(&self, hosts: &HashMap<String, Host>) -> StatsResult<HashMap<String, Vm>>;
}
