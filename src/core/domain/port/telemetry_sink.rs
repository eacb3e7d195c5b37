use crate::core::domain::{error::StatsResult, value_object::TagHandle};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// The downstream destination for emitted records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Blocks until at least `min_destinations` destinations are reachable.
    ///
    /// # Errors
    /// Returns `StatsError::Session` if that does not happen within `timeout`.
    async fn wait_until_ready(&self, min_destinations: usize, timeout: Duration) -> StatsResult<()>;

    /// Resolves a configured tag name into a handle usable with [`TelemetrySink::write`].
    fn resolve_tag(&self, name: &str) -> StatsResult<TagHandle>;

    /// Sends one encoded record.
    async fn write(
        &self,
        timestamp: DateTime<Utc>,
        tag: &TagHandle,
        payload: Vec<u8>,
    ) -> StatsResult<()>;
}
