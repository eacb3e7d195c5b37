//! Turns an inventory snapshot into tagged records and writes them to the sink.

use crate::core::domain::{
    error::{StatsError, StatsResult},
    model::record::{Record, RecordKind},
    port::{InventorySource, TelemetrySink},
    value_object::TagHandle,
};
use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tracing::debug;

/// Runs one sampling operation per call.
///
/// Writes are sequential. The first fetch, encode or write error ends the
/// call; records already written stay written.
pub struct Sampler<I: ?Sized, S: ?Sized> {
    inventory: Arc<I>,
    sink: Arc<S>,
    tag: TagHandle,
}

impl<I, S> Sampler<I, S>
where
    I: InventorySource + ?Sized,
    S: TelemetrySink + ?Sized,
{
    pub fn new(inventory: Arc<I>, sink: Arc<S>, tag: TagHandle) -> Self {
        Self {
            inventory,
            sink,
            tag,
        }
    }

    /// Blocks until the sink reports one healthy destination.
    ///
    /// # Errors
    /// Returns `StatsError::Session` if the sink is not ready within `timeout`.
    pub async fn wait_for_sink(&self, timeout: Duration) -> StatsResult<()> {
        self.sink.wait_until_ready(1, timeout).await
    }

    /// Emits one `datastore` record per datastore. Returns the number written.
    pub async fn sample_datastores(&self) -> StatsResult<usize> {
        let datastores = self
            .inventory
            .fetch_datastores()
            .await
            .map_err(in_phase(RecordKind::Datastore))?;
        self.emit(RecordKind::Datastore, &datastores).await
    }

    /// Emits one `host` record per host, then one `guest` record per VM.
    ///
    /// The VM batch is stamped after the host batch has been written, so the
    /// two batches carry different timestamps.
    pub async fn sample_hosts_and_vms(&self) -> StatsResult<usize> {
        let hosts = self
            .inventory
            .fetch_hosts()
            .await
            .map_err(in_phase(RecordKind::Host))?;
        let written = self.emit(RecordKind::Host, &hosts).await?;

        let vms = self
            .inventory
            .fetch_vms(&hosts)
            .await
            .map_err(in_phase(RecordKind::Guest))?;
        Ok(written + self.emit(RecordKind::Guest, &vms).await?)
    }

    async fn emit<T: Serialize>(
        &self,
        kind: RecordKind,
        entities: &HashMap<String, T>,
    ) -> StatsResult<usize> {
        let timestamp = capture_timestamp();
        for (name, sample) in entities {
            let payload = Record::new(kind, name, sample)
                .encode()
                .map_err(in_phase(kind))?;
            self.sink
                .write(timestamp, &self.tag, payload)
                .await
                .map_err(in_phase(kind))?;
        }
        debug!(kind = %kind, count = entities.len(), %timestamp, "records written");
        Ok(entities.len())
    }
}

/// Tags an error with the record kind whose phase it ended.
fn in_phase(kind: RecordKind) -> impl FnOnce(StatsError) -> StatsError {
    move |source| StatsError::Sample {
        phase: kind.as_str(),
        source: Box::new(source),
    }
}

/// Capture time truncated to whole seconds.
fn capture_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}
