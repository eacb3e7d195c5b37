//! The dual-cadence sampling loop.

use crate::{
    core::domain::{
        error::{StatsError, StatsResult},
        port::{InventorySource, TelemetrySink},
    },
    sampling::application::service::sampler::Sampler,
};
use std::{fmt, future::Future, time::Duration};
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, warn};

/// Which of the two timers fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// The slow timer: datastores.
    Datastore,
    /// The fast timer: hosts and VMs.
    Runtime,
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cadence::Datastore => f.write_str("datastore"),
            Cadence::Runtime => f.write_str("runtime"),
        }
    }
}

/// Timer periods and deadlines for the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleSettings {
    pub datastore_interval: Duration,
    pub runtime_interval: Duration,
    /// Deadline for one sampling cycle.
    pub cycle_timeout: Duration,
    /// How long to wait for the sink before giving up.
    pub ready_timeout: Duration,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            datastore_interval: Duration::from_secs(60),
            runtime_interval: Duration::from_secs(5),
            cycle_timeout: Duration::from_secs(5),
            ready_timeout: Duration::from_secs(30),
        }
    }
}

/// Drives a [`Sampler`] from two independent timers.
///
/// One cycle runs at a time. A tick that comes due while a cycle is running
/// is coalesced into the next one, never queued.
pub struct Scheduler<I: ?Sized, S: ?Sized> {
    sampler: Sampler<I, S>,
    settings: ScheduleSettings,
}

impl<I, S> Scheduler<I, S>
where
    I: InventorySource + ?Sized,
    S: TelemetrySink + ?Sized,
{
    pub fn new(sampler: Sampler<I, S>, settings: ScheduleSettings) -> Self {
        Self { sampler, settings }
    }

    /// Waits for the sink, then samples until `shutdown` resolves.
    ///
    /// Neither timer fires at startup; the first fire of each comes one
    /// period after the loop starts.
    ///
    /// # Errors
    /// Only the readiness wait can fail. Per-cycle errors are logged.
    pub async fn run<F>(self, shutdown: F) -> StatsResult<()>
    where
        F: Future<Output = ()>,
    {
        self.sampler
            .wait_for_sink(self.settings.ready_timeout)
            .await?;

        let start = Instant::now();
        let mut datastore_timer = interval_at(
            start + self.settings.datastore_interval,
            self.settings.datastore_interval,
        );
        datastore_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut runtime_timer = interval_at(
            start + self.settings.runtime_interval,
            self.settings.runtime_interval,
        );
        runtime_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            datastore_interval = ?self.settings.datastore_interval,
            runtime_interval = ?self.settings.runtime_interval,
            "sampling started"
        );

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("sampling stopped");
                    return Ok(());
                }
                _ = datastore_timer.tick() => {
                    let _ = self.run_cycle(Cadence::Datastore).await;
                }
                _ = runtime_timer.tick() => {
                    let _ = self.run_cycle(Cadence::Runtime).await;
                }
            }
        }
    }

    /// Runs one cycle of `cadence` under the cycle deadline and logs the outcome.
    pub async fn run_cycle(&self, cadence: Cadence) -> StatsResult<usize> {
        let deadline = self.settings.cycle_timeout;
        let cycle = async {
            match cadence {
                Cadence::Datastore => self.sampler.sample_datastores().await,
                Cadence::Runtime => self.sampler.sample_hosts_and_vms().await,
            }
        };

        let result = match tokio::time::timeout(deadline, cycle).await {
            Ok(result) => result,
            Err(_) => Err(StatsError::Timeout(deadline)),
        };
        match &result {
            Ok(written) => debug!(%cadence, written, "cycle complete"),
            Err(e) => warn!(%cadence, error = %e, "cycle failed"),
        }
        result
    }
}
