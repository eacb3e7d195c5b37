//! Samples vSphere host, VM and datastore statistics on two cadences and
//! forwards them as flat JSON records to a telemetry sink.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use vsphere_stats::{
//!     Config, HecSink, InventoryClient, Sampler, Scheduler, StatsResult, TelemetrySink,
//! };
//!
//! #[tokio::main]
//! async fn main() -> StatsResult<()> {
//!     let config = Config::builder()
//!         .host("vcenter.example.com")
//!         .credentials("reader@vsphere.local", "password")
//!         .target("indexer.example.com:8088")
//!         .secret("hec-token")
//!         .tag("vmware")
//!         .build()?;
//!
//!     let sink = Arc::new(HecSink::new(config.ingest_target(), config.ingest_secret().clone())?);
//!     let tag = sink.resolve_tag(config.ingest_tag())?;
//!     let inventory = Arc::new(InventoryClient::connect(&config).await?);
//!
//!     let sampler = Sampler::new(inventory.clone(), sink, tag);
//!     Scheduler::new(sampler, config.schedule())
//!         .run(async {
//!             let _ = tokio::signal::ctrl_c().await;
//!         })
//!         .await?;
//!
//!     inventory.logout().await;
//!     Ok(())
//! }
//! ```

mod auth;
mod config;
mod core;
mod inventory;
mod sampling;

pub use crate::{
    config::{Config, ConfigBuilder, DEFAULT_API_RELEASE, RateLimitConfig},
    core::{
        domain::{
            error::{StatsError, StatsResult, ValidationError},
            model::{
                datastore::Datastore,
                host::Host,
                record::{Record, RecordKind},
                sample::{CpuSample, MemorySample},
                vm::Vm,
            },
            port::{InventorySource, TelemetrySink},
            value_object::{
                IngestSecret, IngestTarget, TagHandle, VsphereHost, VspherePassword,
                VsphereUsername,
            },
        },
        infrastructure::hec_sink::HecSink,
    },
    inventory::application::service::inventory_service::InventoryClient,
    sampling::application::service::{
        sampler::Sampler,
        scheduler::{Cadence, ScheduleSettings, Scheduler},
    },
};

#[cfg(test)]
mod tests;
