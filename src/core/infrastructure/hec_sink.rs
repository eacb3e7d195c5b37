//! Telemetry sink backed by an HTTP event collector.

use crate::core::domain::{
    error::{StatsError, StatsResult},
    port::TelemetrySink,
    value_object::{IngestSecret, IngestTarget, TagHandle},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, header::AUTHORIZATION};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const HEALTH_PATH: &str = "services/collector/health";
const EVENT_PATH: &str = "services/collector/event";
const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Sends every record as one event to a single collector endpoint.
#[derive(Debug, Clone)]
pub struct HecSink {
    http_client: Client,
    base_url: Url,
    secret: IngestSecret,
}

#[derive(Debug, Serialize)]
struct Event<'a> {
    time: i64,
    sourcetype: &'a str,
    event: serde_json::Value,
}

impl HecSink {
    /// Creates a sink that talks cleartext HTTP to `target`.
    ///
    /// # Errors
    /// Returns `StatsError::Validation` if the target does not form a URL and
    /// `StatsError::Connection` if the HTTP client cannot be built.
    pub fn new(target: &IngestTarget, secret: IngestSecret) -> StatsResult<Self> {
        Self::with_base_url(target.base_url()?, secret)
    }

    /// Creates a sink against an explicit base URL.
    pub fn with_base_url(base_url: Url, secret: IngestSecret) -> StatsResult<Self> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| StatsError::Connection(e.to_string()))?;
        Ok(Self {
            http_client,
            base_url,
            secret,
        })
    }

    fn endpoint(&self, path: &str) -> StatsResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| StatsError::Config(format!("Invalid sink URL: {}", e)))
    }

    async fn is_healthy(&self, url: &Url) -> bool {
        match self
            .http_client
            .get(url.clone())
            .header(AUTHORIZATION, self.secret.as_authorization_header())
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                debug!(status = %response.status(), "sink not healthy yet");
                false
            }
            Err(e) => {
                debug!(error = %e, "sink unreachable");
                false
            }
        }
    }
}

#[async_trait]
impl TelemetrySink for HecSink {
    async fn wait_until_ready(&self, min_destinations: usize, timeout: Duration) -> StatsResult<()> {
        if min_destinations > 1 {
            return Err(StatsError::Config(format!(
                "sink has a single destination, {} requested",
                min_destinations
            )));
        }
        if min_destinations == 0 {
            return Ok(());
        }

        let url = self.endpoint(HEALTH_PATH)?;
        let poll = async {
            while !self.is_healthy(&url).await {
                tokio::time::sleep(HEALTH_POLL_INTERVAL).await;
            }
        };
        tokio::time::timeout(timeout, poll).await.map_err(|_| {
            StatsError::Session(format!(
                "telemetry sink {} not ready after {:?}",
                self.base_url, timeout
            ))
        })?;

        info!(sink = %self.base_url, "telemetry sink ready");
        Ok(())
    }

    fn resolve_tag(&self, name: &str) -> StatsResult<TagHandle> {
        Ok(TagHandle::new(name)?)
    }

    async fn write(
        &self,
        timestamp: DateTime<Utc>,
        tag: &TagHandle,
        payload: Vec<u8>,
    ) -> StatsResult<()> {
        let event = match serde_json::from_slice(&payload) {
            Ok(value) => value,
            Err(_) => serde_json::Value::String(String::from_utf8_lossy(&payload).into_owned()),
        };
        let body = Event {
            time: timestamp.timestamp(),
            sourcetype: tag.as_str(),
            event,
        };

        let response = self
            .http_client
            .post(self.endpoint(EVENT_PATH)?)
            .header(AUTHORIZATION, self.secret.as_authorization_header())
            .json(&body)
            .send()
            .await
            .map_err(|e| StatsError::Write(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StatsError::Write(format!(
                "sink rejected event ({}): {}",
                status, message
            )));
        }
        Ok(())
    }
}
