//! Process configuration, built once at startup.

use crate::{
    core::domain::{
        error::{StatsError, StatsResult},
        value_object::{IngestSecret, IngestTarget, VsphereHost, VspherePassword, VsphereUsername},
    },
    sampling::application::service::scheduler::ScheduleSettings,
};
use std::{path::Path, time::Duration};

/// Default API release segment of the VI/JSON base path.
pub const DEFAULT_API_RELEASE: &str = "8.0.1.0";

/// Client-side request throttling for the management API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst_size: u32,
}

/// Validated configuration for one sampler process.
#[derive(Debug, Clone)]
pub struct Config {
    vsphere_host: VsphereHost,
    vsphere_username: VsphereUsername,
    vsphere_password: VspherePassword,
    ingest_target: IngestTarget,
    ingest_secret: IngestSecret,
    ingest_tag: String,
    verify_certs: bool,
    api_release: String,
    rate_limit: Option<RateLimitConfig>,
    page_size: Option<u32>,
    schedule: ScheduleSettings,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn vsphere_host(&self) -> &VsphereHost {
        &self.vsphere_host
    }

    pub fn vsphere_username(&self) -> &VsphereUsername {
        &self.vsphere_username
    }

    pub fn vsphere_password(&self) -> &VspherePassword {
        &self.vsphere_password
    }

    pub fn ingest_target(&self) -> &IngestTarget {
        &self.ingest_target
    }

    pub fn ingest_secret(&self) -> &IngestSecret {
        &self.ingest_secret
    }

    /// The unresolved tag name; the sink turns it into a handle.
    pub fn ingest_tag(&self) -> &str {
        &self.ingest_tag
    }

    pub fn verify_certs(&self) -> bool {
        self.verify_certs
    }

    pub fn api_release(&self) -> &str {
        &self.api_release
    }

    pub fn rate_limit(&self) -> Option<&RateLimitConfig> {
        self.rate_limit.as_ref()
    }

    pub fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    pub fn schedule(&self) -> ScheduleSettings {
        self.schedule
    }
}

/// Builder for [`Config`].
///
/// Every required value must be set and non-empty; [`ConfigBuilder::build`]
/// reports the first one that is not.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    host: Option<String>,
    username: Option<String>,
    password: Option<String>,
    target: Option<String>,
    secret: Option<String>,
    tag: Option<String>,
    verify_certs: bool,
    api_release: Option<String>,
    rate_limit: Option<RateLimitConfig>,
    page_size: Option<u32>,
    schedule: ScheduleSettings,
}

impl ConfigBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn credentials(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username(username).password(password)
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// The cleartext `host:port` of the telemetry destination.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn verify_certs(mut self, verify_certs: bool) -> Self {
        self.verify_certs = verify_certs;
        self
    }

    pub fn api_release(mut self, release: impl Into<String>) -> Self {
        self.api_release = Some(release.into());
        self
    }

    pub fn rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn datastore_interval(mut self, interval: Duration) -> Self {
        self.schedule.datastore_interval = interval;
        self
    }

    pub fn runtime_interval(mut self, interval: Duration) -> Self {
        self.schedule.runtime_interval = interval;
        self
    }

    /// Deadline for each sampling cycle.
    pub fn api_timeout(mut self, timeout: Duration) -> Self {
        self.schedule.cycle_timeout = timeout;
        self
    }

    pub fn ready_timeout(mut self, timeout: Duration) -> Self {
        self.schedule.ready_timeout = timeout;
        self
    }

    /// Fills the values that are still unset from a dotenv-style file.
    ///
    /// Recognized keys: `HOST`, `USERNAME`, `PASSWORD`, `CLEARTEXT_TARGET`,
    /// `INGEST_SECRET` and `INGEST_TAG`. Other keys are ignored.
    pub fn env_file(mut self, path: impl AsRef<Path>) -> StatsResult<Self> {
        let path = path.as_ref();
        let entries = dotenvy::from_path_iter(path).map_err(|e| {
            StatsError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;

        for entry in entries {
            let (key, value) = entry.map_err(|e| {
                StatsError::Config(format!("malformed {}: {}", path.display(), e))
            })?;
            let slot = match key.as_str() {
                "HOST" => &mut self.host,
                "USERNAME" => &mut self.username,
                "PASSWORD" => &mut self.password,
                "CLEARTEXT_TARGET" => &mut self.target,
                "INGEST_SECRET" => &mut self.secret,
                "INGEST_TAG" => &mut self.tag,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        Ok(self)
    }

    /// Validates every value and builds the configuration.
    ///
    /// # Errors
    /// Returns `StatsError::Config` for a missing or empty value and
    /// `StatsError::Validation` for a value that is present but malformed.
    pub fn build(self) -> StatsResult<Config> {
        let host = required(self.host, "missing host")?;
        let username = required(self.username, "missing username or password")?;
        let password = required(self.password, "missing username or password")?;
        let target = required(self.target, "missing cleartext target")?;
        let secret = required(self.secret, "missing ingest secret")?;
        let tag = required(self.tag, "missing ingest tag")?;

        let schedule = self.schedule;
        for (name, value) in [
            ("datastore interval", schedule.datastore_interval),
            ("runtime interval", schedule.runtime_interval),
            ("api timeout", schedule.cycle_timeout),
        ] {
            if value.is_zero() {
                return Err(StatsError::Config(format!("{} must be positive", name)));
            }
        }
        if let Some(rl) = self.rate_limit {
            if rl.requests_per_second == 0 || rl.burst_size == 0 {
                return Err(StatsError::Config(
                    "rate limit values must be greater than zero".to_string(),
                ));
            }
        }
        if self.page_size == Some(0) {
            return Err(StatsError::Config("page size must be positive".to_string()));
        }

        Ok(Config {
            vsphere_host: VsphereHost::new(host)?,
            vsphere_username: VsphereUsername::new(username)?,
            vsphere_password: VspherePassword::new(password)?,
            ingest_target: IngestTarget::new(target)?,
            ingest_secret: IngestSecret::new(secret)?,
            ingest_tag: tag,
            verify_certs: self.verify_certs,
            api_release: self
                .api_release
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_RELEASE.to_string()),
            rate_limit: self.rate_limit,
            page_size: self.page_size,
            schedule,
        })
    }
}

fn required(value: Option<String>, message: &str) -> StatsResult<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| StatsError::Config(message.to_string()))
}
