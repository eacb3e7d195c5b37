use clap::Parser;
use std::{path::PathBuf, process::ExitCode, sync::Arc, time::Duration};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vsphere_stats::{
    Config, DEFAULT_API_RELEASE, HecSink, InventoryClient, RateLimitConfig, Sampler, Scheduler,
    StatsResult, TelemetrySink,
};

#[derive(Parser, Debug)]
#[command(name = "vsphere-stats")]
#[command(about = "Samples vSphere host, VM and datastore statistics", long_about = None)]
struct Cli {
    /// vCenter or ESXi address, optionally with a port
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Login user
    #[arg(long, env = "USERNAME")]
    username: Option<String>,

    /// Login password
    #[arg(long, env = "PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Event collector address (HOST:PORT)
    #[arg(long, env = "CLEARTEXT_TARGET")]
    cleartext_target: Option<String>,

    /// Event collector token
    #[arg(long, env = "INGEST_SECRET", hide_env_values = true)]
    ingest_secret: Option<String>,

    /// Tag attached to every record
    #[arg(long, env = "INGEST_TAG")]
    ingest_tag: Option<String>,

    /// Seconds between datastore samples
    #[arg(long, default_value_t = 60)]
    datastore_interval: u64,

    /// Seconds between host and VM samples
    #[arg(long, default_value_t = 5)]
    runtime_interval: u64,

    /// Deadline in seconds for one sampling cycle
    #[arg(long, default_value_t = 5)]
    api_timeout: u64,

    /// Seconds to wait for the event collector at startup
    #[arg(long, default_value_t = 30)]
    ready_timeout: u64,

    /// Verify the vSphere TLS certificate
    #[arg(long)]
    verify_certs: bool,

    /// VI/JSON API release
    #[arg(long, default_value = DEFAULT_API_RELEASE)]
    api_release: String,

    /// Maximum management API requests per second
    #[arg(long)]
    rate_limit: Option<u32>,

    /// Objects per property collector page
    #[arg(long)]
    page_size: Option<u32>,

    /// Extra dotenv file consulted for unset values
    #[arg(long)]
    env_file: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> StatsResult<Config> {
        let mut builder = Config::builder()
            .verify_certs(self.verify_certs)
            .api_release(self.api_release)
            .datastore_interval(Duration::from_secs(self.datastore_interval))
            .runtime_interval(Duration::from_secs(self.runtime_interval))
            .api_timeout(Duration::from_secs(self.api_timeout))
            .ready_timeout(Duration::from_secs(self.ready_timeout));

        if let Some(host) = self.host {
            builder = builder.host(host);
        }
        if let Some(username) = self.username {
            builder = builder.username(username);
        }
        if let Some(password) = self.password {
            builder = builder.password(password);
        }
        if let Some(target) = self.cleartext_target {
            builder = builder.target(target);
        }
        if let Some(secret) = self.ingest_secret {
            builder = builder.secret(secret);
        }
        if let Some(tag) = self.ingest_tag {
            builder = builder.tag(tag);
        }
        if let Some(rps) = self.rate_limit {
            builder = builder.rate_limit(RateLimitConfig {
                requests_per_second: rps,
                burst_size: rps,
            });
        }
        if let Some(page_size) = self.page_size {
            builder = builder.page_size(page_size);
        }
        if let Some(path) = self.env_file {
            builder = builder.env_file(path)?;
        }
        builder.build()
    }
}

async fn run(config: Config) -> StatsResult<()> {
    let sink = Arc::new(HecSink::new(
        config.ingest_target(),
        config.ingest_secret().clone(),
    )?);
    let tag = sink.resolve_tag(config.ingest_tag())?;

    let inventory = Arc::new(InventoryClient::connect(&config).await?);
    info!(host = %config.vsphere_host().as_str(), "connected to vSphere");

    let sampler = Sampler::new(inventory.clone(), sink, tag);
    let result = Scheduler::new(sampler, config.schedule())
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        })
        .await;

    inventory.logout().await;
    result
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("vsphere_stats=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => {
            info!("shut down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, fatal = e.is_fatal(), "vsphere-stats failed");
            ExitCode::FAILURE
        }
    }
}
