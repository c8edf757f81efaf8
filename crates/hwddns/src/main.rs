// # hwddns - one-shot dynamic DNS updater for Huawei Cloud
//
// This binary is a THIN integration layer:
// 1. Parse flags / environment variables
// 2. Validate the configuration before any network activity
// 3. Resolve the public address (or take the supplied one)
// 4. Replace the record set's value list with that address
// 5. Exit
//
// Scheduling is left to cron or a systemd timer; every run makes at most one
// discovery pass and one update call.
//
// ## Example
//
// ```bash
// export HWDDNS_AK=your_ak
// export HWDDNS_SK=your_sk
//
// hwddns --project-id 0123456789abcdef --region cn-east-3 \
//        --zone-id ff8080825b8fc86c015b94bc6f8712c3 \
//        --record-set-id ff8080825b8fc86c015b94bc6f8712c4 \
//        --ip-type v6
// ```

use anyhow::Result;
use clap::Parser;
use clap::builder::BoolishValueParser;
use hwddns_core::config::DEFAULT_PROBE_TIMEOUT_SECS;
use hwddns_core::{
    AddressFamily, DiscoveryConfig, Error, HwddnsConfig, ProviderConfig, RecordSetConfig,
    TransportPolicy, UpdateOutcome, run_once,
};
use hwddns_provider_huaweicloud::HuaweiCloudProvider;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Record set updated (or dry-run completed)
/// - 1: Configuration or input error
/// - 2: Runtime error (discovery exhausted, update rejected)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HwddnsExitCode {
    /// Normal exit
    Success = 0,
    /// Bad flags, bad values, or a supplied address of the wrong family
    ConfigError = 1,
    /// Discovery or update failed
    RuntimeError = 2,
}

impl From<HwddnsExitCode> for ExitCode {
    fn from(code: HwddnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Update a Huawei Cloud DNS record set with this host's public address
#[derive(Debug, Parser)]
#[command(name = "hwddns", version, about)]
struct Args {
    /// Access key
    #[arg(long, env = "HWDDNS_AK", hide_env_values = true)]
    ak: String,

    /// Secret key
    #[arg(long, env = "HWDDNS_SK", hide_env_values = true)]
    sk: String,

    /// Project ID matching the region
    #[arg(long, env = "HWDDNS_PROJECT_ID")]
    project_id: String,

    /// Region name, e.g. cn-east-3
    #[arg(long, env = "HWDDNS_REGION")]
    region: String,

    /// Zone ID
    #[arg(long, env = "HWDDNS_ZONE_ID")]
    zone_id: String,

    /// Record set ID
    #[arg(long, env = "HWDDNS_RECORD_SET_ID")]
    record_set_id: String,

    /// Address to publish; skips discovery
    #[arg(long, env = "HWDDNS_IP")]
    ip: Option<String>,

    /// Address family: v4 or v6
    #[arg(long, env = "HWDDNS_IP_TYPE", default_value = "v4")]
    ip_type: String,

    /// Free-text note, logged at start
    #[arg(long, env = "HWDDNS_DESC")]
    desc: Option<String>,

    /// Skip TLS certificate validation
    #[arg(long, env = "HWDDNS_SKIP_TLS", value_parser = BoolishValueParser::new())]
    skip_tls: bool,

    /// Lookup provider URL, tried in the order given (repeatable)
    #[arg(long = "lookup-url", value_name = "URL")]
    lookup_urls: Vec<String>,

    /// Per-probe timeout in seconds (1-60)
    #[arg(long, env = "HWDDNS_TIMEOUT_SECS", default_value_t = DEFAULT_PROBE_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Sign and log the update without sending it
    #[arg(long, env = "HWDDNS_DRY_RUN", value_parser = BoolishValueParser::new())]
    dry_run: bool,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, env = "HWDDNS_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Args {
    /// Build the run configuration
    fn to_config(&self) -> Result<HwddnsConfig> {
        let family: AddressFamily = self.ip_type.parse()?;

        let transport = if self.skip_tls {
            TransportPolicy::insecure()
        } else {
            TransportPolicy::verified()
        };

        let mut discovery = DiscoveryConfig::new(family, transport);
        discovery.timeout_secs = self.timeout_secs;
        if !self.lookup_urls.is_empty() {
            discovery.lookup_urls = Some(self.lookup_urls.clone());
        }

        Ok(HwddnsConfig {
            provider: ProviderConfig {
                access_key: self.ak.clone(),
                secret_key: self.sk.clone(),
                project_id: self.project_id.clone(),
                region: self.region.clone(),
            },
            record_set: RecordSetConfig::new(
                self.zone_id.as_str(),
                self.record_set_id.as_str(),
            ),
            discovery,
            address: self.ip.clone(),
            description: self.desc.clone(),
            dry_run: self.dry_run,
        })
    }
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "log level '{}' is not valid. Valid levels: trace, debug, info, warn, error",
            level
        ),
    }
}

/// Input problems exit 1, everything else 2
fn exit_code_for(err: &anyhow::Error) -> HwddnsExitCode {
    match err.downcast_ref::<Error>() {
        Some(Error::Validation { .. } | Error::Config(_) | Error::InvalidInput(_)) => {
            HwddnsExitCode::ConfigError
        }
        _ => HwddnsExitCode::RuntimeError,
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                HwddnsExitCode::ConfigError.into()
            } else {
                HwddnsExitCode::Success.into()
            };
        }
    };

    let log_level = match parse_log_level(&args.log_level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return HwddnsExitCode::ConfigError.into();
        }
    };

    let config = match args.to_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("hwddns: {}", e);
            return HwddnsExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("hwddns: {}", e);
        return HwddnsExitCode::ConfigError.into();
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return HwddnsExitCode::ConfigError.into();
    }

    info!(
        "Starting hwddns ({} record)",
        config.discovery.family.record_type()
    );
    if let Some(ref desc) = config.description {
        info!("Description: {}", desc);
    }

    // Discovery is sequential; one thread is all a single run needs.
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return HwddnsExitCode::RuntimeError.into();
        }
    };

    let code = rt.block_on(async {
        match run(&config).await {
            Ok(UpdateOutcome::Updated { address }) => {
                info!(
                    "Record set {} now points to {}",
                    config.record_set.record_set_id, address
                );
                HwddnsExitCode::Success
            }
            Ok(UpdateOutcome::Skipped { address }) => {
                info!(
                    "Dry run: record set {} left unchanged ({} not sent)",
                    config.record_set.record_set_id, address
                );
                HwddnsExitCode::Success
            }
            Err(e) => {
                error!("Run failed: {}", e);
                exit_code_for(&e)
            }
        }
    });

    code.into()
}

/// Acquire the address and publish it once
async fn run(config: &HwddnsConfig) -> Result<UpdateOutcome> {
    let resolver = hwddns_ip_http::resolver_for(&config.discovery)?;
    let provider = HuaweiCloudProvider::new(
        &config.provider,
        config.discovery.transport,
        config.dry_run,
    )?;

    let outcome = run_once(
        config.address.as_deref(),
        &resolver,
        &provider,
        &config.record_set,
    )
    .await?;

    Ok(outcome)
}
