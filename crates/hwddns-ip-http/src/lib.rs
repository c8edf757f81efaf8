// # HTTP Lookup Probe
//
// This crate asks public "what is my IP" services for the caller's address.
//
// ## Behaviour
//
// - One GET per provider, bounded by a fixed timeout (5 seconds by default)
// - No retry inside a probe; the resolver moves on to the next provider
// - Bodies are searched for the first address-shaped substring rather than
//   parsed, since provider formats vary and are not contractually stable
// - Certificate validation can be switched off for embedded callers stuck
//   behind intercepting or self-signed infrastructure
//
// ## Usage
//
// ```rust,ignore
// use hwddns_core::{AddressFamily, TransportPolicy};
//
// let address = hwddns_ip_http::discover(AddressFamily::V4, TransportPolicy::verified()).await?;
// println!("public address: {}", address);
// ```

pub mod extract;

use async_trait::async_trait;
use hwddns_core::config::{DEFAULT_PROBE_TIMEOUT_SECS, DiscoveryConfig};
use hwddns_core::traits::{AddressProbe, ProbeOutcome};
use hwddns_core::{
    AddressFamily, Error, ProviderList, ResolvedAddress, Resolver, Result, TransportPolicy,
};
use std::time::Duration;

pub use extract::extract;

/// Default per-request timeout for lookup providers
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS);

/// HTTP implementation of [`AddressProbe`]
///
/// The transport policy and timeout are fixed at construction and apply to
/// every request made through this probe.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    /// HTTP client carrying the timeout and TLS policy
    client: reqwest::Client,

    /// Per-request timeout
    timeout: Duration,
}

impl HttpProbe {
    /// Create a probe with the default 5 second timeout
    pub fn new(policy: TransportPolicy) -> Result<Self> {
        Self::with_timeout(policy, DEFAULT_PROBE_TIMEOUT)
    }

    /// Create a probe with a custom timeout
    pub fn with_timeout(policy: TransportPolicy, timeout: Duration) -> Result<Self> {
        if policy.skip_tls_verification {
            tracing::warn!("TLS certificate validation disabled for lookup requests");
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(policy.skip_tls_verification)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl AddressProbe for HttpProbe {
    async fn probe(&self, url: &str, family: AddressFamily) -> ProbeOutcome {
        tracing::debug!("Probing {} for {} address", url, family);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::transport(format!("Request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::http(format!(
                "{} returned status {}",
                url,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response from {}: {}", url, e)))?;

        extract(body.trim(), family)
            .map(str::to_string)
            .ok_or_else(|| Error::format(format!("no address found in response from {}", url)))
    }
}

/// Build the resolver described by `config`
///
/// Uses the configured lookup URLs when present, the built-in table otherwise.
pub fn resolver_for(config: &DiscoveryConfig) -> Result<Resolver> {
    let probe = HttpProbe::with_timeout(config.transport, config.timeout())?;

    let providers = match config.lookup_urls {
        Some(ref urls) => ProviderList::new(config.family, urls.iter().cloned()),
        None => ProviderList::builtin(config.family),
    };

    Ok(Resolver::new(Box::new(probe), providers))
}

/// Discover the public `family` address through the built-in providers
pub async fn discover(family: AddressFamily, policy: TransportPolicy) -> Result<ResolvedAddress> {
    resolver_for(&DiscoveryConfig::new(family, policy))?
        .resolve()
        .await
}
