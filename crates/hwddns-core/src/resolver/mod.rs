//! Address resolver
//!
//! The resolver turns a list of unreliable lookup providers into one
//! validated address, or a definitive failure.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐    url, family    ┌──────────────┐
//! │   Resolver   │ ────────────────▶ │ AddressProbe │
//! └──────────────┘ ◀──────────────── └──────────────┘
//!        │            ProbeOutcome
//!        ▼
//! ┌──────────────┐
//! │  Validator   │ ── valid ──▶ ResolvedAddress
//! └──────────────┘
//!        │ invalid / failed
//!        ▼
//!   next provider ... ──▶ DiscoveryExhausted
//! ```
//!
//! Providers are tried strictly one after another, in list order. The first
//! candidate that validates wins and later providers are never contacted.

use crate::config::{AddressFamily, RecordSetConfig};
use crate::error::{Error, Result};
use crate::providers::ProviderList;
use crate::traits::{AddressProbe, RecordSetUpdater, UpdateOutcome};
use crate::validator::ResolvedAddress;
use tracing::{debug, info};

/// Sequential fallback over an ordered provider list
pub struct Resolver {
    /// Performs one lookup per provider
    probe: Box<dyn AddressProbe>,

    /// Providers in priority order
    providers: ProviderList,
}

impl Resolver {
    /// Create a resolver over `providers` using `probe` for each attempt
    pub fn new(probe: Box<dyn AddressProbe>, providers: ProviderList) -> Self {
        Self { probe, providers }
    }

    /// Family this resolver discovers
    pub fn family(&self) -> AddressFamily {
        self.providers.family()
    }

    /// Discover the public address
    ///
    /// # Returns
    ///
    /// - `Ok(ResolvedAddress)`: the first candidate that passed validation
    /// - `Err(Error::DiscoveryExhausted)`: every provider failed or returned
    ///   an invalid candidate
    pub async fn resolve(&self) -> Result<ResolvedAddress> {
        let family = self.family();

        for url in self.providers.urls() {
            let candidate = match self.probe.probe(url, family).await {
                Ok(candidate) => candidate,
                Err(e) => {
                    debug!("Lookup via {} failed: {}", url, e);
                    continue;
                }
            };

            match ResolvedAddress::parse(&candidate, family) {
                Ok(address) => {
                    debug!("Lookup via {} returned {}", url, address);
                    return Ok(address);
                }
                Err(e) => {
                    debug!("Lookup via {} rejected: {}", url, e);
                }
            }
        }

        Err(Error::DiscoveryExhausted(family))
    }
}

/// Obtain the address to publish
///
/// A caller supplied literal is only validated; discovery (and therefore any
/// network activity) happens only when nothing was supplied.
///
/// # Returns
///
/// - `Ok(ResolvedAddress)`: the supplied or discovered address
/// - `Err(Error::Validation)`: the supplied literal does not match the family
/// - `Err(Error::DiscoveryExhausted)`: discovery failed
pub async fn acquire(supplied: Option<&str>, resolver: &Resolver) -> Result<ResolvedAddress> {
    let family = resolver.family();

    match supplied {
        Some(literal) => {
            let address = ResolvedAddress::parse(literal, family)?;
            info!("Using supplied {} address: {}", family, address);
            Ok(address)
        }
        None => {
            let address = resolver.resolve().await?;
            info!("Discovered public {} address: {}", family, address);
            Ok(address)
        }
    }
}

/// One complete run: obtain the address, then publish it
///
/// Errors from either stage are returned unchanged; nothing is retried.
pub async fn run_once(
    supplied: Option<&str>,
    resolver: &Resolver,
    updater: &dyn RecordSetUpdater,
    target: &RecordSetConfig,
) -> Result<UpdateOutcome> {
    let address = acquire(supplied, resolver).await?;

    info!(
        "Publishing {} to record set {} in zone {} via {}",
        address,
        target.record_set_id,
        target.zone_id,
        updater.provider_name()
    );

    updater.update_record_set(target, &address).await
}
