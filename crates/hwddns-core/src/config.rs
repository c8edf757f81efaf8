//! Configuration types for hwddns
//!
//! This module defines all configuration structures used throughout the workspace.
//! Everything here is fixed for the lifetime of a single run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default per-request timeout for lookup providers (5 seconds)
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

/// Bounds accepted for a user supplied probe timeout
const PROBE_TIMEOUT_RANGE_SECS: std::ops::RangeInclusive<u64> = 1..=60;

/// Address family of the record being published
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    /// IPv4 (A record)
    #[default]
    V4,
    /// IPv6 (AAAA record)
    V6,
}

impl AddressFamily {
    /// The DNS record type that carries addresses of this family
    pub fn record_type(&self) -> &'static str {
        match self {
            AddressFamily::V4 => "A",
            AddressFamily::V6 => "AAAA",
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::V4 => f.write_str("IPv4"),
            AddressFamily::V6 => f.write_str("IPv6"),
        }
    }
}

impl FromStr for AddressFamily {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v4" => Ok(AddressFamily::V4),
            "v6" => Ok(AddressFamily::V6),
            other => Err(crate::Error::config(format!(
                "ip type must be \"v4\" or \"v6\", got \"{}\"",
                other
            ))),
        }
    }
}

/// Outbound transport policy
///
/// Skipping certificate validation exists for embedded callers sitting behind
/// intercepting or self-signed infrastructure. It is never the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransportPolicy {
    /// Accept any TLS certificate on outbound requests
    pub skip_tls_verification: bool,
}

impl TransportPolicy {
    /// Validate certificates (the default)
    pub fn verified() -> Self {
        Self {
            skip_tls_verification: false,
        }
    }

    /// Skip certificate validation
    pub fn insecure() -> Self {
        Self {
            skip_tls_verification: true,
        }
    }
}

/// Address discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Family to discover
    #[serde(default)]
    pub family: AddressFamily,

    /// TLS policy for lookup requests
    #[serde(default)]
    pub transport: TransportPolicy,

    /// Per-provider timeout in seconds
    #[serde(default = "default_probe_timeout_secs")]
    pub timeout_secs: u64,

    /// Lookup URLs replacing the built-in table, in priority order
    #[serde(default)]
    pub lookup_urls: Option<Vec<String>>,
}

impl DiscoveryConfig {
    /// Create a discovery configuration with the built-in providers
    pub fn new(family: AddressFamily, transport: TransportPolicy) -> Self {
        Self {
            family,
            transport,
            timeout_secs: default_probe_timeout_secs(),
            lookup_urls: None,
        }
    }

    /// Per-provider timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the discovery configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if !PROBE_TIMEOUT_RANGE_SECS.contains(&self.timeout_secs) {
            return Err(crate::Error::config(format!(
                "lookup timeout must be between {} and {} seconds, got {}",
                PROBE_TIMEOUT_RANGE_SECS.start(),
                PROBE_TIMEOUT_RANGE_SECS.end(),
                self.timeout_secs
            )));
        }

        if let Some(ref urls) = self.lookup_urls {
            if urls.is_empty() {
                return Err(crate::Error::config("lookup URL list cannot be empty"));
            }
            for url in urls {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(crate::Error::config(format!(
                        "lookup URL must use http or https: {}",
                        url
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Huawei Cloud credentials and region
///
/// The Debug implementation never prints the secret key.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Access key (AK)
    pub access_key: String,
    /// Secret key (SK), never logged
    pub secret_key: String,
    /// Project ID, must belong to `region`
    pub project_id: String,
    /// Region name, e.g. `cn-east-3`
    pub region: String,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<REDACTED>")
            .field("project_id", &self.project_id)
            .field("region", &self.region)
            .finish()
    }
}

impl ProviderConfig {
    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        require_value("access key", &self.access_key)?;
        require_value("secret key", &self.secret_key)?;
        require_value("project ID", &self.project_id)?;
        require_value("region", &self.region)?;

        if !self
            .region
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(crate::Error::config(format!(
                "region contains invalid characters: {}",
                self.region
            )));
        }

        Ok(())
    }
}

/// The record set whose value list gets replaced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSetConfig {
    /// Zone ID
    pub zone_id: String,
    /// Record set ID
    pub record_set_id: String,
}

impl RecordSetConfig {
    /// Create a new record set reference
    pub fn new(zone_id: impl Into<String>, record_set_id: impl Into<String>) -> Self {
        Self {
            zone_id: zone_id.into(),
            record_set_id: record_set_id.into(),
        }
    }

    /// Validate the record set reference
    pub fn validate(&self) -> Result<(), crate::Error> {
        require_value("zone ID", &self.zone_id)?;
        require_value("record set ID", &self.record_set_id)?;
        Ok(())
    }
}

/// Full configuration for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HwddnsConfig {
    /// Credentials and region
    pub provider: ProviderConfig,

    /// Target record set
    pub record_set: RecordSetConfig,

    /// Discovery settings
    pub discovery: DiscoveryConfig,

    /// Address supplied by the caller, bypassing discovery
    #[serde(default)]
    pub address: Option<String>,

    /// Free-text note describing the record
    #[serde(default)]
    pub description: Option<String>,

    /// Sign and log the update without sending it
    #[serde(default)]
    pub dry_run: bool,
}

impl HwddnsConfig {
    /// Validate the configuration
    ///
    /// Runs before any network activity.
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.provider.validate()?;
        self.record_set.validate()?;
        self.discovery.validate()?;

        if let Some(ref address) = self.address
            && address.trim().is_empty()
        {
            return Err(crate::Error::config("supplied address cannot be blank"));
        }

        Ok(())
    }
}

fn require_value(name: &str, value: &str) -> Result<(), crate::Error> {
    if value.trim().is_empty() {
        return Err(crate::Error::config(format!(
            "{} is required (wrap values in quotes, e.g. --region \"cn-east-3\")",
            name
        )));
    }
    Ok(())
}

fn default_probe_timeout_secs() -> u64 {
    DEFAULT_PROBE_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> HwddnsConfig {
        HwddnsConfig {
            provider: ProviderConfig {
                access_key: "AKEXAMPLE".to_string(),
                secret_key: "very-secret".to_string(),
                project_id: "0123456789abcdef".to_string(),
                region: "cn-east-3".to_string(),
            },
            record_set: RecordSetConfig::new("zone-1", "rs-1"),
            discovery: DiscoveryConfig::new(AddressFamily::V4, TransportPolicy::verified()),
            address: None,
            description: None,
            dry_run: false,
        }
    }

    #[test]
    fn test_family_from_str() {
        assert_eq!("v4".parse::<AddressFamily>().unwrap(), AddressFamily::V4);
        assert_eq!("v6".parse::<AddressFamily>().unwrap(), AddressFamily::V6);
        assert!("ipv4".parse::<AddressFamily>().is_err());
        assert!("V4".parse::<AddressFamily>().is_err());
    }

    #[test]
    fn test_family_serde_is_lowercase() {
        let json = serde_json::to_string(&AddressFamily::V6).unwrap();
        assert_eq!(json, "\"v6\"");
    }

    #[test]
    fn test_valid_config() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn test_missing_region_rejected() {
        let mut config = sample_config();
        config.provider.region = "  ".to_string();
        assert!(matches!(config.validate(), Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_missing_record_set_rejected() {
        let mut config = sample_config();
        config.record_set.record_set_id.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_range() {
        let mut config = sample_config();
        config.discovery.timeout_secs = 0;
        assert!(config.validate().is_err());
        config.discovery.timeout_secs = 61;
        assert!(config.validate().is_err());
        config.discovery.timeout_secs = 60;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lookup_urls_must_be_http() {
        let mut config = sample_config();
        config.discovery.lookup_urls = Some(vec!["ftp://example.net".to_string()]);
        assert!(config.validate().is_err());

        config.discovery.lookup_urls = Some(Vec::new());
        assert!(config.validate().is_err());

        config.discovery.lookup_urls = Some(vec!["https://ip.example.net".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_secret_key_not_exposed_in_debug() {
        let debug_str = format!("{:?}", sample_config());
        assert!(!debug_str.contains("very-secret"));
        assert!(debug_str.contains("AKEXAMPLE"));
    }
}
