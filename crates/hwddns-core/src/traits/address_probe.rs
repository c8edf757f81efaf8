// # Address Probe Trait
//
// Defines the interface for asking one lookup provider for the caller's
// public address.
//
// ## Implementations
//
// - HTTP: `hwddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use hwddns_core::{AddressFamily, AddressProbe};
//
// let probe = /* AddressProbe implementation */;
// let candidate = probe.probe("http://4.ipw.cn", AddressFamily::V4).await?;
// ```

use crate::config::AddressFamily;
use async_trait::async_trait;

/// Result of one provider attempt
///
/// `Ok` carries the extracted candidate, which has not been validated yet.
pub type ProbeOutcome = Result<String, crate::Error>;

/// A single unit of lookup work against one provider
///
/// Implementations must:
/// - bound every call with a timeout
/// - never retry inside a call
/// - release the connection on success, error and timeout alike
/// - keep no state between calls
///
/// Validation of the candidate is left to the resolver.
#[async_trait]
pub trait AddressProbe: Send + Sync {
    /// Fetch `url` and extract the first `family` shaped substring
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: the extracted candidate
    /// - `Err(Error::Transport)`: the provider could not be reached in time
    /// - `Err(Error::Http)`: the provider answered with a non-success status
    /// - `Err(Error::Format)`: the body contained no address
    async fn probe(&self, url: &str, family: AddressFamily) -> ProbeOutcome;
}
