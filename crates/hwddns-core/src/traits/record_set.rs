// # Record Set Updater Trait
//
// Defines the interface for publishing a resolved address into the DNS.
//
// ## Implementations
//
// - Huawei Cloud DNS: `hwddns-provider-huaweicloud` crate
//
// ## Usage
//
// ```rust,ignore
// use hwddns_core::{RecordSetConfig, RecordSetUpdater};
//
// let updater = /* RecordSetUpdater implementation */;
// let target = RecordSetConfig::new("zone-id", "record-set-id");
// updater.update_record_set(&target, &address).await?;
// ```

use crate::config::RecordSetConfig;
use crate::validator::ResolvedAddress;
use async_trait::async_trait;

/// Result of a record set update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The provider accepted the new value list
    Updated {
        /// The published address
        address: String,
    },
    /// Dry-run: the request was prepared but not sent
    Skipped {
        /// The address that would have been published
        address: String,
    },
}

/// Publishes an address into one record set
///
/// Implementations make exactly one API call per invocation and return the
/// provider's error verbatim on failure. There is no retry: re-running the
/// process is the retry mechanism.
#[async_trait]
pub trait RecordSetUpdater: Send + Sync {
    /// Replace the record set's value list with `[address]`
    ///
    /// # Parameters
    ///
    /// - `target`: zone and record set to update
    /// - `address`: the already validated address
    async fn update_record_set(
        &self,
        target: &RecordSetConfig,
        address: &ResolvedAddress,
    ) -> Result<UpdateOutcome, crate::Error>;

    /// Provider name for logging
    fn provider_name(&self) -> &'static str;
}
