//! Core traits for hwddns
//!
//! - [`AddressProbe`]: Ask one lookup provider for the public address
//! - [`RecordSetUpdater`]: Publish an address into a DNS record set

pub mod address_probe;
pub mod record_set;

pub use address_probe::{AddressProbe, ProbeOutcome};
pub use record_set::{RecordSetUpdater, UpdateOutcome};
